// SPDX-License-Identifier: Apache-2.0

use rstar::{AABB, RTree, RTreeObject};

use crate::{FloorplanComponent, FloorplanError, Length, Result};

struct BBoxWrapper {
    index: usize,
    envelope: AABB<[i64; 2]>,
}

impl RTreeObject for BBoxWrapper {
    type Envelope = AABB<[i64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Checks that `components` tile the `total_width` x `total_height` footprint
/// exactly: the union bounding box equals the footprint, no two rectangles
/// overlap with positive area, and the summed area leaves no gaps. Shared
/// edges are fine. Zero-area rectangles (forced padding) are ignored by the
/// overlap and area accounting.
pub fn check(
    layer: &str,
    components: &[FloorplanComponent],
    total_width: Length,
    total_height: Length,
) -> Result<()> {
    let error = |detail: String| FloorplanError::Coverage {
        layer: layer.to_string(),
        detail,
    };

    if components.is_empty() {
        return Err(error("layer has no rectangles".to_string()));
    }

    // Edges in micrometers: (left, bottom, right, top) per rectangle.
    let rects: Vec<(i64, i64, i64, i64)> = components
        .iter()
        .map(|c| {
            let left = c.left.micrometers();
            let bottom = c.bottom.micrometers();
            (
                left,
                bottom,
                left + c.width.micrometers(),
                bottom + c.height.micrometers(),
            )
        })
        .collect();

    let min_left = rects.iter().map(|r| r.0).min().unwrap();
    let min_bottom = rects.iter().map(|r| r.1).min().unwrap();
    let max_right = rects.iter().map(|r| r.2).max().unwrap();
    let max_top = rects.iter().map(|r| r.3).max().unwrap();
    if min_left != 0
        || min_bottom != 0
        || max_right != total_width.micrometers()
        || max_top != total_height.micrometers()
    {
        return Err(error(format!(
            "rectangles span ({min_left}, {min_bottom}) to ({max_right}, {max_top}) um, \
             expected (0, 0) to ({}, {}) um",
            total_width.micrometers(),
            total_height.micrometers()
        )));
    }

    // Only rectangles with positive area take part in overlap and area
    // accounting.
    let positive: Vec<usize> = (0..rects.len())
        .filter(|&i| rects[i].2 > rects[i].0 && rects[i].3 > rects[i].1)
        .collect();

    let rtree = RTree::bulk_load(
        positive
            .iter()
            .map(|&index| BBoxWrapper {
                index,
                envelope: AABB::from_corners(
                    [rects[index].0, rects[index].1],
                    [rects[index].2, rects[index].3],
                ),
            })
            .collect::<Vec<_>>(),
    );

    for wrapper in rtree.iter() {
        let i = wrapper.index;
        for candidate in rtree.locate_in_envelope_intersecting(&wrapper.envelope) {
            let j = candidate.index;
            if j <= i {
                continue;
            }
            // The rtree counts abutted rectangles as intersecting; only a
            // positive-area intersection is an actual overlap.
            let overlap_width = rects[i].2.min(rects[j].2) - rects[i].0.max(rects[j].0);
            let overlap_height = rects[i].3.min(rects[j].3) - rects[i].1.max(rects[j].1);
            if overlap_width > 0 && overlap_height > 0 {
                return Err(error(format!(
                    "rectangles '{}' and '{}' overlap",
                    components[i].name, components[j].name
                )));
            }
        }
    }

    let covered: i128 = positive
        .iter()
        .map(|&i| (rects[i].2 - rects[i].0) as i128 * (rects[i].3 - rects[i].1) as i128)
        .sum();
    let footprint =
        total_width.micrometers() as i128 * total_height.micrometers() as i128;
    if covered != footprint {
        return Err(error(format!(
            "rectangles cover {covered} um^2 of a {footprint} um^2 footprint, the layer has gaps"
        )));
    }

    Ok(())
}
