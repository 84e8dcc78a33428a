// SPDX-License-Identifier: Apache-2.0

use crate::layer::grid::GridLayer;
use crate::{FloorplanComponent, FloorplanError, Length, Result};

/// Per-side overrides for [`PaddedLayer`].
///
/// A forced side emits its air rectangle even when the gap on that side is
/// zero. Some build recipes force sides whose natural offset is zero so that
/// the record set of the emitted file stays uniform across similar runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForcedSides {
    pub left: bool,
    pub right: bool,
    pub bottom: bool,
    pub top: bool,
}

/// Wraps a grid layer and pads it with air rectangles up to a target
/// footprint.
///
/// The content's position within the target comes from its own `pos_offset`.
/// Each of the four sides emits exactly one air rectangle: when the gap on
/// that side is strictly positive, or unconditionally (with zero size) when
/// the side is forced. The left and right rectangles span the full target
/// height; the bottom and top rectangles span only the content width.
#[derive(Debug, Clone)]
pub struct PaddedLayer {
    content: GridLayer,
    total_width: Length,
    total_height: Length,
    force: ForcedSides,
}

impl PaddedLayer {
    pub fn new(
        content: GridLayer,
        total_width: Length,
        total_height: Length,
        force: ForcedSides,
    ) -> Result<PaddedLayer> {
        let (offset_x, offset_y) = content.pos_offset();
        if offset_x + content.total_width() > total_width
            || offset_y + content.total_height() > total_height
        {
            return Err(FloorplanError::PaddingOverflow {
                layer: content.name().to_string(),
            });
        }
        Ok(PaddedLayer {
            content,
            total_width,
            total_height,
            force,
        })
    }

    pub fn name(&self) -> &str {
        self.content.name()
    }

    pub fn total_width(&self) -> Length {
        self.total_width
    }

    pub fn total_height(&self) -> Length {
        self.total_height
    }

    pub fn thickness(&self) -> Length {
        self.content.thickness()
    }

    pub fn content(&self) -> &GridLayer {
        &self.content
    }

    pub fn components(&self) -> Vec<FloorplanComponent> {
        let (offset_x, offset_y) = self.content.pos_offset();
        let content_width = self.content.total_width();
        let content_height = self.content.total_height();
        let mut components = self.content.components();

        let left = offset_x;
        if left > Length::ZERO || self.force.left {
            components.push(FloorplanComponent::new(
                "air_left",
                left,
                self.total_height,
                Length::ZERO,
                Length::ZERO,
            ));
        }
        let right = self.total_width - offset_x - content_width;
        if right > Length::ZERO || self.force.right {
            components.push(FloorplanComponent::new(
                "air_right",
                right,
                self.total_height,
                offset_x + content_width,
                Length::ZERO,
            ));
        }
        let bottom = offset_y;
        if bottom > Length::ZERO || self.force.bottom {
            components.push(FloorplanComponent::new(
                "air_bottom",
                content_width,
                bottom,
                offset_x,
                Length::ZERO,
            ));
        }
        let top = self.total_height - offset_y - content_height;
        if top > Length::ZERO || self.force.top {
            components.push(FloorplanComponent::new(
                "air_top",
                content_width,
                top,
                offset_x,
                offset_y + content_height,
            ));
        }

        components
    }
}
