// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::{FloorplanError, Length, Result};

/// One placed rectangle: a named component at an absolute position.
///
/// Serializes as a tab-separated record of name, width, height, left and
/// bottom, each distance formatted with exactly six decimal digits in meters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorplanComponent {
    pub name: String,
    pub width: Length,
    pub height: Length,
    pub left: Length,
    pub bottom: Length,
}

impl FloorplanComponent {
    pub fn new(
        name: impl Into<String>,
        width: Length,
        height: Length,
        left: Length,
        bottom: Length,
    ) -> FloorplanComponent {
        FloorplanComponent {
            name: name.into(),
            width,
            height,
            left,
            bottom,
        }
    }

    /// The same rectangle shifted by the given offsets.
    pub fn translated(&self, dx: Length, dy: Length) -> FloorplanComponent {
        FloorplanComponent {
            name: self.name.clone(),
            width: self.width,
            height: self.height,
            left: self.left + dx,
            bottom: self.bottom + dy,
        }
    }
}

impl fmt::Display for FloorplanComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}",
            self.name,
            self.width.meters(),
            self.height.meters(),
            self.left.meters(),
            self.bottom.meters()
        )
    }
}

/// An unordered collection of placed rectangles with aggregate bounding-box
/// queries. Holds the contents of one layer, or a subcomponent template
/// parsed from an existing floorplan file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Floorplan {
    components: Vec<FloorplanComponent>,
}

impl Floorplan {
    pub fn new(components: Vec<FloorplanComponent>) -> Floorplan {
        Floorplan { components }
    }

    /// Reads a floorplan file. Comment lines (leading `#`) are skipped; every
    /// other line must be a 5-field tab-separated record. A non-matching line
    /// is a fatal parse error naming the offending line number.
    pub fn from_file(path: &Path) -> Result<Floorplan> {
        let pattern =
            Regex::new(r"^([A-Za-z\-_0-9]+)\t(\d+\.\d+)\t(\d+\.\d+)\t(\d+\.\d+)\t(\d+\.\d+)")
                .unwrap();
        let contents = fs::read_to_string(path)?;
        let mut components = Vec::new();
        for (nb, line) in contents.lines().enumerate() {
            if line.trim().starts_with('#') {
                continue;
            }
            let captures = pattern
                .captures(line)
                .ok_or_else(|| FloorplanError::FloorplanParse {
                    path: path.to_path_buf(),
                    line: nb + 1,
                })?;
            let field = |i: usize| Length::from_meters(captures[i].parse::<f64>().unwrap());
            components.push(FloorplanComponent::new(
                &captures[1],
                field(2),
                field(3),
                field(4),
                field(5),
            ));
        }
        if components.is_empty() {
            return Err(FloorplanError::EmptyFloorplan {
                path: path.to_path_buf(),
            });
        }
        Ok(Floorplan { components })
    }

    pub fn components(&self) -> &[FloorplanComponent] {
        &self.components
    }

    /// Leftmost edge over all components.
    pub fn left(&self) -> Length {
        self.components
            .iter()
            .map(|c| c.left)
            .min()
            .expect("floorplan has no components")
    }

    /// Bottom edge over all components.
    pub fn bottom(&self) -> Length {
        self.components
            .iter()
            .map(|c| c.bottom)
            .min()
            .expect("floorplan has no components")
    }

    /// Width of the bounding box over all components.
    pub fn width(&self) -> Length {
        self.components
            .iter()
            .map(|c| c.left + c.width)
            .max()
            .expect("floorplan has no components")
            - self.left()
    }

    /// Height of the bounding box over all components.
    pub fn height(&self) -> Length {
        self.components
            .iter()
            .map(|c| c.bottom + c.height)
            .max()
            .expect("floorplan has no components")
            - self.bottom()
    }

    /// The same floorplan shifted by the given offsets.
    pub fn translated(&self, dx: Length, dy: Length) -> Floorplan {
        Floorplan {
            components: self.components.iter().map(|c| c.translated(dx, dy)).collect(),
        }
    }

    /// The same floorplan with every dimension scaled by the given factor,
    /// rounded to whole micrometers.
    pub fn scaled(&self, factor: f64) -> Floorplan {
        Floorplan {
            components: self
                .components
                .iter()
                .map(|c| {
                    FloorplanComponent::new(
                        c.name.clone(),
                        c.width * factor,
                        c.height * factor,
                        c.left * factor,
                        c.bottom * factor,
                    )
                })
                .collect(),
        }
    }
}
