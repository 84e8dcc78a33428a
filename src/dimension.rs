// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::{FloorplanError, Result};

/// A grid of elements, `NxM` or `NxMxP`. The third component is the number of
/// stacked layers; when absent the grid is two-dimensional.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDim {
    pub x: usize,
    pub y: usize,
    pub z: Option<usize>,
}

impl GridDim {
    /// Number of stacked layers; 1 for a two-dimensional grid.
    pub fn depth(&self) -> usize {
        self.z.unwrap_or(1)
    }

    /// Whether the grid was given with an explicit third dimension.
    pub fn is_3d(&self) -> bool {
        self.z.is_some()
    }

    /// Number of elements in one layer of the grid.
    pub fn per_layer(&self) -> usize {
        self.x * self.y
    }
}

impl fmt::Display for GridDim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.z {
            Some(z) => write!(f, "{}x{}x{}", self.x, self.y, z),
            None => write!(f, "{}x{}", self.x, self.y),
        }
    }
}

impl FromStr for GridDim {
    type Err = FloorplanError;

    fn from_str(s: &str) -> Result<GridDim> {
        let pattern = Regex::new(r"^(\d+)x(\d+)(?:x(\d+))?$").unwrap();
        let captures = pattern
            .captures(s)
            .ok_or_else(|| FloorplanError::InvalidDimension(s.to_string()))?;
        let component = |m: &str| {
            m.parse::<usize>()
                .map_err(|_| FloorplanError::InvalidDimension(s.to_string()))
        };
        let x = component(&captures[1])?;
        let y = component(&captures[2])?;
        let z = match captures.get(3) {
            Some(m) => Some(component(m.as_str())?),
            None => None,
        };
        if x == 0 || y == 0 || z == Some(0) {
            return Err(FloorplanError::InvalidDimension(s.to_string()));
        }
        Ok(GridDim { x, y, z })
    }
}
