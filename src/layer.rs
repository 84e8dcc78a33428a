// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use crate::material::{AIR, Material, SILICON};
use crate::{FloorplanComponent, Length, Result, validate};

mod grid;
pub use grid::{GridKind, GridLayer};

mod core_mem;
pub use core_mem::CoreMemControllerLayer;

mod padding;
pub use padding::{ForcedSides, PaddedLayer};

/// Header comment emitted at the top of every floorplan file.
const FLP_HEADER: &str = "# Line Format: <unit-name>\\t<width>\\t<height>\\t<left-x>\\t<bottom-y>\n";

/// One physical stratum of the chip stack.
///
/// The set of layer kinds is closed: simple rectangular grids (cores, memory
/// banks, memory controllers, TIM, interposer), the composite
/// core+memory-controller layer used in 2.5D packaging, and the air-padding
/// wrapper that grows a grid to a larger footprint.
#[derive(Debug, Clone)]
pub enum Layer {
    Grid(GridLayer),
    CoreAndMemController(CoreMemControllerLayer),
    PaddedWithAir(PaddedLayer),
}

impl Layer {
    pub fn name(&self) -> &str {
        match self {
            Layer::Grid(layer) => layer.name(),
            Layer::CoreAndMemController(layer) => layer.name(),
            Layer::PaddedWithAir(layer) => layer.name(),
        }
    }

    pub fn total_width(&self) -> Length {
        match self {
            Layer::Grid(layer) => layer.total_width(),
            Layer::CoreAndMemController(layer) => layer.total_width(),
            Layer::PaddedWithAir(layer) => layer.total_width(),
        }
    }

    pub fn total_height(&self) -> Length {
        match self {
            Layer::Grid(layer) => layer.total_height(),
            Layer::CoreAndMemController(layer) => layer.total_height(),
            Layer::PaddedWithAir(layer) => layer.total_height(),
        }
    }

    pub fn thickness(&self) -> Length {
        match self {
            Layer::Grid(layer) => layer.thickness(),
            Layer::CoreAndMemController(layer) => layer.thickness(),
            Layer::PaddedWithAir(layer) => layer.thickness(),
        }
    }

    /// Whether the solver should expect a power trace for this layer.
    pub fn has_power_consumption(&self) -> bool {
        match self {
            Layer::Grid(layer) => layer.kind().has_power_consumption(),
            Layer::CoreAndMemController(_) => true,
            Layer::PaddedWithAir(_) => false,
        }
    }

    /// Thermal constants reported for this layer.
    pub fn material(&self) -> &'static Material {
        match self {
            Layer::Grid(layer) => layer.kind().material(),
            Layer::CoreAndMemController(_) => &SILICON,
            Layer::PaddedWithAir(_) => &AIR,
        }
    }

    /// All rectangles of this layer, in emission order.
    pub fn components(&self) -> Vec<FloorplanComponent> {
        match self {
            Layer::Grid(layer) => layer.components(),
            Layer::CoreAndMemController(layer) => layer.components(),
            Layer::PaddedWithAir(layer) => layer.components(),
        }
    }

    pub fn floorplan_filename(&self) -> String {
        format!("{}.flp", self.name())
    }

    /// Writes this layer's floorplan file into `directory`, after checking
    /// that the rectangles tile the layer footprint exactly.
    pub fn write_floorplan(&self, directory: &Path) -> Result<()> {
        let components = self.components();
        validate::coverage::check(
            self.name(),
            &components,
            self.total_width(),
            self.total_height(),
        )?;
        let mut contents = String::from(FLP_HEADER);
        for component in &components {
            contents.push_str(&component.to_string());
            contents.push('\n');
        }
        fs::write(directory.join(self.floorplan_filename()), contents)?;
        Ok(())
    }

    /// The 7-line block describing this layer in a layer configuration file:
    /// layer index, lateral heat flow flag, power dissipation flag, specific
    /// heat capacity, thermal resistivity, thickness in meters, and the
    /// absolute path of the layer's floorplan file.
    pub(crate) fn configuration_block(&self, absolute_directory: &Path, nb: usize) -> String {
        let material = self.material();
        format!(
            "{}\nY\n{}\n{}\n{}\n{:.6}\n{}\n",
            nb,
            if self.has_power_consumption() { "Y" } else { "N" },
            material.specific_heat_capacity,
            material.thermal_resistivity,
            self.thickness().meters(),
            absolute_directory.join(self.floorplan_filename()).display(),
        )
    }
}

impl From<GridLayer> for Layer {
    fn from(layer: GridLayer) -> Layer {
        Layer::Grid(layer)
    }
}

impl From<CoreMemControllerLayer> for Layer {
    fn from(layer: CoreMemControllerLayer) -> Layer {
        Layer::CoreAndMemController(layer)
    }
}

impl From<PaddedLayer> for Layer {
    fn from(layer: PaddedLayer) -> Layer {
        Layer::PaddedWithAir(layer)
    }
}
