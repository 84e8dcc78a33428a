// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::{Layer, Result};

/// Header comment describing the 7-line blocks of a layer configuration file.
const LCF_HEADER: &str = "\
# <Layer Number>
# <Lateral heat flow Y/N?>
# <Power Dissipation Y/N?>
# <Specific heat capacity in J/(m^3K)>
# <Resistivity in (m-K)/W>
# <Thickness in m>
# <floorplan file>
";

/// Solver configuration template; the four footprint-derived dimensions and
/// the heatsink thickness are substituted at write time.
const HOTSPOT_CONFIG_TEMPLATE: &str = include_str!("hotspot.config.tmpl");

/// An ordered sequence of layers sharing one footprint, forming one physical
/// chip cross-section.
///
/// Layers are appended in physical bottom-to-top stacking order and the stack
/// is written in one pass; there is no later mutation. A layer instance may
/// be shared (`Rc`) across several stacking positions, as with replicated
/// TIM layers, which carry no position state of their own.
#[derive(Debug, Clone)]
pub struct ThermalStack {
    name: String,
    has_heatsink: bool,
    layers: Vec<Rc<Layer>>,
}

impl ThermalStack {
    pub fn new(name: impl Into<String>) -> ThermalStack {
        ThermalStack {
            name: name.into(),
            has_heatsink: true,
            layers: Vec::new(),
        }
    }

    /// A stack without a heatsink on top, e.g. an external memory module.
    pub fn without_heatsink(name: impl Into<String>) -> ThermalStack {
        ThermalStack {
            has_heatsink: false,
            ..ThermalStack::new(name)
        }
    }

    /// Appends a layer in physical bottom-to-top stacking order.
    pub fn add_layer(&mut self, layer: Rc<Layer>) {
        self.layers.push(layer);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_heatsink(&self) -> bool {
        self.has_heatsink
    }

    pub fn layers(&self) -> &[Rc<Layer>] {
        &self.layers
    }

    /// Writes every output file of this stack into `directory`: one `.flp`
    /// per distinct layer, the `.lcf` layer configuration, and the solver
    /// configuration file.
    ///
    /// Panics if the stack is empty, if any layer's footprint differs from
    /// the first layer's, or if two distinct layers share a name. These
    /// signal layer-construction bugs in the caller, not runtime conditions.
    pub fn write_files(&self, directory: &Path) -> Result<()> {
        assert!(!self.layers.is_empty(), "stack '{}' has no layers", self.name);
        let first = &self.layers[0];
        for layer in &self.layers[1..] {
            assert_eq!(
                layer.total_width(),
                first.total_width(),
                "width of layer '{}' does not match layer '{}'",
                layer.name(),
                first.name()
            );
            assert_eq!(
                layer.total_height(),
                first.total_height(),
                "height of layer '{}' does not match layer '{}'",
                layer.name(),
                first.name()
            );
        }

        fs::create_dir_all(directory)?;
        let absolute_directory = std::path::absolute(directory)?;

        // A shared layer instance is written once; reusing a name for a
        // different layer would silently clobber its floorplan file.
        let mut by_name: IndexMap<String, Rc<Layer>> = IndexMap::new();
        for layer in &self.layers {
            match by_name.entry(layer.name().to_string()) {
                Entry::Occupied(entry) => {
                    if !Rc::ptr_eq(entry.get(), layer) {
                        panic!("two distinct layers with the same name: {}", layer.name());
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(layer.clone());
                }
            }
        }
        for layer in by_name.values() {
            layer.write_floorplan(directory)?;
            log::debug!("wrote {}", layer.floorplan_filename());
        }

        self.write_layer_configuration(directory, &absolute_directory)?;
        self.write_hotspot_config(directory)?;
        log::info!(
            "wrote stack '{}' ({} layers) to {}",
            self.name,
            self.layers.len(),
            directory.display()
        );
        Ok(())
    }

    fn write_layer_configuration(
        &self,
        directory: &Path,
        absolute_directory: &Path,
    ) -> Result<()> {
        let mut contents = String::from(LCF_HEADER);
        for (nb, layer) in self.layers.iter().enumerate() {
            contents.push('\n');
            contents.push_str(&layer.configuration_block(absolute_directory, nb));
        }
        fs::write(directory.join(format!("{}.lcf", self.name)), contents)?;
        Ok(())
    }

    fn write_hotspot_config(&self, directory: &Path) -> Result<()> {
        let first = &self.layers[0];
        let chip_size = first.total_width().max(first.total_height()).meters();
        let heatsink_thickness = if self.has_heatsink { 0.0069 } else { 0.00001 };
        let contents = HOTSPOT_CONFIG_TEMPLATE
            .replace("{s_solder}", &format!("{:.6}", chip_size + 0.001))
            .replace("{s_sub}", &format!("{:.6}", chip_size + 0.02))
            .replace("{s_spreader}", &format!("{:.6}", chip_size + 0.02))
            .replace("{s_sink}", &format!("{:.6}", chip_size + 0.04))
            .replace("{t_sink}", &format!("{:.6}", heatsink_thickness));
        fs::write(
            directory.join(format!("{}_hotspot.config", self.name)),
            contents,
        )?;
        Ok(())
    }
}
