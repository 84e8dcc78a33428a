// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;

use crate::layer::{
    CoreMemControllerLayer, ForcedSides, GridKind, GridLayer, Layer, PaddedLayer,
};
use crate::{Floorplan, FloorplanError, GridDim, Length, Result, ThermalStack};

/// How the memory is packaged relative to the cores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// External memory: core stack plus a separate off-chip memory stack.
    Ddr,
    /// Stacked memory: core stack plus a separate 3D-stacked memory stack.
    StackedMem,
    /// 2.5D packaging: cores and memory side by side on an interposer.
    Interposer,
    /// Full 3D stack: memory layers directly below the core layers.
    Full3d,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Ddr => "DDR",
            Mode::StackedMem => "3Dmem",
            Mode::Interposer => "2.5D",
            Mode::Full3d => "3D",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = FloorplanError;

    fn from_str(s: &str) -> Result<Mode> {
        match s {
            "DDR" => Ok(Mode::Ddr),
            "3Dmem" => Ok(Mode::StackedMem),
            "2.5D" => Ok(Mode::Interposer),
            "3D" => Ok(Mode::Full3d),
            _ => Err(FloorplanError::InvalidMode(s.to_string())),
        }
    }
}

/// All geometry parameters of one generator invocation.
#[derive(Debug, Clone)]
pub struct ChipConfig {
    pub mode: Mode,
    pub cores: GridDim,
    /// Explicit core element size; overridden by the subcore template.
    pub core_size: Option<(Length, Length)>,
    pub core_thickness: Length,
    pub subcore_template: Option<Floorplan>,
    pub banks: GridDim,
    pub bank_size: (Length, Length),
    pub bank_thickness: Length,
    pub core_mem_distance: Length,
    pub tim_thickness: Length,
    pub interposer_thickness: Length,
}

impl ChipConfig {
    /// The core element size, taken from the subcore template when one is
    /// given. The template must be anchored bottom left.
    fn resolve_core_size(&self) -> Result<(Length, Length)> {
        if let Some(template) = &self.subcore_template {
            if template.left() != Length::ZERO || template.bottom() != Length::ZERO {
                return Err(FloorplanError::TemplateNotAnchored {
                    left: template.left(),
                    bottom: template.bottom(),
                });
            }
            let size = (template.width(), template.height());
            log::info!(
                "setting core size to {} x {} from the subcore template",
                size.0,
                size.1
            );
            Ok(size)
        } else {
            self.core_size.ok_or(FloorplanError::MissingCoreSize)
        }
    }

    fn core_layer(&self, corex: Length, corey: Length, index: usize) -> Result<GridLayer> {
        let layer = GridLayer::new(
            GridKind::Core,
            format!("cores_{}", index + 1),
            self.cores.x,
            self.cores.y,
            corex,
            corey,
            self.core_thickness,
        )
        .with_nb_offset(index * self.cores.per_layer());
        match &self.subcore_template {
            Some(template) => layer.with_template(template.clone()),
            None => Ok(layer),
        }
    }

    fn bank_layer(&self, index: usize) -> GridLayer {
        GridLayer::new(
            GridKind::MemoryBank,
            format!("mem_{}", index + 1),
            self.banks.x,
            self.banks.y,
            self.bank_size.0,
            self.bank_size.1,
            self.bank_thickness,
        )
        .with_nb_offset(index * self.banks.per_layer())
    }

    fn tim_layer(&self, name: &str, width: Length, height: Length) -> GridLayer {
        GridLayer::new(GridKind::Tim, name, 1, 1, width, height, self.tim_thickness)
    }

    /// A stack of core layers, each followed by the shared TIM layer.
    fn core_stack(&self, name: &str) -> Result<ThermalStack> {
        let (corex, corey) = self.resolve_core_size()?;
        let mut stack = ThermalStack::new(name);
        let tim = Rc::new(Layer::Grid(self.tim_layer(
            "tim",
            self.cores.x * corex,
            self.cores.y * corey,
        )));
        for index in 0..self.cores.depth() {
            stack.add_layer(Rc::new(Layer::Grid(self.core_layer(corex, corey, index)?)));
            stack.add_layer(tim.clone());
        }
        Ok(stack)
    }
}

/// Builds the stacks for one invocation, running all mode-specific validation
/// before any layer geometry is assembled. The returned stacks are written in
/// order; `name` becomes the first stack's name.
pub fn build_stacks(config: &ChipConfig, name: &str) -> Result<Vec<ThermalStack>> {
    match config.mode {
        Mode::Ddr => {
            if config.banks.is_3d() {
                return Err(FloorplanError::BanksNot2d(config.banks));
            }
            let core = config.core_stack(name)?;
            let mut mem = ThermalStack::without_heatsink(format!("{name}_mem"));
            mem.add_layer(Rc::new(Layer::Grid(config.bank_layer(0))));
            Ok(vec![core, mem])
        }
        Mode::StackedMem => {
            if !config.banks.is_3d() {
                return Err(FloorplanError::BanksNot3d(config.banks));
            }
            let core = config.core_stack(name)?;
            let mut mem = ThermalStack::without_heatsink(format!("{name}_mem"));
            let tim = Rc::new(Layer::Grid(config.tim_layer(
                "tim_mem",
                config.banks.x * config.bank_size.0,
                config.banks.y * config.bank_size.1,
            )));
            for index in 0..config.banks.depth() {
                mem.add_layer(Rc::new(Layer::Grid(config.bank_layer(index))));
                mem.add_layer(tim.clone());
            }
            Ok(vec![core, mem])
        }
        Mode::Interposer => {
            if config.cores.depth() != 1 {
                return Err(FloorplanError::CoreDepthNotOne(config.cores.depth()));
            }
            if config.core_thickness != config.bank_thickness {
                return Err(FloorplanError::ThicknessMismatch {
                    core: config.core_thickness,
                    bank: config.bank_thickness,
                });
            }
            let (corex, corey) = config.resolve_core_size()?;

            let mut core_grid = GridLayer::new(
                GridKind::Core,
                "cores",
                config.cores.x,
                config.cores.y,
                corex,
                corey,
                config.core_thickness,
            );
            if let Some(template) = &config.subcore_template {
                core_grid = core_grid.with_template(template.clone())?;
            }
            let controller_grid = GridLayer::new(
                GridKind::MemoryController,
                "mem_controllers",
                config.banks.x,
                config.banks.y,
                config.bank_size.0,
                config.bank_size.1,
                config.core_thickness,
            );
            let core_mc = CoreMemControllerLayer::new(
                "cores_mc",
                core_grid,
                controller_grid,
                config.core_mem_distance,
                config.core_thickness,
            );
            let total_width = core_mc.total_width();
            let total_height = core_mc.total_height();
            let (controller_x, controller_y) = core_mc.controller_offset();

            let mut stack = ThermalStack::new(name);
            stack.add_layer(Rc::new(Layer::Grid(GridLayer::new(
                GridKind::Interposer,
                "interposer",
                1,
                1,
                total_width,
                total_height,
                config.interposer_thickness,
            ))));
            let tim = Rc::new(Layer::Grid(config.tim_layer(
                "tim",
                total_width,
                total_height,
            )));
            stack.add_layer(tim.clone());
            stack.add_layer(Rc::new(Layer::CoreAndMemController(core_mc)));
            for index in 0..config.banks.depth() {
                stack.add_layer(tim.clone());
                let bank_grid = config
                    .bank_layer(index)
                    .with_pos_offset(controller_x, controller_y);
                // Only the left gap is always positive; the other sides are
                // forced to keep the record set uniform across geometries.
                let padded = PaddedLayer::new(
                    bank_grid,
                    total_width,
                    total_height,
                    ForcedSides {
                        left: false,
                        right: true,
                        bottom: true,
                        top: true,
                    },
                )?;
                stack.add_layer(Rc::new(Layer::PaddedWithAir(padded)));
            }
            stack.add_layer(tim.clone());
            Ok(vec![stack])
        }
        Mode::Full3d => {
            let (corex, corey) = config.resolve_core_size()?;
            let core_width = config.cores.x * corex;
            let core_height = config.cores.y * corey;
            let bank_width = config.banks.x * config.bank_size.0;
            let bank_height = config.banks.y * config.bank_size.1;
            if core_width != bank_width || core_height != bank_height {
                return Err(FloorplanError::FootprintMismatch {
                    core_width,
                    core_height,
                    bank_width,
                    bank_height,
                });
            }

            let mut stack = ThermalStack::new(name);
            let tim = Rc::new(Layer::Grid(config.tim_layer("tim", core_width, core_height)));
            for index in 0..config.banks.depth() {
                stack.add_layer(Rc::new(Layer::Grid(config.bank_layer(index))));
                stack.add_layer(tim.clone());
            }
            for index in 0..config.cores.depth() {
                stack.add_layer(Rc::new(Layer::Grid(config.core_layer(
                    corex, corey, index,
                )?)));
                stack.add_layer(tim.clone());
            }
            Ok(vec![stack])
        }
    }
}

/// Builds and writes every output file for one invocation: the stacks' files
/// plus `commandline.txt` recording the literal argv.
///
/// All validation happens before the first file is written. An I/O error
/// mid-write can still leave the directory partially populated; callers that
/// need atomicity should write to a temporary directory and rename.
pub fn generate(config: &ChipConfig, out: &Path, argv: &[String]) -> Result<()> {
    let name = out
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| FloorplanError::InvalidOutputDirectory(out.display().to_string()))?;

    let stacks = build_stacks(config, &name)?;
    log::info!(
        "building {} floorplan '{}' ({} stacks)",
        config.mode,
        name,
        stacks.len()
    );
    for stack in &stacks {
        stack.write_files(out)?;
    }

    fs::write(
        out.join("commandline.txt"),
        format!("# command used to create these files:\n{}\n", argv.join(" ")),
    )?;
    Ok(())
}
