// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use thermoplan::{ChipConfig, Floorplan, GridDim, Length, Mode};

/// Generate thermal floorplans and layer stacks for an external
/// finite-difference thermal solver.
#[derive(Parser, Debug)]
#[command(name = "thermoplan", version)]
struct Args {
    /// Memory packaging mode: DDR, 3Dmem, 2.5D, or 3D.
    #[arg(long, value_parser = parse_mode)]
    mode: Mode,

    /// Number of cores, e.g. 4x4 or 4x4x2.
    #[arg(long, value_parser = parse_dim)]
    cores: GridDim,

    /// Size of each core in dimension x, e.g. 4.31mm.
    #[arg(long, value_parser = parse_length)]
    corex: Option<Length>,

    /// Size of each core in dimension y, e.g. 2.08mm.
    #[arg(long, value_parser = parse_length)]
    corey: Option<Length>,

    /// Thickness of each core silicon layer.
    #[arg(long = "core_thickness", value_parser = parse_length, default_value = "50um")]
    core_thickness: Length,

    /// Floorplan file describing the internal structure of one core,
    /// replicated across the core grid.
    #[arg(long = "subcore-template")]
    subcore_template: Option<PathBuf>,

    /// Number of memory banks, e.g. 4x4 (DDR) or 4x4x2 (stacked).
    #[arg(long, value_parser = parse_dim)]
    banks: GridDim,

    /// Size of each memory bank in dimension x.
    #[arg(long, value_parser = parse_length)]
    bankx: Length,

    /// Size of each memory bank in dimension y.
    #[arg(long, value_parser = parse_length)]
    banky: Length,

    /// Thickness of each memory bank layer.
    #[arg(long = "bank_thickness", value_parser = parse_length, default_value = "50um")]
    bank_thickness: Length,

    /// Distance between the core grid and the memory controllers (2.5D only).
    #[arg(long = "core_mem_distance", value_parser = parse_length, default_value = "7mm")]
    core_mem_distance: Length,

    /// Thickness of each thermal interface material layer.
    #[arg(long = "tim_thickness", value_parser = parse_length, default_value = "20um")]
    tim_thickness: Length,

    /// Thickness of the interposer layer (2.5D only).
    #[arg(long = "interposer_thickness", value_parser = parse_length, default_value = "50um")]
    interposer_thickness: Length,

    /// Directory in which the floorplan is stored.
    #[arg(long)]
    out: PathBuf,
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse().map_err(|e: thermoplan::FloorplanError| e.to_string())
}

fn parse_dim(s: &str) -> Result<GridDim, String> {
    s.parse().map_err(|e: thermoplan::FloorplanError| e.to_string())
}

fn parse_length(s: &str) -> Result<Length, String> {
    s.parse().map_err(|e: thermoplan::FloorplanError| e.to_string())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let subcore_template = match &args.subcore_template {
        Some(path) => Some(Floorplan::from_file(path).with_context(|| {
            format!("cannot load subcore template {}", path.display())
        })?),
        None => None,
    };
    let core_size = match (args.corex, args.corey) {
        (Some(x), Some(y)) => Some((x, y)),
        _ => None,
    };

    let config = ChipConfig {
        mode: args.mode,
        cores: args.cores,
        core_size,
        core_thickness: args.core_thickness,
        subcore_template,
        banks: args.banks,
        bank_size: (args.bankx, args.banky),
        bank_thickness: args.bank_thickness,
        core_mem_distance: args.core_mem_distance,
        tim_thickness: args.tim_thickness,
        interposer_thickness: args.interposer_thickness,
    };

    let argv: Vec<String> = std::env::args().collect();
    thermoplan::generate(&config, &args.out, &argv)
        .with_context(|| format!("cannot create floorplan in {}", args.out.display()))?;
    Ok(())
}
