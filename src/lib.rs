// SPDX-License-Identifier: Apache-2.0

//! Thermal floorplan generation for chip layer stacks.
//!
//! `thermoplan` lays out a chip's physical components (cores, memory banks,
//! memory controllers, thermal-interface material, interposer) into exact
//! rectangular coordinates and emits the floorplan (`.flp`), layer
//! configuration (`.lcf`) and solver configuration files consumed by an
//! external finite-difference thermal solver.
//!
//! All geometry is carried as [`Length`] values, an exact integer count of
//! micrometers, so that emitted coordinates are reproducible bit-for-bit
//! across runs.

mod error;
pub use error::{FloorplanError, Result};

mod length;
pub use length::Length;

mod dimension;
pub use dimension::GridDim;

mod material;
pub use material::{AIR, Material, SILICON, TIM};

mod floorplan;
pub use floorplan::{Floorplan, FloorplanComponent};

mod layer;
pub use layer::{
    CoreMemControllerLayer, ForcedSides, GridKind, GridLayer, Layer, PaddedLayer,
};

mod stack;
pub use stack::ThermalStack;

mod modes;
pub use modes::{ChipConfig, Mode, build_stacks, generate};

pub mod validate;
