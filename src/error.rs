// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use thiserror::Error;

use crate::{GridDim, Length};

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FloorplanError>;

/// Errors produced while parsing inputs or assembling a floorplan.
///
/// Every variant is fatal: the generator never recovers locally, because a
/// silently-tolerated geometric inconsistency would produce a floorplan the
/// external thermal solver either rejects outright or solves incorrectly.
#[derive(Debug, Error)]
pub enum FloorplanError {
    #[error("{0} is not a valid length. Valid examples are: 0.001m, 1mm, 980um")]
    InvalidLength(String),

    #[error("{unit} is not a valid unit of length. Valid units are: m, dm, cm, mm, um")]
    InvalidLengthUnit { unit: String },

    #[error("{0} is not a valid dimension. Valid examples are: 4x4, 8x8x2")]
    InvalidDimension(String),

    #[error("{0} is not a valid mode. Valid modes are: DDR, 3Dmem, 2.5D, 3D")]
    InvalidMode(String),

    #[error("invalid floorplan file {path}: parsing error on line {line}")]
    FloorplanParse { path: PathBuf, line: usize },

    #[error("floorplan file {path} contains no components")]
    EmptyFloorplan { path: PathBuf },

    #[error("subcore template must be positioned bottom left, found origin at ({left}, {bottom})")]
    TemplateNotAnchored { left: Length, bottom: Length },

    #[error(
        "subcore template size {template_width} x {template_height} does not match \
         element size {element_width} x {element_height}"
    )]
    TemplateSizeMismatch {
        template_width: Length,
        template_height: Length,
        element_width: Length,
        element_height: Length,
    },

    #[error("--corex and --corey are required when no subcore template is given")]
    MissingCoreSize,

    #[error("DDR mode requires a 2-D bank grid (e.g. 4x4), got {0}")]
    BanksNot2d(GridDim),

    #[error("3Dmem mode requires a 3-D bank grid (e.g. 4x4x2), got {0}")]
    BanksNot3d(GridDim),

    #[error("2.5D mode requires exactly one core layer, got {0}")]
    CoreDepthNotOne(usize),

    #[error("2.5D mode requires core thickness ({core}) to equal bank thickness ({bank})")]
    ThicknessMismatch { core: Length, bank: Length },

    #[error(
        "core footprint {core_width} x {core_height} does not match \
         bank footprint {bank_width} x {bank_height}"
    )]
    FootprintMismatch {
        core_width: Length,
        core_height: Length,
        bank_width: Length,
        bank_height: Length,
    },

    #[error("content of padded layer '{layer}' does not fit within the padding target")]
    PaddingOverflow { layer: String },

    #[error("layer '{layer}': {detail}")]
    Coverage { layer: String, detail: String },

    #[error("output directory {0} must have a valid name")]
    InvalidOutputDirectory(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
