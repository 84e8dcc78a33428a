// SPDX-License-Identifier: Apache-2.0

use itertools::iproduct;

use crate::material::{Material, SILICON, TIM};
use crate::{Floorplan, FloorplanComponent, FloorplanError, Length, Result};

/// The kind of element a grid layer is tiled with. Determines the element id
/// prefix and the layer's material contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKind {
    Core,
    MemoryBank,
    MemoryController,
    Tim,
    Interposer,
}

impl GridKind {
    /// Element ids are `<prefix>_<number>`.
    pub fn element_prefix(self) -> &'static str {
        match self {
            GridKind::Core => "C",
            GridKind::MemoryBank => "B",
            GridKind::MemoryController => "LC",
            GridKind::Tim => "TB",
            GridKind::Interposer => "I",
        }
    }

    pub fn material(self) -> &'static Material {
        match self {
            GridKind::Tim => &TIM,
            _ => &SILICON,
        }
    }

    /// TIM and the interposer never dissipate power.
    pub fn has_power_consumption(self) -> bool {
        matches!(
            self,
            GridKind::Core | GridKind::MemoryBank | GridKind::MemoryController
        )
    }
}

/// A layer containing one rectangular grid of identical elements.
///
/// Elements are numbered in row-major order starting at `nb_offset`, so that
/// element ids stay globally unique when a stack contains several grid layers
/// of the same kind. If a subcomponent template is attached, each cell emits
/// the template's rectangles shifted to the cell origin instead of a single
/// rectangle per cell.
#[derive(Debug, Clone)]
pub struct GridLayer {
    name: String,
    kind: GridKind,
    columns: usize,
    rows: usize,
    element_width: Length,
    element_height: Length,
    thickness: Length,
    nb_offset: usize,
    pos_offset: (Length, Length),
    template: Option<Floorplan>,
}

impl GridLayer {
    pub fn new(
        kind: GridKind,
        name: impl Into<String>,
        columns: usize,
        rows: usize,
        element_width: Length,
        element_height: Length,
        thickness: Length,
    ) -> GridLayer {
        GridLayer {
            name: name.into(),
            kind,
            columns,
            rows,
            element_width,
            element_height,
            thickness,
            nb_offset: 0,
            pos_offset: (Length::ZERO, Length::ZERO),
            template: None,
        }
    }

    /// Starts element numbering at `nb_offset` instead of zero.
    pub fn with_nb_offset(mut self, nb_offset: usize) -> GridLayer {
        self.nb_offset = nb_offset;
        self
    }

    /// Shifts the whole grid by the given offsets.
    pub fn with_pos_offset(mut self, x: Length, y: Length) -> GridLayer {
        self.pos_offset = (x, y);
        self
    }

    /// Attaches a subcomponent template to be replicated into every cell.
    ///
    /// The template's bounding origin must be exactly `(0, 0)` and its
    /// bounding size must equal the element size; anything else would
    /// silently mis-register coordinates and is rejected here.
    pub fn with_template(mut self, template: Floorplan) -> Result<GridLayer> {
        if template.left() != Length::ZERO || template.bottom() != Length::ZERO {
            return Err(FloorplanError::TemplateNotAnchored {
                left: template.left(),
                bottom: template.bottom(),
            });
        }
        if template.width() != self.element_width || template.height() != self.element_height {
            return Err(FloorplanError::TemplateSizeMismatch {
                template_width: template.width(),
                template_height: template.height(),
                element_width: self.element_width,
                element_height: self.element_height,
            });
        }
        self.template = Some(template);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> GridKind {
        self.kind
    }

    pub fn element_width(&self) -> Length {
        self.element_width
    }

    pub fn element_height(&self) -> Length {
        self.element_height
    }

    pub fn pos_offset(&self) -> (Length, Length) {
        self.pos_offset
    }

    pub fn total_width(&self) -> Length {
        self.columns * self.element_width
    }

    pub fn total_height(&self) -> Length {
        self.rows * self.element_height
    }

    pub fn thickness(&self) -> Length {
        self.thickness
    }

    /// Lays out the grid. One rectangle per cell, or the template's
    /// rectangles shifted to each cell origin when a template is attached.
    pub fn components(&self) -> Vec<FloorplanComponent> {
        let mut components = Vec::new();
        for (y, x) in iproduct!(0..self.rows, 0..self.columns) {
            let element_nb = self.nb_offset + y * self.columns + x;
            let element_id = format!("{}_{}", self.kind.element_prefix(), element_nb);
            let left = x * self.element_width + self.pos_offset.0;
            let bottom = y * self.element_height + self.pos_offset.1;
            match &self.template {
                None => {
                    components.push(FloorplanComponent::new(
                        element_id,
                        self.element_width,
                        self.element_height,
                        left,
                        bottom,
                    ));
                }
                Some(template) => {
                    for subcomponent in template.components() {
                        components.push(FloorplanComponent::new(
                            format!("{}_{}", element_id, subcomponent.name),
                            subcomponent.width,
                            subcomponent.height,
                            left + subcomponent.left,
                            bottom + subcomponent.bottom,
                        ));
                    }
                }
            }
        }
        components
    }
}
