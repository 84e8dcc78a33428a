// SPDX-License-Identifier: Apache-2.0

use crate::layer::grid::GridLayer;
use crate::{FloorplanComponent, Length};

/// A core grid and a memory-controller grid placed side by side on one die,
/// used in 2.5D packaging.
///
/// The two sub-grids are separated horizontally by `core_mem_distance` and
/// vertically centered on whichever sub-grid is taller. The thermal solver
/// requires every layer to be one filled rectangle, so the layer also emits
/// synthetic air rectangles: one filling the horizontal gap across the full
/// height of the taller sub-grid, and one below plus one above the shorter
/// sub-grid, splitting the height difference evenly.
#[derive(Debug, Clone)]
pub struct CoreMemControllerLayer {
    name: String,
    cores: GridLayer,
    controllers: GridLayer,
    core_mem_distance: Length,
    thickness: Length,
}

impl CoreMemControllerLayer {
    pub fn new(
        name: impl Into<String>,
        cores: GridLayer,
        controllers: GridLayer,
        core_mem_distance: Length,
        thickness: Length,
    ) -> CoreMemControllerLayer {
        let core_height = cores.total_height();
        let controller_height = controllers.total_height();
        let controller_left = cores.total_width() + core_mem_distance;

        // Center the shorter sub-grid on the taller one.
        let (cores, controllers) = if core_height >= controller_height {
            let offset = (core_height - controller_height) * 0.5;
            (
                cores.with_pos_offset(Length::ZERO, Length::ZERO),
                controllers.with_pos_offset(controller_left, offset),
            )
        } else {
            let offset = (controller_height - core_height) * 0.5;
            (
                cores.with_pos_offset(Length::ZERO, offset),
                controllers.with_pos_offset(controller_left, Length::ZERO),
            )
        };

        CoreMemControllerLayer {
            name: name.into(),
            cores,
            controllers,
            core_mem_distance,
            thickness,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_width(&self) -> Length {
        self.cores.total_width() + self.core_mem_distance + self.controllers.total_width()
    }

    pub fn total_height(&self) -> Length {
        self.cores.total_height().max(self.controllers.total_height())
    }

    pub fn thickness(&self) -> Length {
        self.thickness
    }

    /// Position of the memory-controller grid within the layer. Bank layers
    /// stacked above the controllers are placed at the same offset.
    pub fn controller_offset(&self) -> (Length, Length) {
        self.controllers.pos_offset()
    }

    pub fn components(&self) -> Vec<FloorplanComponent> {
        let total_height = self.total_height();
        let mut components = self.cores.components();
        components.extend(self.controllers.components());

        if self.core_mem_distance > Length::ZERO {
            components.push(FloorplanComponent::new(
                "air_gap",
                self.core_mem_distance,
                total_height,
                self.cores.total_width(),
                Length::ZERO,
            ));
        }

        let shorter = if self.cores.total_height() >= self.controllers.total_height() {
            &self.controllers
        } else {
            &self.cores
        };
        let (shorter_left, shorter_bottom) = shorter.pos_offset();
        let below = shorter_bottom;
        let above = total_height - shorter.total_height() - shorter_bottom;
        if below > Length::ZERO {
            components.push(FloorplanComponent::new(
                "air_bottom",
                shorter.total_width(),
                below,
                shorter_left,
                Length::ZERO,
            ));
        }
        if above > Length::ZERO {
            components.push(FloorplanComponent::new(
                "air_top",
                shorter.total_width(),
                above,
                shorter_left,
                shorter_bottom + shorter.total_height(),
            ));
        }

        components
    }
}
