// SPDX-License-Identifier: Apache-2.0

/// Thermal constants of one layer material, as consumed by the layer
/// configuration file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Specific heat capacity in J/(m^3 K).
    pub specific_heat_capacity: f64,
    /// Thermal resistivity in (m K)/W.
    pub thermal_resistivity: f64,
}

/// Silicon: dies holding cores, memory banks, memory controllers, and the
/// interposer substrate.
pub const SILICON: Material = Material {
    specific_heat_capacity: 1.75e6,
    thermal_resistivity: 0.01,
};

/// Thermal interface material bonding adjacent dies.
pub const TIM: Material = Material {
    specific_heat_capacity: 4e6,
    thermal_resistivity: 0.25,
};

/// Air filling the unoccupied parts of a padded layer.
pub const AIR: Material = Material {
    specific_heat_capacity: 2_875_000.0,
    thermal_resistivity: 0.13,
};
