// src/simulation/config.rs

use crate::error::{SimError, SimResult};

/// Market parameters, fixed for the lifetime of a simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorConfig {
    /// Demand when our price equals the competitor's.
    pub base_demand: f64,
    /// Decay rate of demand per unit of price differential.
    pub elasticity: f64,
    pub competitor_price: f64,
    /// Inventory ceiling, restored on every reset.
    pub max_inventory: u32,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            base_demand: 120.0,
            elasticity: 0.08,
            competitor_price: 100.0,
            max_inventory: 500,
        }
    }
}

impl SimulatorConfig {
    pub fn new(
        base_demand: f64,
        elasticity: f64,
        competitor_price: f64,
        max_inventory: u32,
    ) -> Self {
        Self {
            base_demand,
            elasticity,
            competitor_price,
            max_inventory,
        }
    }

    /// Checks the construction preconditions.
    ///
    /// A zero inventory ceiling would make every episode end on reset, so it
    /// is rejected here rather than discovered during a rollout.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.base_demand.is_finite() && self.base_demand > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "base_demand must be positive and finite, got {}",
                self.base_demand
            )));
        }
        if !(self.elasticity.is_finite() && self.elasticity >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "elasticity must be non-negative and finite, got {}",
                self.elasticity
            )));
        }
        if !self.competitor_price.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "competitor_price must be finite, got {}",
                self.competitor_price
            )));
        }
        if self.max_inventory == 0 {
            return Err(SimError::InvalidConfig(
                "max_inventory must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
