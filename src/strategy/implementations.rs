// src/strategy/implementations.rs

use crate::error::{SimError, SimResult};
use crate::simulation::config::SimulatorConfig;
use crate::simulation::engine::{Observation, EPISODE_HORIZON};
use crate::strategy::traits::PricingPolicy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// =========================================================================
// 1. Fixed Price
// =========================================================================

/// Charges the same price every step.
#[derive(Debug, Clone)]
pub struct FixedPrice {
    price: f64,
}

impl FixedPrice {
    pub fn new(price: f64) -> Self {
        Self { price }
    }

    /// Matches the competitor exactly.
    pub fn match_competitor(config: &SimulatorConfig) -> Self {
        Self::new(config.competitor_price)
    }
}

impl PricingPolicy for FixedPrice {
    fn choose_price(&mut self, _observation: &Observation) -> f64 {
        self.price
    }
}

// =========================================================================
// 2. Random Price
// =========================================================================

/// Picks a uniformly random price within a range each step.
/// Useful for exploring how the market responds across a price band.
#[derive(Debug, Clone)]
pub struct RandomPrice {
    min: f64,
    max: f64,
    rng: StdRng,
}

impl RandomPrice {
    /// Bounds are swapped if given in the wrong order. Both bounds and
    /// the width of the band must be finite.
    pub fn new(min: f64, max: f64, seed: u64) -> SimResult<Self> {
        if !(min.is_finite() && max.is_finite() && (max - min).is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "random price band must be finite, got [{}, {}]",
                min, max
            )));
        }
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Ok(Self {
            min,
            max,
            rng: StdRng::seed_from_u64(seed),
        })
    }
}

impl PricingPolicy for RandomPrice {
    fn choose_price(&mut self, _observation: &Observation) -> f64 {
        self.rng.gen_range(self.min..=self.max)
    }
}

// =========================================================================
// 3. Scheduled Price
// =========================================================================

/// Walks a precomputed price path, one entry per step.
/// Holds the last price once the path runs out.
#[derive(Debug, Clone)]
pub struct SchedulePrice {
    prices: Vec<f64>,
    fallback: f64,
    cursor: usize,
}

impl SchedulePrice {
    /// `fallback` is charged only if `prices` is empty.
    pub fn new(prices: Vec<f64>, fallback: f64) -> Self {
        Self {
            prices,
            fallback,
            cursor: 0,
        }
    }
}

impl PricingPolicy for SchedulePrice {
    fn choose_price(&mut self, _observation: &Observation) -> f64 {
        let price = self
            .prices
            .get(self.cursor)
            .or_else(|| self.prices.last())
            .copied()
            .unwrap_or(self.fallback);
        self.cursor += 1;
        price
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}

// =========================================================================
// 4. Inventory Pacing
// =========================================================================

/// Tries to sell the stock evenly over the episode.
///
/// The target is a straight line from full inventory at step 0 to empty at
/// the horizon. Holding more than the target means sales are lagging, so
/// the price is cut by `adjustment`; holding less means stock is going too
/// fast, so the price is raised by `adjustment`.
#[derive(Debug, Clone)]
pub struct InventoryPacing {
    base_price: f64,
    adjustment: f64,
    max_inventory: u32,
}

impl InventoryPacing {
    pub fn new(base_price: f64, adjustment: f64, max_inventory: u32) -> Self {
        Self {
            base_price,
            adjustment: adjustment.abs(),
            max_inventory,
        }
    }

    /// Starts from the competitor price with the ceiling taken from `config`.
    pub fn for_config(config: &SimulatorConfig, adjustment: f64) -> Self {
        Self::new(config.competitor_price, adjustment, config.max_inventory)
    }

    fn target_inventory(&self, time_step: u32) -> f64 {
        let remaining = EPISODE_HORIZON.saturating_sub(time_step);
        f64::from(self.max_inventory) * f64::from(remaining) / f64::from(EPISODE_HORIZON)
    }
}

impl PricingPolicy for InventoryPacing {
    fn choose_price(&mut self, observation: &Observation) -> f64 {
        let target = self.target_inventory(observation.time_step);
        let held = f64::from(observation.inventory);

        if held > target {
            self.base_price - self.adjustment
        } else if held < target {
            self.base_price + self.adjustment
        } else {
            self.base_price
        }
    }
}
