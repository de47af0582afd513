// src/simulation/engine.rs

use crate::error::SimResult;
use crate::model::noise::{GlobalNoise, NoiseSource, RngNoise};
use crate::simulation::config::SimulatorConfig;
use rand::rngs::StdRng;

/// Hard episode length: an episode ends after this many steps even if
/// inventory remains.
pub const EPISODE_HORIZON: u32 = 50;

/// Snapshot of the simulator returned by `reset` and `step`.
///
/// This is a copy; changing it has no effect on the simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub inventory: u32,
    pub time_step: u32,
    pub competitor_price: f64,
}

/// Diagnostics for a single step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInfo {
    /// Realised demand after noise, before the inventory cap.
    pub demand: u64,
    pub units_sold: u32,
    pub revenue: f64,
}

/// Everything a call to `step` reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub observation: Observation,
    pub revenue: f64,
    pub done: bool,
    pub info: StepInfo,
}

/// A seller facing price-elastic, noisy demand against a fixed competitor
/// price with a finite stock of units.
///
/// Every constructor leaves the simulator reset (full inventory, step 0),
/// so it can be stepped immediately.
///
/// The simulator is meant for a single owner stepping one episode at a
/// time; `step` takes `&mut self`. Independent instances can run on
/// separate threads, but simulators sharing [`GlobalNoise`] interleave
/// their draws.
#[derive(Debug, Clone)]
pub struct MarketSimulator<N: NoiseSource = GlobalNoise> {
    config: SimulatorConfig,
    noise: N,
    inventory: u32,
    time_step: u32,
}

impl MarketSimulator<GlobalNoise> {
    /// Simulator drawing noise from the process-wide generator.
    pub fn new(config: SimulatorConfig) -> SimResult<Self> {
        Self::with_noise(config, GlobalNoise)
    }
}

impl Default for MarketSimulator<GlobalNoise> {
    fn default() -> Self {
        let config = SimulatorConfig::default();
        Self {
            config,
            noise: GlobalNoise,
            inventory: config.max_inventory,
            time_step: 0,
        }
    }
}

impl MarketSimulator<RngNoise<StdRng>> {
    /// Simulator with its own seeded generator.
    pub fn with_seed(config: SimulatorConfig, seed: u64) -> SimResult<Self> {
        Self::with_noise(config, RngNoise::seeded(seed))
    }
}

impl<N: NoiseSource> MarketSimulator<N> {
    /// Simulator drawing noise from `noise`.
    ///
    /// Fails if the configuration does not pass [`SimulatorConfig::validate`].
    pub fn with_noise(config: SimulatorConfig, noise: N) -> SimResult<Self> {
        config.validate()?;
        let mut sim = Self {
            config,
            noise,
            inventory: 0,
            time_step: 0,
        };
        sim.reset();
        Ok(sim)
    }

    /// Starts a new episode.
    pub fn reset(&mut self) -> Observation {
        self.inventory = self.config.max_inventory;
        self.time_step = 0;
        self.observation()
    }

    /// Demand before noise and truncation.
    ///
    /// Strictly decreasing in `price` for positive elasticity, and exactly
    /// `base_demand` at the competitor's price.
    pub fn expected_demand(&self, price: f64) -> f64 {
        let differential = price - self.config.competitor_price;
        self.config.base_demand * (-self.config.elasticity * differential).exp()
    }

    /// Sells at `price` for one period.
    ///
    /// Any price is accepted, including negative ones (negative revenue).
    /// Consumes exactly one noise draw. Stepping after `done` is allowed:
    /// nothing more sells once inventory is gone.
    pub fn step(&mut self, price: f64) -> StepOutcome {
        let expected_demand = self.expected_demand(price);
        let noise = self.noise.draw();

        // Truncates toward zero. Both factors are non-negative, so demand
        // cannot go negative; NaN maps to 0 and overflow saturates.
        let demand = (expected_demand * noise) as u64;

        // Capped by inventory, so it fits back into u32.
        let units_sold = demand.min(u64::from(self.inventory)) as u32;
        let revenue = f64::from(units_sold) * price;

        self.inventory -= units_sold;
        self.time_step = self.time_step.saturating_add(1);

        let done = self.is_done();

        log::trace!(
            "step {}: price={:.2} demand={} sold={} revenue={:.2} inventory={}",
            self.time_step,
            price,
            demand,
            units_sold,
            revenue,
            self.inventory
        );

        StepOutcome {
            observation: self.observation(),
            revenue,
            done,
            info: StepInfo {
                demand,
                units_sold,
                revenue,
            },
        }
    }

    pub fn observation(&self) -> Observation {
        Observation {
            inventory: self.inventory,
            time_step: self.time_step,
            competitor_price: self.config.competitor_price,
        }
    }

    /// Whether the current episode has ended (sold out or horizon reached).
    pub fn is_done(&self) -> bool {
        self.inventory == 0 || self.time_step >= EPISODE_HORIZON
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }
}
