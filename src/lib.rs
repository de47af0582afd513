//! Discrete-time pricing simulator.
//!
//! A seller sets a price each period against a fixed competitor price.
//! Demand decays exponentially with the price differential, is scaled by
//! uniform noise and capped by the remaining stock. An episode ends when
//! the stock runs out or after [`EPISODE_HORIZON`] steps.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{SimError, SimResult};
pub use model::noise::{seed_global, FixedNoise, GlobalNoise, NoiseSource, RngNoise, SequenceNoise};
pub use simulation::config::SimulatorConfig;
pub use simulation::engine::{MarketSimulator, Observation, StepInfo, StepOutcome, EPISODE_HORIZON};
pub use simulation::episode::{run_episode, EpisodeSummary, StepRecord};
pub use strategy::traits::PricingPolicy;
