// src/strategy/traits.rs

use crate::simulation::engine::Observation;
use std::fmt::Debug;

/// A fixed pricing rule used to drive the simulator through an episode.
///
/// Policies only map observations to prices; they never learn from the
/// revenue they receive.
pub trait PricingPolicy: Debug + Send + Sync {
    /// Picks the price for the next step.
    ///
    /// # Arguments
    /// * `observation` - The simulator state before the step.
    fn choose_price(&mut self, observation: &Observation) -> f64;

    /// Called on episode start so stateful policies can rewind.
    fn reset(&mut self) {}
}
