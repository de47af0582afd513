// src/simulation/episode.rs

use crate::model::noise::NoiseSource;
use crate::simulation::engine::MarketSimulator;
use crate::strategy::traits::PricingPolicy;
use serde::Serialize;

/// One row of an episode log. Serializable so it can go straight to CSV.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub time_step: u32,
    pub price: f64,
    pub demand: u64,
    pub units_sold: u32,
    pub revenue: f64,
    pub inventory: u32,
    pub done: bool,
}

/// Everything recorded during one episode.
#[derive(Debug, Clone)]
pub struct EpisodeSummary {
    pub records: Vec<StepRecord>,
    /// Inventory at the start of the episode.
    pub starting_inventory: u32,
}

impl EpisodeSummary {
    pub fn steps(&self) -> usize {
        self.records.len()
    }

    pub fn total_revenue(&self) -> f64 {
        self.records.iter().map(|record| record.revenue).sum()
    }

    pub fn total_units_sold(&self) -> u64 {
        self.records
            .iter()
            .map(|record| u64::from(record.units_sold))
            .sum()
    }

    /// Share of the starting stock that was sold.
    pub fn sell_through(&self) -> f64 {
        if self.starting_inventory == 0 {
            return 0.0;
        }
        self.total_units_sold() as f64 / f64::from(self.starting_inventory)
    }

    pub fn final_inventory(&self) -> u32 {
        self.records
            .last()
            .map(|record| record.inventory)
            .unwrap_or(self.starting_inventory)
    }
}

/// Resets the simulator and steps it with `policy` until the episode ends.
pub fn run_episode<N: NoiseSource>(
    sim: &mut MarketSimulator<N>,
    policy: &mut dyn PricingPolicy,
) -> EpisodeSummary {
    policy.reset();
    let mut observation = sim.reset();
    let mut summary = EpisodeSummary {
        records: Vec::new(),
        starting_inventory: observation.inventory,
    };

    loop {
        let price = policy.choose_price(&observation);
        let outcome = sim.step(price);
        observation = outcome.observation;

        summary.records.push(StepRecord {
            time_step: observation.time_step,
            price,
            demand: outcome.info.demand,
            units_sold: outcome.info.units_sold,
            revenue: outcome.revenue,
            inventory: observation.inventory,
            done: outcome.done,
        });

        if observation.time_step % 10 == 0 {
            log::debug!(
                "Step {}: inventory {}, revenue so far ${:.2}",
                observation.time_step,
                observation.inventory,
                summary.total_revenue()
            );
        }

        if outcome.done {
            break;
        }
    }

    log::info!(
        "Episode finished after {} steps: sold {} units for ${:.2}",
        summary.steps(),
        summary.total_units_sold(),
        summary.total_revenue()
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::noise::FixedNoise;
    use crate::simulation::config::SimulatorConfig;
    use crate::simulation::engine::EPISODE_HORIZON;
    use crate::strategy::implementations::{FixedPrice, SchedulePrice};

    #[test]
    fn test_sells_out_at_competitor_price() {
        // 120 units per step against 500 in stock: 120, 120, 120, 120, 20.
        let mut sim =
            MarketSimulator::with_noise(SimulatorConfig::default(), FixedNoise(1.0)).unwrap();
        let mut policy = FixedPrice::new(100.0);
        let summary = run_episode(&mut sim, &mut policy);

        assert_eq!(summary.steps(), 5);
        assert_eq!(summary.total_units_sold(), 500);
        assert_eq!(summary.total_revenue(), 50_000.0);
        assert_eq!(summary.final_inventory(), 0);
        assert_eq!(summary.sell_through(), 1.0);
        assert_eq!(summary.records[4].units_sold, 20);
        assert!(summary.records[4].done);
        assert!(summary.records[..4].iter().all(|r| !r.done));
    }

    #[test]
    fn test_stops_at_horizon_when_priced_out() {
        let mut sim =
            MarketSimulator::with_noise(SimulatorConfig::default(), FixedNoise(1.0)).unwrap();
        let mut policy = FixedPrice::new(5_000.0);
        let summary = run_episode(&mut sim, &mut policy);

        assert_eq!(summary.steps(), EPISODE_HORIZON as usize);
        assert_eq!(summary.total_units_sold(), 0);
        assert_eq!(summary.final_inventory(), 500);
        assert_eq!(summary.sell_through(), 0.0);
    }

    #[test]
    fn test_rerun_resets_policy_and_simulator() {
        let mut sim =
            MarketSimulator::with_noise(SimulatorConfig::default(), FixedNoise(1.0)).unwrap();
        let mut policy = SchedulePrice::new(vec![110.0, 105.0, 100.0], 100.0);

        let first = run_episode(&mut sim, &mut policy);
        let second = run_episode(&mut sim, &mut policy);

        assert_eq!(first.steps(), second.steps());
        assert_eq!(first.total_revenue(), second.total_revenue());
        assert_eq!(second.records[0].price, 110.0);
        assert_eq!(second.records[0].time_step, 1);
    }
}
