use market_sim::io::{prices, reporting};
use market_sim::strategy::implementations::{
    FixedPrice, InventoryPacing, RandomPrice, SchedulePrice,
};
use market_sim::{
    run_episode, seed_global, GlobalNoise, MarketSimulator, NoiseSource, PricingPolicy,
    SimulatorConfig, StepOutcome, EPISODE_HORIZON,
};

fn trajectory<N: NoiseSource>(sim: &mut MarketSimulator<N>, prices: &[f64]) -> Vec<StepOutcome> {
    sim.reset();
    prices.iter().map(|&p| sim.step(p)).collect()
}

#[test]
fn same_seed_gives_same_trajectory() {
    let path = prices::generate_markdown_prices(EPISODE_HORIZON as usize, 130.0, 90.0);

    let mut a = MarketSimulator::with_seed(SimulatorConfig::default(), 99).unwrap();
    let mut b = MarketSimulator::with_seed(SimulatorConfig::default(), 99).unwrap();

    assert_eq!(trajectory(&mut a, &path), trajectory(&mut b, &path));
}

#[test]
fn seeding_the_shared_generator_reproduces_episodes() {
    // The only test in this binary that touches the process-wide generator.
    let path = vec![105.0; 20];

    seed_global(1234);
    let mut first: MarketSimulator<GlobalNoise> =
        MarketSimulator::new(SimulatorConfig::default()).unwrap();
    let a = trajectory(&mut first, &path);

    seed_global(1234);
    let mut second: MarketSimulator = MarketSimulator::default();
    let b = trajectory(&mut second, &path);

    assert_eq!(a, b);
}

#[test]
fn every_policy_finishes_within_horizon() {
    let config = SimulatorConfig::default();
    let mut policies: Vec<Box<dyn PricingPolicy>> = vec![
        Box::new(FixedPrice::new(100.0)),
        Box::new(FixedPrice::new(1_000.0)),
        Box::new(RandomPrice::new(-50.0, 250.0, 3).unwrap()),
        Box::new(SchedulePrice::new(
            prices::generate_markdown_prices(EPISODE_HORIZON as usize, 150.0, 60.0),
            100.0,
        )),
        Box::new(InventoryPacing::for_config(&config, 5.0)),
    ];

    for seed in 0..20 {
        let mut sim = MarketSimulator::with_seed(config, seed).unwrap();
        for policy in policies.iter_mut() {
            let summary = run_episode(&mut sim, policy.as_mut());

            assert!(summary.steps() >= 1);
            assert!(summary.steps() <= EPISODE_HORIZON as usize);
            assert!(summary.total_units_sold() <= u64::from(config.max_inventory));
            assert!(summary.records.last().map(|r| r.done).unwrap_or(false));

            let mut inventory = config.max_inventory;
            for record in &summary.records {
                assert!(record.inventory <= inventory);
                assert_eq!(record.inventory, inventory - record.units_sold);
                assert_eq!(record.revenue, f64::from(record.units_sold) * record.price);
                inventory = record.inventory;
            }
        }
    }
}

#[test]
fn noisy_demand_stays_within_band() {
    // At the competitor price expected demand is exactly base_demand, so the
    // realised demand must fall in [0.8, 1.2) * 120 after truncation.
    let config = SimulatorConfig {
        max_inventory: 1_000_000,
        ..SimulatorConfig::default()
    };
    let mut sim = MarketSimulator::with_seed(config, 17).unwrap();
    for _ in 0..EPISODE_HORIZON {
        let outcome = sim.step(100.0);
        assert!((96..144).contains(&outcome.info.demand), "demand {}", outcome.info.demand);
    }
}

#[test]
fn episode_log_exports_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("episode.csv");

    let mut sim = MarketSimulator::with_seed(SimulatorConfig::default(), 5).unwrap();
    let mut policy = FixedPrice::new(110.0);
    let summary = run_episode(&mut sim, &mut policy);

    reporting::write_episode_log(&path, &summary.records).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.get(0), Some("time_step"));
    assert_eq!(reader.records().count(), summary.steps());
}
