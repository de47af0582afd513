use clap::{Parser, ValueEnum};
use market_sim::io::{prices, reporting};
use market_sim::strategy::implementations::{
    FixedPrice, InventoryPacing, RandomPrice, SchedulePrice,
};
use market_sim::{
    run_episode, seed_global, MarketSimulator, PricingPolicy, SimResult, SimulatorConfig,
    EPISODE_HORIZON,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyKind {
    /// Same price every step
    Fixed,
    /// Uniform random price within 20% of --price
    Random,
    /// Normally distributed prices around --price
    Normal,
    /// Linear markdown from 120% to 80% of --price
    Markdown,
    /// Adjust around --price to sell stock evenly over the episode
    Pacing,
}

/// Roll out one pricing episode and export the step log.
#[derive(Debug, Parser)]
#[command(name = "market-sim", version, about)]
struct Cli {
    /// Seed for the shared noise generator and any random policy
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = PolicyKind::Fixed)]
    policy: PolicyKind,

    /// Reference price used by the policy
    #[arg(long, default_value_t = 100.0)]
    price: f64,

    #[arg(long, default_value_t = 120.0)]
    base_demand: f64,

    #[arg(long, default_value_t = 0.08)]
    elasticity: f64,

    #[arg(long, default_value_t = 100.0)]
    competitor_price: f64,

    #[arg(long, default_value_t = 500)]
    max_inventory: u32,

    /// CSV file for the per-step log
    #[arg(long, default_value = "episode_results.csv")]
    output: PathBuf,
}

fn build_policy(
    cli: &Cli,
    config: &SimulatorConfig,
    seed: u64,
) -> SimResult<Box<dyn PricingPolicy>> {
    let horizon = EPISODE_HORIZON as usize;
    let policy: Box<dyn PricingPolicy> = match cli.policy {
        PolicyKind::Fixed => Box::new(FixedPrice::new(cli.price)),
        PolicyKind::Random => Box::new(RandomPrice::new(cli.price * 0.8, cli.price * 1.2, seed)?),
        PolicyKind::Normal => {
            let mut rng = StdRng::seed_from_u64(seed);
            let std_dev = cli.price.abs() * 0.05;
            let path = prices::generate_normal_prices(horizon, cli.price, std_dev, &mut rng)?;
            Box::new(SchedulePrice::new(path, cli.price))
        }
        PolicyKind::Markdown => {
            let path = prices::generate_markdown_prices(horizon, cli.price * 1.2, cli.price * 0.8);
            Box::new(SchedulePrice::new(path, cli.price))
        }
        PolicyKind::Pacing => Box::new(InventoryPacing::new(
            cli.price,
            cli.price * 0.05,
            config.max_inventory,
        )),
    };
    Ok(policy)
}

fn run(cli: Cli) -> SimResult<()> {
    // 1. SETUP CONFIGURATION
    let config = SimulatorConfig::new(
        cli.base_demand,
        cli.elasticity,
        cli.competitor_price,
        cli.max_inventory,
    );
    log::info!("Market configuration: {:?}", config);

    let seed = match cli.seed {
        Some(seed) => {
            seed_global(seed);
            seed
        }
        None => rand::random(),
    };

    // 2. CHOOSE THE PRICING RULE
    let mut policy = build_policy(&cli, &config, seed)?;
    log::info!("Pricing policy: {:?}", policy);

    // 3. RUN ONE EPISODE
    let mut sim = MarketSimulator::new(config)?;
    let summary = run_episode(&mut sim, policy.as_mut());

    // 4. EXPORT RESULTS
    reporting::write_episode_log(&cli.output, &summary.records)?;

    // 5. SUMMARY
    println!("=== Episode Summary ===");
    println!("Steps: {}", summary.steps());
    println!("Units sold: {}", summary.total_units_sold());
    println!("Remaining inventory: {}", summary.final_inventory());
    println!("Sell-through: {:.1}%", summary.sell_through() * 100.0);
    println!("Total revenue: ${:.2}", summary.total_revenue());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
