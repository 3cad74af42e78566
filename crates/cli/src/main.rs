//! Command Line Interface for the bonding-curve AMM.
mod scenario;

use anyhow::{Result, bail};
use bancor_engine::prelude::*;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use rust_decimal::Decimal;
use scenario::Scenario;
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bancor-cli")]
#[command(about = "Bonding-curve AMM quoting and scenario replay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a trade on a curve without any ledger state
    Quote {
        /// Price at zero supply
        #[arg(long, default_value = "0")]
        init_price: Decimal,

        /// Price at max supply
        #[arg(long)]
        max_price: Decimal,

        /// Stock the curve can issue
        #[arg(long)]
        max_supply: u128,

        /// Current curve position
        #[arg(long, default_value_t = 0)]
        supply: u128,

        /// Stock to buy or sell
        #[arg(short, long)]
        amount: u128,

        /// Sell instead of buy
        #[arg(long, default_value_t = false)]
        sell: bool,
    },
    /// Replay a JSON scenario against an in-memory ledger
    Replay {
        /// Scenario file (falls back to BANCOR_SCENARIO)
        #[arg(short, long)]
        scenario: Option<PathBuf>,
    },
}

fn quote(
    init_price: Decimal,
    max_price: Decimal,
    max_supply: u128,
    supply: u128,
    amount: u128,
    sell: bool,
) -> Result<()> {
    let curve = BondingCurve::new(init_price, max_price, max_supply)?;
    let magnitude = i128::try_from(amount)?;
    let delta = if sell { -magnitude } else { magnitude };
    let next = curve.target(supply, delta)?;

    println!("\n📈 Bonding Curve Quote");
    println!("════════════════════════════════════");
    println!("Side:            {}", if sell { "sell" } else { "buy" });
    println!("Amount:          {amount}");
    println!("Position:        {supply} -> {next} of {max_supply}");
    println!("Price before:    {}", curve.price_at(supply)?);
    println!("Price after:     {}", curve.price_at(next)?);
    println!("Exact cost:      {}", curve.cost(supply, delta)?.abs());
    println!("Settled money:   {}", curve.settle(supply, delta)?.unsigned_abs());
    println!("════════════════════════════════════");
    Ok(())
}

fn replay(path: PathBuf) -> Result<()> {
    println!("📂 Loading scenario {}...", path.display());
    let scenario = Scenario::load(&path)?;
    let mut report = scenario.replay(&Keeper::default())?;

    println!("\n🧾 Outcomes");
    println!("{:<8} | {:<14} | {}", "Height", "Instruction", "Result");
    println!("{}", "-".repeat(70));
    for outcome in &report.outcomes {
        let result = match &outcome.result {
            Ok(event) => serde_json::to_string(event)?,
            Err(err) => format!("rejected [{}] {err}", err.code()),
        };
        println!("{:<8} | {:<14} | {}", outcome.height, outcome.kind, result);
    }

    println!("\n🏦 Pools");
    println!(
        "{:<16} | {:<12} | {:<14} | {:<14} | {}",
        "Key", "Owner", "Stock issued", "Money held", "Spot price"
    );
    println!("{}", "-".repeat(80));
    for pool in &report.pools {
        println!(
            "{:<16} | {:<12} | {:<14} | {:<14} | {}",
            pool.key().to_string(),
            pool.owner.to_string(),
            pool.stock_in_pool,
            pool.money_in_pool,
            pool.spot_price()?
        );
    }
    println!("\n💰 Balances");
    println!("{:<24} | {:<10} | {}", "Account", "Denom", "Amount");
    println!("{}", "-".repeat(60));
    for account in report.accounts.clone() {
        for (denom, amount) in report.balances(&account)? {
            println!("{:<24} | {:<10} | {}", account.to_string(), denom, amount);
        }
    }
    println!(
        "\n✅ {} delivered, {} rejected",
        report.outcomes.len() - report.rejected(),
        report.rejected()
    );
    Ok(())
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Quote {
            init_price,
            max_price,
            max_supply,
            supply,
            amount,
            sell,
        } => quote(init_price, max_price, max_supply, supply, amount, sell),
        Commands::Replay { scenario } => {
            let path = match scenario {
                Some(path) => path,
                None => match env::var("BANCOR_SCENARIO") {
                    Ok(path) => PathBuf::from(path),
                    Err(_) => bail!("pass --scenario or set BANCOR_SCENARIO in .env or environment"),
                },
            };
            replay(path)
        }
    }
}
