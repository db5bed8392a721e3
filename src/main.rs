// 🖥️ CLI - load config, generate, write both CSV tables, print a summary

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fake_transactions::{
    generate_transactions, save_audit_trail, save_transactions, Configuration, RunSummary,
};

#[derive(Parser, Debug)]
#[command(name = "fake-transactions")]
#[command(about = "Generate fake transaction data with configurable irregularities")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Output CSV file for transactions
    #[arg(short, long, default_value = "fake_transactions.csv")]
    output: PathBuf,

    /// Output CSV file for the irregularity audit trail
    #[arg(short, long, default_value = "irregularities.csv")]
    irregularities: PathBuf,

    /// Random seed (overrides `seed` in the config file)
    #[arg(long)]
    seed: Option<u64>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fake_transactions=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Only a bad configuration makes the run fail
    let mut config = Configuration::from_file(&cli.config)?;
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    let dataset = generate_transactions(&config)?;

    match save_transactions(&cli.output, &dataset.transactions) {
        Ok(()) => println!(
            "{} fake transactions have been generated and saved to {:?}",
            dataset.transactions.len(),
            cli.output
        ),
        Err(e) => error!("{:#}", e),
    }
    match save_audit_trail(&cli.irregularities, &dataset.audit_trail) {
        Ok(()) => println!(
            "{} irregularities have been recorded in {:?}",
            dataset.audit_trail.len(),
            cli.irregularities
        ),
        Err(e) => error!("{:#}", e),
    }

    print_summary(&dataset.summary());
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("\nTransactions by type:");
    for (transaction_type, count) in &summary.by_transaction_type {
        println!("  {:<12} {}", transaction_type, count);
    }

    if summary.by_irregularity_type.is_empty() {
        println!("\nNo irregularities applied");
        return;
    }
    println!("\nIrregularities by type:");
    for (irregularity_type, count) in &summary.by_irregularity_type {
        println!("  {:<24} {}", irregularity_type, count);
    }
}
