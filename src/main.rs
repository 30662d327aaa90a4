// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line entry point for balancescan.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use balancescan::{
    report, AddressSet, BalanceScanner, NodeConfig, RpcChainClient, ScanConfig, ShutdownSignal,
};

/// Concurrent Ethereum wallet balance checker.
#[derive(Debug, Parser)]
#[command(name = "balancescan", version, about)]
struct Cli {
    /// Input file with one Ethereum address per line
    #[arg(short, long, default_value = "wallets.txt")]
    input: PathBuf,

    /// Output JSON file for results
    #[arg(short, long, default_value = "balances.json")]
    output: PathBuf,

    /// Ethereum node URL (e.g. an Infura endpoint)
    #[arg(short, long, env = "ETH_NODE_URL")]
    node: String,

    /// Number of concurrent workers
    #[arg(long, default_value_t = 10)]
    workers: usize,

    /// Attempts per address, including the first
    #[arg(long, default_value_t = 4)]
    attempts: u32,

    /// Fractional digits in displayed balances
    #[arg(long, default_value_t = 4)]
    decimals: u8,

    /// Sort output by balance, largest first, errors last
    #[arg(long)]
    sort: bool,

    /// Do not save results to file
    #[arg(long)]
    no_save: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "balancescan=debug,info"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let started = Instant::now();

    let addresses = AddressSet::load_from_file(&cli.input)?;

    let config = ScanConfig::default()
        .with_workers(cli.workers)
        .with_max_attempts(cli.attempts)
        .with_display_decimals(cli.decimals);
    let node = NodeConfig::for_scan(&cli.node, &config);
    let client = RpcChainClient::connect(&node)?;
    let scanner = BalanceScanner::new(Arc::new(client), config)?;

    let (handle, shutdown) = ShutdownSignal::new();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling outstanding queries");
            handle.shutdown();
        }
    });

    let mapping = scanner.run(&addresses, &shutdown).await?;
    let mapping = if cli.sort {
        mapping.sorted_by_balance()
    } else {
        mapping
    };

    println!(
        "{}",
        mapping.to_json_pretty().context("failed to render results")?
    );
    if !cli.no_save {
        report::save_report(&mapping, &cli.output)?;
    }

    info!(
        elapsed_secs = format!("{:.2}", started.elapsed().as_secs_f64()),
        "Completed"
    );
    Ok(())
}
