// Copyright © Swapsight
// SPDX-License-Identifier: Apache-2.0

//! # Swapsight ERC-20 Swap Indexer
//!
//! Ingests Base mainnet blocks, records every ERC-20 transfer, and infers
//! swaps from raw transfer logs without DEX-specific ABIs.

use anyhow::Result;
use clap::Parser;
use swapsight_indexer::config::{IndexerConfig, ServerArgs};
use swapsight_indexer::processors::swap_indexer::SwapIndexer;
use tracing_subscriber::EnvFilter;

/// Configure jemalloc as the global allocator for better memory management
#[cfg(unix)]
#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

/// Main application entry point
///
/// Initializes the async runtime with optimized settings for blockchain data
/// processing and starts the indexer with the provided configuration.
fn main() -> Result<()> {
    // Use at least 16 threads for concurrent database operations and network I/O
    let num_cpus = num_cpus::get();
    let worker_threads = num_cpus.max(16);

    // Build Tokio runtime optimized for high-throughput processing
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder
        .disable_lifo_slot() // Improves fairness in task scheduling
        .enable_all() // Enable all I/O and timer drivers
        .worker_threads(worker_threads)
        .build()
        .expect("Failed to build async runtime")
        .block_on(async {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .init();

            let args = ServerArgs::parse();
            let config = IndexerConfig::load(&args.config_path)?;
            let indexer = SwapIndexer::new(config).await?;
            indexer.run_processor().await
        })
}
