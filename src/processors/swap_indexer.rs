use crate::{
    config::IndexerConfig,
    processors::block_processor::BlockProcessor,
    rpc::RpcClient,
    utils::{
        chain_id::check_chain_id,
        database::{new_db_pool, run_migrations, ArcDbPool},
        starting_block::get_starting_block,
        token_cache::TokenMetadataCache,
    },
};
use anyhow::{Context, Result};
use std::sync::{mpsc, Arc};
use std::time::Duration;
use tracing::{error, info, warn};

/// Assembles the indexing service and drives the block loop.
///
/// Blocks are processed one at a time in ascending order; a failing block is
/// logged and skipped, never aborting the run. When caught up with the chain
/// head the loop polls for new blocks at the configured interval.
pub struct SwapIndexer {
    pub config: IndexerConfig,
    pub db_pool: ArcDbPool,
}

impl SwapIndexer {
    pub async fn new(config: IndexerConfig) -> Result<Self> {
        info!("🚀 Initializing SwapIndexer");

        let db_pool = new_db_pool(
            &config.db_config.postgres_connection_string,
            Some(config.db_config.db_pool_size),
        )
        .await
        .context("Failed to create connection pool")?;

        info!(
            "🔌 Database connection pool created with size: {}",
            config.db_config.db_pool_size
        );

        Ok(Self { config, db_pool })
    }

    pub async fn run_processor(self) -> Result<()> {
        info!("▶️ Starting SwapIndexer");

        run_migrations(self.config.db_config.postgres_connection_string.clone()).await;

        let rpc = Arc::new(RpcClient::new(&self.config.chain_config.rpc_url)?);

        info!("🔍 Verifying chain ID from RPC endpoint");
        check_chain_id(&rpc, self.config.chain_config.chain_id).await?;

        let mut chain_head = rpc.latest_block_number().await?;
        info!("⛓️ Chain head at startup: {}", chain_head);

        let starting_block =
            get_starting_block(&self.config, self.db_pool.clone(), chain_head).await?;
        info!("📌 Starting from block: {}", starting_block);

        let token_cache = Arc::new(TokenMetadataCache::new(rpc.clone()));

        let (notification_sender, notification_receiver) = mpsc::channel();
        let processor = BlockProcessor::new(
            self.db_pool.clone(),
            rpc.clone(),
            token_cache,
            notification_sender,
        );

        // Blocks below this boundary are warm-up preload passes.
        let preload_end = starting_block + self.config.chain_config.preload_blocks;
        let poll_interval = Duration::from_millis(self.config.chain_config.poll_interval_ms);

        info!("🔄 Starting continuous block processing loop");
        let mut current = starting_block;
        loop {
            if let Some(ending_block) = self.config.chain_config.ending_block {
                if current > ending_block {
                    info!("🏁 Reached configured ending block {}", ending_block);
                    return Ok(());
                }
            }

            // Wait for the chain head to reach the next block.
            while current > chain_head {
                tokio::time::sleep(poll_interval).await;
                match rpc.latest_block_number().await {
                    Ok(latest) => chain_head = latest,
                    Err(e) => warn!("⚠️ Failed to fetch chain head: {}", e),
                }
            }

            let is_preload = current < preload_end;
            if let Err(e) = processor.process_block(current, is_preload).await {
                error!("❌ Error processing block {}: {}", current, e);
            }

            while let Ok(notification) = notification_receiver.try_recv() {
                info!("📨 {}", notification);
            }

            current += 1;
        }
    }
}
