use crate::config::IndexerConfig;
use crate::db::postgres::schema::blocks;
use crate::utils::database::ArcDbPool;
use anyhow::{Context, Result};
use diesel::{dsl::max, OptionalExtension, QueryDsl};
use diesel_async::RunQueryDsl;
use tracing::info;

/// Get the appropriate starting block for the indexer.
///
/// Precedence: the configured `starting_block`, else one past the highest
/// block already in the store (resume), else the current chain head.
pub async fn get_starting_block(
    config: &IndexerConfig,
    conn_pool: ArcDbPool,
    chain_head: u64,
) -> Result<u64> {
    if let Some(configured) = config.chain_config.starting_block {
        info!("🚀 Using configured starting block: {}", configured);
        return Ok(configured);
    }

    let mut conn = conn_pool
        .get()
        .await
        .context("Failed to get database connection")?;

    let last_indexed: Option<i64> = blocks::table
        .select(max(blocks::number))
        .first(&mut conn)
        .await
        .optional()
        .context("Failed to query last indexed block")?
        .flatten();

    let starting_block = match last_indexed {
        Some(number) => {
            let next = number as u64 + 1;
            info!("🚀 Resuming from block {} (last indexed: {})", next, number);
            next
        }
        None => {
            info!("🚀 Empty store, starting from chain head: {}", chain_head);
            chain_head
        }
    };
    Ok(starting_block)
}
