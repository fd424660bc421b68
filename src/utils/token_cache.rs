//! Read-through cache for token metadata (decimals, symbol).
//!
//! Keyed by lowercased token address with no eviction: on-chain decimals are
//! immutable post-deployment. Lookups never fail — a fetch error resolves to
//! documented defaults so emission is never blocked by metadata
//! unavailability, and the fallback is cached like any other result.

use ahash::AHashMap;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Fallback when a token does not answer `decimals()`; 18 is the ERC-20 norm.
pub const DEFAULT_DECIMALS: i32 = 18;

pub const DEFAULT_SYMBOL: &str = "UNKNOWN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub decimals: i32,
    pub symbol: String,
}

impl Default for TokenInfo {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_DECIMALS,
            symbol: DEFAULT_SYMBOL.to_string(),
        }
    }
}

/// Boundary that resolves metadata for a token contract address.
#[async_trait]
pub trait TokenInfoFetcher: Send + Sync {
    async fn fetch_token_info(&self, token: &str) -> Result<TokenInfo>;
}

/// Shared, read-mostly metadata cache over a [`TokenInfoFetcher`].
pub struct TokenMetadataCache {
    fetcher: Arc<dyn TokenInfoFetcher>,
    cache: RwLock<AHashMap<String, TokenInfo>>,
}

impl TokenMetadataCache {
    pub fn new(fetcher: Arc<dyn TokenInfoFetcher>) -> Self {
        Self {
            fetcher,
            cache: RwLock::new(AHashMap::new()),
        }
    }

    /// Resolve metadata for a token. Infallible: fetch errors resolve to
    /// [`TokenInfo::default`].
    pub async fn get_token_info(&self, token: &str) -> TokenInfo {
        let key = token.to_lowercase();

        if let Some(hit) = self.cache.read().await.get(&key) {
            return hit.clone();
        }

        let info = match self.fetcher.fetch_token_info(&key).await {
            Ok(info) => {
                debug!("🪙 Resolved token {}: {} ({} decimals)", key, info.symbol, info.decimals);
                info
            }
            Err(e) => {
                warn!(
                    "⚠️ Failed to fetch metadata for token {}, using defaults: {}",
                    key, e
                );
                TokenInfo::default()
            }
        };

        self.cache.write().await.insert(key, info.clone());
        info
    }

    pub async fn get_decimals(&self, token: &str) -> i32 {
        self.get_token_info(token).await.decimals
    }
}
