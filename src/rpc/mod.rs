//! JSON-RPC fetch boundary.
//!
//! Everything the core consumes from the chain comes through here: block data
//! with transaction hashes, per-transaction transfer payloads decoded from
//! receipts, and token metadata. Failure contracts differ per call and the
//! callers rely on them:
//! - `get_block_data` propagates errors; the caller skips that block only.
//! - `get_transaction_transfers` never raises; it returns an empty payload.
//! - `fetch_token_info` errors are absorbed by the metadata cache defaults.

use crate::processors::events::transfer_extractor::extract_transfer_payload;
use crate::utils::token_cache::{TokenInfo, TokenInfoFetcher};
use anyhow::{Context, Result};
use async_trait::async_trait;
use ethers::abi::{self, ParamType};
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, TransactionRequest, H256, U256};
use ethers::utils::id;
use tracing::error;
use url::Url;

/// Block-level data needed to index one block.
#[derive(Debug, Clone)]
pub struct BlockData {
    pub hash: String,
    pub timestamp: i64,
    pub transactions: Vec<String>,
}

pub struct RpcClient {
    provider: Provider<Http>,
}

impl RpcClient {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url = Url::parse(rpc_url).context("Invalid RPC URL")?;
        let provider = Provider::new(Http::new(url));
        Ok(Self { provider })
    }

    pub async fn chain_id(&self) -> Result<u64> {
        // low_u64 truncates instead of panicking; real chain ids fit easily.
        Ok(self.provider.get_chainid().await?.low_u64())
    }

    pub async fn latest_block_number(&self) -> Result<u64> {
        Ok(self.provider.get_block_number().await?.as_u64())
    }

    /// Fetch hash, timestamp and the ordered transaction hash list for one
    /// block. Errors propagate; the caller must log and abort only that
    /// block's processing.
    pub async fn get_block_data(&self, number: u64) -> Result<BlockData> {
        let block = self
            .provider
            .get_block(number)
            .await
            .with_context(|| format!("Failed to fetch block {}", number))?
            .with_context(|| format!("Block {} not found", number))?;

        let hash = block
            .hash
            .with_context(|| format!("Block {} has no hash yet", number))?;

        Ok(BlockData {
            hash: format!("{:?}", hash),
            timestamp: block.timestamp.low_u64() as i64,
            transactions: block
                .transactions
                .iter()
                .map(|tx| format!("{:?}", tx))
                .collect(),
        })
    }

    /// Fetch a transaction's receipt and decode its Transfer logs into the
    /// serialized transfer payload. Never raises: any failure is logged and
    /// yields an empty list, which the core treats as "no swap, skip".
    pub async fn get_transaction_transfers(&self, tx_hash: &str) -> String {
        match self.try_get_transaction_transfers(tx_hash).await {
            Ok(payload) => payload,
            Err(e) => {
                error!("❌ Error fetching receipt for {}: {}", tx_hash, e);
                "[]".to_string()
            }
        }
    }

    async fn try_get_transaction_transfers(&self, tx_hash: &str) -> Result<String> {
        let hash: H256 = tx_hash.parse().context("Invalid transaction hash")?;
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await?
            .with_context(|| format!("Receipt for {} not found", tx_hash))?;
        Ok(extract_transfer_payload(&receipt.logs))
    }

    /// Minimal `eth_call` against a token contract.
    async fn call_erc20(&self, token: Address, selector: [u8; 4]) -> Result<Bytes> {
        let tx: TypedTransaction = TransactionRequest::new()
            .to(token)
            .data(selector.to_vec())
            .into();
        let bytes = self.provider.call(&tx, None).await?;
        anyhow::ensure!(!bytes.is_empty(), "empty eth_call response");
        Ok(bytes)
    }

    async fn fetch_decimals(&self, token: Address) -> Result<i32> {
        let bytes = self.call_erc20(token, id("decimals()")).await?;
        let value = U256::from_big_endian(&bytes[bytes.len().saturating_sub(32)..]);
        anyhow::ensure!(value <= U256::from(u8::MAX), "decimals out of range");
        Ok(value.as_u32() as i32)
    }

    async fn fetch_symbol(&self, token: Address) -> Result<String> {
        let bytes = self.call_erc20(token, id("symbol()")).await?;
        let tokens = abi::decode(&[ParamType::String], &bytes)
            .context("symbol() did not return an ABI string")?;
        tokens
            .into_iter()
            .next()
            .and_then(|t| t.into_string())
            .context("symbol() decoded to a non-string value")
    }
}

#[async_trait]
impl TokenInfoFetcher for RpcClient {
    /// Fetch decimals and symbol together, concurrently. Any failure fails
    /// the whole lookup; the metadata cache turns that into defaults.
    async fn fetch_token_info(&self, token: &str) -> Result<TokenInfo> {
        let address: Address = token.parse().context("Invalid token address")?;
        let (decimals, symbol) =
            futures::try_join!(self.fetch_decimals(address), self.fetch_symbol(address))?;
        Ok(TokenInfo { decimals, symbol })
    }
}
