//! Decoding of receipt logs into the serialized transfer payload, and parsing
//! of that payload back into ordered [`TransferRecord`]s.
//!
//! The receipt boundary hands the per-transaction transfer set across as a
//! JSON-serialized list; logs that are not well-formed ERC-20 Transfer events
//! are silently skipped and contribute nothing to the sequence.

use super::swap_detector::TransferRecord;
use ethers::types::{Address, Log, H256, U256};
use ethers::utils::keccak256;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// keccak256("Transfer(address,address,uint256)")
static TRANSFER_TOPIC: Lazy<H256> =
    Lazy::new(|| H256::from_slice(keccak256("Transfer(address,address,uint256)").as_slice()));

/// Wire shape of one transfer inside the serialized receipt payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct RawTransfer {
    pub log_index: u64,
    pub from: String,
    pub to: String,
    pub token: String,
    pub amount: String,
}

/// Decode one receipt log as an ERC-20 Transfer, if it is one.
///
/// An ERC-20 Transfer carries exactly three topics (signature, indexed from,
/// indexed to) and a 32-byte uint256 amount in the data field. Anything else
/// (other events, ERC-721 transfers with a fourth indexed topic, truncated
/// data) is not a transfer and yields `None`.
fn decode_transfer_log(log: &Log) -> Option<RawTransfer> {
    if log.topics.len() != 3 || log.topics[0] != *TRANSFER_TOPIC {
        return None;
    }
    if log.data.len() != 32 {
        return None;
    }

    // Indexed address topics are 32-byte values; the address is the low 20 bytes.
    let from = Address::from_slice(&log.topics[1].as_bytes()[12..]);
    let to = Address::from_slice(&log.topics[2].as_bytes()[12..]);
    let amount = U256::from_big_endian(&log.data);

    Some(RawTransfer {
        log_index: log.log_index?.low_u64(),
        from: format!("{:?}", from),
        to: format!("{:?}", to),
        token: format!("{:?}", log.address),
        amount: amount.to_string(),
    })
}

/// Decode all Transfer events from a receipt's logs, in log order, into the
/// serialized payload the processing core consumes.
pub fn extract_transfer_payload(logs: &[Log]) -> String {
    let transfers: Vec<RawTransfer> = logs.iter().filter_map(decode_transfer_log).collect();
    serde_json::to_string(&transfers).unwrap_or_else(|e| {
        warn!("⚠️ Failed to serialize transfer payload: {}", e);
        "[]".to_string()
    })
}

/// Parse the serialized transfer payload into ordered records.
///
/// A payload that fails to parse is treated as empty; individual records with
/// malformed amounts are skipped.
pub fn parse_transfers(payload: &str) -> Vec<TransferRecord> {
    let raw: Vec<RawTransfer> = match serde_json::from_str(payload) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("⚠️ Malformed transfer payload, treating as empty: {}", e);
            return Vec::new();
        }
    };

    raw.into_iter()
        .filter_map(|t| {
            let amount = U256::from_dec_str(&t.amount).ok()?;
            Some(TransferRecord {
                log_index: t.log_index,
                from: t.from.to_lowercase(),
                to: t.to.to_lowercase(),
                token: t.token.to_lowercase(),
                amount,
            })
        })
        .collect()
}
