//! Heuristic swap detection over a transaction's ordered transfer set.
//!
//! Works on raw ERC-20 Transfer records only, with no DEX ABI or router
//! allowlist. For each address the ledger tracks the earliest outgoing
//! transfer and the latest incoming transfer; an address that sent token A
//! before last receiving a different token B, and is neither a token contract
//! nor a pool-like intermediary, is treated as the swapper. This recovers the
//! outermost leg of the trade; inner hops through pools are intentionally not
//! reconstructed.

use ahash::{AHashMap, AHashSet};
use ethers::types::U256;
use tracing::debug;

/// One token movement decoded from a transaction's logs.
///
/// Addresses are lowercased hex before they get here, so string equality is
/// address equality. Records are ordered by on-chain log index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub log_index: u64,
    pub from: String,
    pub to: String,
    pub token: String,
    pub amount: U256,
}

/// One leg of an inferred swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLeg {
    pub token: String,
    pub amount: U256,
}

/// The swap inferred for one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapCandidate {
    pub swapper: String,
    pub token_in: TokenLeg,
    pub token_out: TokenLeg,
}

/// Send/receive positions for one address within one transaction.
///
/// Invariant: `first_send_*` is sticky — once set it never changes for the
/// rest of the transaction. `last_receive_*` is overwritten on every receive.
#[derive(Debug, Default)]
struct AddressSwapEvent {
    first_send_index: Option<usize>,
    first_send_token: Option<String>,
    first_send_amount: U256,
    last_receive_index: Option<usize>,
    last_receive_token: Option<String>,
    last_receive_amount: U256,
}

/// Gross per-token amounts an address moved within one transaction.
#[derive(Debug, Default)]
struct TokenFlow {
    sent: U256,
    received: U256,
}

/// Transaction-scoped accounting over the ordered transfer sequence.
///
/// Built fresh for every transaction and dropped at scope exit; nothing here
/// is shared across transactions.
pub struct TransferLedger {
    events: AHashMap<String, AddressSwapEvent>,
    flows: AHashMap<String, AHashMap<String, TokenFlow>>,
    token_contracts: AHashSet<String>,
    /// Address first-appearance order (as sender or receiver). Candidate
    /// selection walks this, which makes the tie-break between multiple
    /// qualifying addresses deterministic.
    order: Vec<String>,
}

impl TransferLedger {
    /// Consume the ordered transfer sequence and build the per-address ledger.
    pub fn from_transfers(transfers: &[TransferRecord]) -> Self {
        let mut ledger = Self {
            events: AHashMap::new(),
            flows: AHashMap::new(),
            token_contracts: AHashSet::new(),
            order: Vec::new(),
        };

        for (i, transfer) in transfers.iter().enumerate() {
            ledger.token_contracts.insert(transfer.token.clone());

            // Sender side: first send is sticky, later sends are ignored.
            let sender = ledger.touch(&transfer.from);
            if sender.first_send_index.is_none() {
                sender.first_send_index = Some(i);
                sender.first_send_token = Some(transfer.token.clone());
                sender.first_send_amount = transfer.amount;
            }

            // Receiver side: last receive always wins.
            let receiver = ledger.touch(&transfer.to);
            receiver.last_receive_index = Some(i);
            receiver.last_receive_token = Some(transfer.token.clone());
            receiver.last_receive_amount = transfer.amount;

            // Gross flows per (address, token) for intermediary detection.
            // uint256 totals cannot realistically overflow; saturate rather
            // than wrap so the > 0 classification stays sound regardless.
            let sent = ledger.flow(&transfer.from, &transfer.token);
            sent.sent = sent.sent.saturating_add(transfer.amount);
            let received = ledger.flow(&transfer.to, &transfer.token);
            received.received = received.received.saturating_add(transfer.amount);
        }

        ledger
    }

    fn touch(&mut self, address: &str) -> &mut AddressSwapEvent {
        if !self.events.contains_key(address) {
            self.order.push(address.to_string());
        }
        self.events.entry(address.to_string()).or_default()
    }

    fn flow(&mut self, address: &str, token: &str) -> &mut TokenFlow {
        self.flows
            .entry(address.to_string())
            .or_default()
            .entry(token.to_string())
            .or_default()
    }

    /// An address that appears as the `token` field of any transfer.
    pub fn is_token_contract(&self, address: &str) -> bool {
        self.token_contracts.contains(address)
    }

    /// An address that both sent and received the same token in this
    /// transaction. Swappers exchange token A for token B; passing the same
    /// token through is pool/router behavior.
    pub fn is_intermediary(&self, address: &str) -> bool {
        self.flows
            .get(address)
            .map(|tokens| {
                tokens
                    .values()
                    .any(|flow| !flow.sent.is_zero() && !flow.received.is_zero())
            })
            .unwrap_or(false)
    }

    /// Qualify a single address as a swap candidate.
    ///
    /// All of: not a token contract, not an intermediary, has both a first
    /// send and a last receive, the two tokens differ, and the send causally
    /// precedes the receive in log order.
    fn qualify(&self, address: &str) -> Option<SwapCandidate> {
        if self.is_token_contract(address) || self.is_intermediary(address) {
            return None;
        }

        let event = self.events.get(address)?;
        let send_index = event.first_send_index?;
        let receive_index = event.last_receive_index?;
        let token_in = event.first_send_token.as_ref()?;
        let token_out = event.last_receive_token.as_ref()?;

        if token_in == token_out || send_index >= receive_index {
            return None;
        }

        Some(SwapCandidate {
            swapper: address.to_string(),
            token_in: TokenLeg {
                token: token_in.clone(),
                amount: event.first_send_amount,
            },
            token_out: TokenLeg {
                token: token_out.clone(),
                amount: event.last_receive_amount,
            },
        })
    }

    /// Select the transaction's unique swapper: the first qualifying address
    /// in first-appearance order. Ties between several qualifying addresses
    /// fall to that order — a documented simplification, not a claim of true
    /// swap ownership.
    pub fn select_swap(&self) -> Option<SwapCandidate> {
        for address in &self.order {
            if let Some(candidate) = self.qualify(address) {
                debug!(
                    "🎯 Swap candidate {}: {} {} -> {} {}",
                    candidate.swapper,
                    candidate.token_in.amount,
                    candidate.token_in.token,
                    candidate.token_out.amount,
                    candidate.token_out.token,
                );
                return Some(candidate);
            }
        }
        None
    }
}

/// Infer at most one swap from a transaction's ordered transfer sequence.
///
/// Sequences with fewer than 2 records cannot constitute a swap and are
/// rejected before any accounting.
pub fn detect_swap(transfers: &[TransferRecord]) -> Option<SwapCandidate> {
    if transfers.len() < 2 {
        return None;
    }
    TransferLedger::from_transfers(transfers).select_swap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(log_index: u64, from: &str, to: &str, token: &str, amount: u64) -> TransferRecord {
        TransferRecord {
            log_index,
            from: from.to_string(),
            to: to.to_string(),
            token: token.to_string(),
            amount: U256::from(amount),
        }
    }

    #[test]
    fn test_fewer_than_two_transfers_is_never_a_swap() {
        assert!(detect_swap(&[]).is_none());
        assert!(detect_swap(&[transfer(0, "0xa", "0xb", "0xtok", 5)]).is_none());
    }

    #[test]
    fn test_simple_two_leg_swap() {
        let transfers = vec![
            transfer(0, "0xu1", "0xpool", "0xtoka", 100),
            transfer(1, "0xpool", "0xu1", "0xtokb", 50),
        ];
        let swap = detect_swap(&transfers).expect("swap expected");
        assert_eq!(swap.swapper, "0xu1");
        assert_eq!(swap.token_in.token, "0xtoka");
        assert_eq!(swap.token_in.amount, U256::from(100));
        assert_eq!(swap.token_out.token, "0xtokb");
        assert_eq!(swap.token_out.amount, U256::from(50));
    }

    #[test]
    fn test_same_token_round_trip_is_not_a_swap() {
        // A -> B then B -> A of the same token: same token in/out for both
        // sides, and B passes TokenX through.
        let transfers = vec![
            transfer(0, "0xa", "0xb", "0xtokx", 10),
            transfer(1, "0xb", "0xa", "0xtokx", 10),
        ];
        assert!(detect_swap(&transfers).is_none());
    }

    #[test]
    fn test_intermediary_excluded() {
        // Pool passes TokenA through while U1 swaps A for B.
        let transfers = vec![
            transfer(0, "0xu1", "0xpool", "0xtoka", 100),
            transfer(1, "0xpool", "0xvault", "0xtoka", 100),
            transfer(2, "0xvault", "0xu1", "0xtokb", 40),
        ];
        let ledger = TransferLedger::from_transfers(&transfers);
        assert!(ledger.is_intermediary("0xpool"));
        assert!(!ledger.is_intermediary("0xu1"));

        let swap = detect_swap(&transfers).expect("swap expected");
        assert_eq!(swap.swapper, "0xu1");
    }

    #[test]
    fn test_intermediary_filter_stable_under_unrelated_reordering() {
        // Moving an unrelated transfer around must not change Pool's role.
        let base = vec![
            transfer(0, "0xu1", "0xpool", "0xtoka", 100),
            transfer(1, "0xpool", "0xother", "0xtoka", 100),
            transfer(2, "0xc", "0xd", "0xtokz", 7),
        ];
        let reordered = vec![base[2].clone(), base[0].clone(), base[1].clone()];
        assert!(TransferLedger::from_transfers(&base).is_intermediary("0xpool"));
        assert!(TransferLedger::from_transfers(&reordered).is_intermediary("0xpool"));
    }

    #[test]
    fn test_token_contract_excluded_from_candidacy() {
        // 0xtoka itself moves tokens (fee-on-transfer style); it must never
        // be selected as the swapper.
        let transfers = vec![
            transfer(0, "0xtoka", "0xpool", "0xtoka", 1),
            transfer(1, "0xpool", "0xtoka", "0xtokb", 2),
        ];
        assert!(detect_swap(&transfers).is_none());
    }

    #[test]
    fn test_first_send_is_sticky() {
        // U1 sends TokenA first, then TokenC; the inferred leg in must stay
        // TokenA with the original amount.
        let transfers = vec![
            transfer(0, "0xu1", "0xpool", "0xtoka", 100),
            transfer(1, "0xu1", "0xpool", "0xtokc", 999),
            transfer(2, "0xpool", "0xu1", "0xtokb", 50),
        ];
        let swap = detect_swap(&transfers).expect("swap expected");
        assert_eq!(swap.token_in.token, "0xtoka");
        assert_eq!(swap.token_in.amount, U256::from(100));
    }

    #[test]
    fn test_last_receive_overwrites() {
        // U1 receives TokenB then TokenC; the leg out is the latest receive.
        let transfers = vec![
            transfer(0, "0xu1", "0xpool", "0xtoka", 100),
            transfer(1, "0xpool", "0xu1", "0xtokb", 50),
            transfer(2, "0xpool", "0xu1", "0xtokc", 75),
        ];
        let swap = detect_swap(&transfers).expect("swap expected");
        assert_eq!(swap.token_out.token, "0xtokc");
        assert_eq!(swap.token_out.amount, U256::from(75));
    }

    #[test]
    fn test_send_must_precede_receive() {
        // U1's only send comes after its last receive: no causal ordering,
        // no swap for U1. Pool passes TokenA through and is excluded as an
        // intermediary, so nothing qualifies.
        let transfers = vec![
            transfer(0, "0xpool", "0xu1", "0xtokb", 50),
            transfer(1, "0xu1", "0xpool", "0xtoka", 100),
            transfer(2, "0xpool", "0xsink", "0xtoka", 100),
        ];
        assert!(detect_swap(&transfers).is_none());
    }

    #[test]
    fn test_self_transfer_is_not_a_swap() {
        let transfers = vec![
            transfer(0, "0xa", "0xa", "0xtokx", 10),
            transfer(1, "0xa", "0xa", "0xtokx", 20),
        ];
        assert!(detect_swap(&transfers).is_none());
    }

    #[test]
    fn test_zero_amount_transfers_do_not_promote_intermediaries() {
        // Pool "receives" zero TokenB; sent > 0 && received > 0 must both be
        // strict, so Pool stays a plain candidate-filter miss, and U1 wins.
        let transfers = vec![
            transfer(0, "0xu1", "0xpool", "0xtoka", 100),
            transfer(1, "0xspam", "0xpool", "0xtokb", 0),
            transfer(2, "0xpool", "0xu1", "0xtokb", 50),
        ];
        let ledger = TransferLedger::from_transfers(&transfers);
        assert!(!ledger.is_intermediary("0xpool"));

        let swap = detect_swap(&transfers).expect("swap expected");
        assert_eq!(swap.swapper, "0xu1");
    }

    #[test]
    fn test_insertion_order_breaks_ties() {
        // Both U1 and U2 qualify; U1 appeared first in the transfer sequence
        // and is selected. Arbitrary but deterministic.
        let transfers = vec![
            transfer(0, "0xu1", "0xsink1", "0xtoka", 100),
            transfer(1, "0xu2", "0xsink2", "0xtokb", 10),
            transfer(2, "0xfaucet1", "0xu1", "0xtokc", 50),
            transfer(3, "0xfaucet2", "0xu2", "0xtokd", 5),
        ];
        let swap = detect_swap(&transfers).expect("swap expected");
        assert_eq!(swap.swapper, "0xu1");
        assert_eq!(swap.token_in.token, "0xtoka");
        assert_eq!(swap.token_out.token, "0xtokc");
    }

    #[test]
    fn test_circular_routing_through_multiple_pools() {
        // U1 -> P1 -> P2 -> U1: both pools pass a token through and are
        // excluded; U1 is the single swapper of the outermost leg.
        let transfers = vec![
            transfer(0, "0xu1", "0xp1", "0xtoka", 100),
            transfer(1, "0xp1", "0xp2", "0xtoka", 100),
            transfer(2, "0xp2", "0xp1", "0xtokb", 60),
            transfer(3, "0xp1", "0xu1", "0xtokb", 55),
        ];
        let ledger = TransferLedger::from_transfers(&transfers);
        assert!(ledger.is_intermediary("0xp1"));
        assert!(ledger.is_intermediary("0xp2"));

        let swap = detect_swap(&transfers).expect("swap expected");
        assert_eq!(swap.swapper, "0xu1");
        assert_eq!(swap.token_in.token, "0xtoka");
        assert_eq!(swap.token_in.amount, U256::from(100));
        assert_eq!(swap.token_out.token, "0xtokb");
        assert_eq!(swap.token_out.amount, U256::from(55));
    }

    #[test]
    fn test_detection_is_deterministic() {
        let transfers = vec![
            transfer(0, "0xu1", "0xp1", "0xtoka", 100),
            transfer(1, "0xp1", "0xu1", "0xtokb", 50),
            transfer(2, "0xu2", "0xp1", "0xtokb", 10),
            transfer(3, "0xp1", "0xu2", "0xtokc", 5),
        ];
        let first = detect_swap(&transfers);
        let second = detect_swap(&transfers);
        assert_eq!(first, second);
        assert!(first.is_some());
    }
}
