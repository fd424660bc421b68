// Copyright © Swapsight
// SPDX-License-Identifier: Apache-2.0

//! # Block and Transaction Processors
//!
//! This module contains the core processing logic for handling blocks and
//! inferring swaps from raw ERC-20 transfer logs.
//!
//! ## Main Components
//!
//! ### `swap_indexer`
//! Service assembly and the block loop: connection pool, migrations, chain-id
//! verification, resume-point selection, and sequential block processing with
//! head polling.
//!
//! ### `block_processor`
//! The per-block handler. For each transaction it records every decoded
//! transfer and emits at most one swap, containing failures at transaction
//! and block granularity.
//!
//! ### `events`
//! Transfer extraction and the swap-detection core:
//! - **Transfer Extractor**: receipt logs to ordered transfer records
//! - **Swap Detector**: first-send / last-receive netting, token-contract and
//!   intermediary filtering, deterministic candidate selection
//!
//! ## Data Flow
//!
//! ```text
//! RPC Boundary → SwapIndexer → BlockProcessor → Transfer Extractor
//!                                            ↓
//!                          Database ← Swap Detector
//! ```

/// Service assembly and the sequential block loop
pub mod swap_indexer;

/// Per-block transaction handling and entity emission
pub mod block_processor;

/// Event processing modules for transfer extraction and swap detection
pub mod events;
