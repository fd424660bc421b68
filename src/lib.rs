// Copyright © Swapsight
// SPDX-License-Identifier: Apache-2.0

//! # Swapsight ERC-20 Swap Indexer
//!
//! Indexes Base mainnet blocks and, for every transaction, reconstructs the
//! ordered set of ERC-20 transfers and infers whether the transaction was a
//! token swap — with no DEX-specific ABI and no router allowlist.
//!
//! The detection heuristic pairs each address's earliest outgoing transfer
//! with its latest incoming transfer of a different token, after excluding
//! token contracts and pool-like intermediaries. It deliberately recovers
//! only the outermost leg of multi-hop routes.

pub mod config;
pub mod db;
pub mod processors;
pub mod rpc;
pub mod utils;
