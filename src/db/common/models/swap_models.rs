// Copyright © Swapsight
// SPDX-License-Identifier: Apache-2.0

#![allow(clippy::extra_unused_lifetimes)]

use crate::db::postgres::schema::{blocks, swaps, transfers};
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use field_count::FieldCount;
use serde::{Deserialize, Serialize};

/// One indexed block. `id` is the block number rendered as a string, so
/// reprocessing a block overwrites rather than duplicates.
#[derive(Debug, Deserialize, Serialize, Queryable, Insertable, Clone)]
#[diesel(table_name = blocks)]
pub struct Block {
    pub id: String,
    pub number: i64,
    pub hash: String,
    pub timestamp: i64,
    pub tx_count: i32,
    pub tx_hashes: String,
    pub inserted_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Serialize, Insertable, Clone, FieldCount)]
#[diesel(table_name = blocks)]
pub struct NewBlock {
    pub id: String,
    pub number: i64,
    pub hash: String,
    pub timestamp: i64,
    pub tx_count: i32,
    pub tx_hashes: String,
}

/// One ERC-20 transfer log, recorded independently of swap qualification.
/// `id = tx_hash-log_index`.
#[derive(Debug, Deserialize, Serialize, Queryable, Insertable, Clone)]
#[diesel(table_name = transfers)]
pub struct Transfer {
    pub id: String,
    pub tx_hash: String,
    pub token: String,
    pub decimals: i32,
    pub from_address: String,
    pub to_address: String,
    pub amount: BigDecimal,
    pub inserted_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Serialize, Insertable, Clone, FieldCount)]
#[diesel(table_name = transfers)]
pub struct NewTransfer {
    pub id: String,
    pub tx_hash: String,
    pub token: String,
    pub decimals: i32,
    pub from_address: String,
    pub to_address: String,
    pub amount: BigDecimal,
}

/// The canonical swap inferred for one transaction. `id = tx_hash`, which
/// guarantees at most one Swap per transaction and natural deduplication on
/// reprocessing.
#[derive(Debug, Deserialize, Serialize, Queryable, Insertable, Clone)]
#[diesel(table_name = swaps)]
pub struct Swap {
    pub id: String,
    pub tx_hash: String,
    pub swapper: String,
    pub token_in: String,
    pub token_in_decimals: i32,
    pub amount_in: BigDecimal,
    pub token_out: String,
    pub token_out_decimals: i32,
    pub amount_out: BigDecimal,
    pub block_number: i64,
    pub timestamp: i64,
    pub inserted_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Serialize, Insertable, Clone, FieldCount)]
#[diesel(table_name = swaps)]
pub struct NewSwap {
    pub id: String,
    pub tx_hash: String,
    pub swapper: String,
    pub token_in: String,
    pub token_in_decimals: i32,
    pub amount_in: BigDecimal,
    pub token_out: String,
    pub token_out_decimals: i32,
    pub amount_out: BigDecimal,
    pub block_number: i64,
    pub timestamp: i64,
}

// Prevent conflicts with other things named `Swap`
pub type SwapModel = Swap;
