// Copyright © Swapsight
// SPDX-License-Identifier: Apache-2.0

//! # Database Layer
//!
//! This module provides the database abstraction layer for the Swapsight
//! indexer, including models and schema definitions for the entities produced
//! by swap detection.
//!
//! ## Database Schema
//!
//! The indexer uses three core tables, each keyed by a natural id so that
//! reprocessing is an overwrite, never a duplicate:
//! - `blocks`: one row per indexed block (`id` = block number)
//! - `transfers`: one row per decoded ERC-20 transfer log
//!   (`id` = `tx_hash-log_index`)
//! - `swaps`: at most one inferred swap per transaction (`id` = `tx_hash`)

/// Common database models and shared data structures
pub mod common;

/// PostgreSQL-specific implementation including the diesel schema
pub mod postgres;
