// Copyright © Swapsight
// SPDX-License-Identifier: Apache-2.0

//! # Utility Functions and Shared Components
//!
//! This module contains utility functions and shared components used
//! throughout the Swapsight indexer.
//!
//! ## Key Components
//!
//! ### Database Utilities (`database`)
//! - Connection pool management and configuration
//! - Embedded migration execution
//! - Insert chunking under the Postgres bind-parameter cap
//!
//! ### Chain Validation (`chain_id`)
//! - Validates the indexer is connected to the configured network
//! - Prevents accidental indexing of wrong chain data
//!
//! ### Block Range Management (`starting_block`)
//! - Determines the starting block for indexing
//! - Handles resume from the last indexed block
//!
//! ### Token Metadata (`token_cache`)
//! - Read-through cache for token decimals and symbols
//! - Documented defaults so metadata failures never block emission

/// Database connection management, pooling, and utility functions
pub mod database;

/// Blockchain chain ID validation and verification utilities
pub mod chain_id;

/// Starting point determination and resume handling
pub mod starting_block;

/// Read-through token metadata cache
pub mod token_cache;
