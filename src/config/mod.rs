// Copyright © Swapsight
// SPDX-License-Identifier: Apache-2.0

//! # Configuration Management
//!
//! This module handles all configuration aspects of the Swapsight indexer,
//! including chain connection settings, database parameters, and runtime
//! options.
//!
//! ## Configuration Sources
//!
//! Configuration is loaded from a YAML file named on the command line, with
//! environment variables reserved for sensitive values such as the database
//! connection string.
//!
//! ## Validation
//!
//! All configuration values are validated at startup: the RPC endpoint must
//! be a well-formed URL and any configured block range must be coherent.

/// Main indexer configuration including all subsystem settings
pub mod indexer_config;

pub use indexer_config::{ChainConfig, DbConfig, IndexerConfig, ServerArgs};
