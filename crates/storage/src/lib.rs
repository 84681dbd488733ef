// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Storage layer for fanout: the crash-recoverable batch ledger

mod atomic;
mod error;
mod ledger;
pub mod paths;

pub use atomic::{tmp_path_for, write_atomic, StagedWrite};
pub use error::LedgerError;
pub use ledger::{ItemUpdate, Ledger, LedgerHandle, LEDGER_SCHEMA_VERSION};
pub use paths::{batch_root, list_batches, unique_batch_id, BatchPaths};
