// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fanout-core: domain types shared by the ledger, broker, and orchestrator

pub mod macros;

pub mod batch_id;
pub mod config;
pub mod item;
pub mod name;
pub mod result;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use batch_id::{first_free_batch_id, generate_batch_id};
pub use config::{BatchConfig, ITEM_PLACEHOLDER};
pub use item::{Item, ItemStatus, Summary};
pub use name::{derive_result_name, find_collision, result_file_for, NameCollision};
pub use result::{ResultData, ResultRecord, RESULT_SCHEMA_VERSION};
