// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Append-only record of completed pipeline runs, kept in SQLite.

mod record;
mod store;

pub use record::MemoryRecord;
pub use store::MemoryStore;
