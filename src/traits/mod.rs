// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod channel;
pub mod language_model;

pub use channel::{Channel, Connector};
pub use language_model::LanguageModel;
