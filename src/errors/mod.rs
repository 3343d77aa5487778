// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod memory;
mod pipeline;
mod registry;
mod remote;

pub use config::{ConfigError, ValidationError};
pub use memory::MemoryError;
pub use pipeline::{BuildError, LanguageModelError, PipelineError};
pub use registry::{RegistryError, RegistryResult};
pub use remote::{RemoteError, RemoteResult};
