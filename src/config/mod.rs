// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod address_table;
mod loader;
mod overrides;
mod runtime;
mod validation;

pub mod consts;

pub use address_table::AddressTable;
pub use loader::{
    load_and_validate_config, load_config, parse_config, Config, LanguageModelConfig,
    PipelineConfig, RegistryConfig, ServerConfig, UserConfig,
};
pub use overrides::{effective_user_config, effective_user_configs, needs_correction};
pub use runtime::RuntimeBuilder;
pub use validation::validate_config;
