// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;      // language model backends
pub mod config;        // config + address table + runtime builder
pub mod errors;        // error handling
pub mod memory;        // provenance of completed runs
pub mod observability;
pub mod pipeline;      // prompt -> image -> 3D executor
pub mod registry;      // remote application registry
pub mod remote;        // persistent channel to one remote application
pub mod server;        // web form + pipeline endpoint
pub mod traits;        // seams between the pipeline and its collaborators
