// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // processing block implementations
pub mod config;     // reserved keys, unit registry, model files
pub mod context;    // hierarchical data exchange tree
pub mod errors;     // error handling
pub mod imaging;    // image <-> context glue
pub mod observability;
pub mod service;    // SDK entry point
pub mod traits;     // unified abstractions

#[cfg(test)]
mod test_support;
