// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod batch;
mod context;
mod process;
mod service;

pub use batch::BatchError;
pub use context::ContextError;
pub use process::ProcessError;
pub use service::ServiceError;
