// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::UnitType;
use crate::context::Context;
use crate::errors::ProcessError;

/// A bound unit of computation that mutates a [`Context`] in place.
///
/// Blocks are created by [`Service::create_processing_block`](crate::service::Service::create_processing_block)
/// and bind their resources once. `process` borrows the caller's context for the
/// duration of the call and never takes ownership of it.
///
/// # Concurrency
///
/// `process` takes `&mut self`, so one instance runs one call at a time. The trait
/// only requires `Send`: a block can move to another thread, but sharing one
/// instance between threads needs external synchronization. Callers wanting
/// parallelism create one block per thread.
pub trait ProcessingBlock: Send {
    /// Reads this unit's inputs from `ctx` and writes its results back into it.
    ///
    /// On `Err` the context may hold partial results; no retry is attempted.
    fn process(&mut self, ctx: &mut Context) -> Result<(), ProcessError>;

    fn unit_type(&self) -> UnitType;

    fn name(&self) -> &'static str;
}
