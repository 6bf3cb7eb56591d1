// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod processing_block;

pub use processing_block::ProcessingBlock;
