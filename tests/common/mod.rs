//! Common test utilities and helpers
//!
//! This module provides shared functionality used across integration tests:
//! - Binary path resolution (via `get_stasm_build_binary`)
//! - Test fixture utilities (via `helpers`)

pub(crate) mod helpers;

// Re-export for convenient access
#[allow(unused_imports)]
pub(crate) use helpers::{create_source_tree, get_stasm_build_binary, write_config};
