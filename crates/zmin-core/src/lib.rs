// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types, error handling, and the scalar minifier reference for zmin.
//!
//! This crate provides the foundational pieces used across the zmin
//! workspace:
//!
//! - [`error`] - the error taxonomy and `Result` alias
//! - [`capability`] - one-shot system capability detection
//! - [`config`] - caller-facing configuration for a minify call
//! - [`result`] - the `Strategy` tag and `MinifyResult` return type
//! - [`scalar`] - the scalar minifier: the sole semantic reference

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// System capability detection (core count, SIMD tier, memory, NUMA nodes)
pub mod capability;
/// Error types for zmin operations
pub mod error;
/// Caller-facing configuration for a minify call
pub mod config;
/// Strategy tag and completed-operation result types
pub mod result;
/// The scalar minifier: the sole source of semantic truth
pub mod scalar;

pub use capability::{CapabilityReport, Detector, SimdLevel};
pub use config::MinifyConfig;
pub use error::{Result, ZminError};
pub use result::{MinifyResult, Strategy};
pub use scalar::minify_scalar;
