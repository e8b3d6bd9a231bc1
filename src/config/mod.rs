//! Configuration module for table normalization
//!
//! This module provides the `NormalizerConfig` struct and its builder for
//! tuning the classifier and resolver thresholds with validation and the
//! defaults observed in legacy exports.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::NormalizerConfigBuilder;
pub use types::NormalizerConfig;
