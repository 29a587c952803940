//! Rule-based failure diagnosis for data-orchestration clusters.
//!
//! This crate provides:
//! - The [`Rule`] contract and an ordered [`RuleRegistry`]
//! - Built-in rules for fuse, worker, runtime, storage and dataset failures
//! - The [`DiagnosisEngine`], which ranks rule output deterministically

pub mod builtin;
pub mod engine;
pub mod registry;
pub mod rule;

pub use engine::{analyze, DiagnosisEngine};
pub use registry::RuleRegistry;
pub use rule::Rule;
