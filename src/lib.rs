//! Fabric Defaults: list-default normalization for network-fabric data models
//!
//! Guarantees that every list-valued field named by a rule table exists as a sequence
//! (empty when the operator left it out), so downstream consumers can read list fields
//! without existence checks.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod normalizer;
pub mod rules;
pub mod tree;

pub use normalizer::{normalize, NormalizeOptions, NormalizeReport, Normalizer};
pub use rules::{vxlan_rule_table, PathRule, RuleTable};
pub use tree::{classify, Classification, ConfigTree, KeyPath, Strictness};
