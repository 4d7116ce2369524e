//! Integration tests for the fabric list-defaults normalizer

mod cli_normalize;
mod config_integration;
