//! Configuration module for cinemeter
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. All fields default to the stock scrape settings, so the binary
//! runs without any configuration file at all.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HeaderConfig, OutputConfig, ScraperConfig, SeedConfig};

// Re-export parser functions
pub use parser::load_config;
