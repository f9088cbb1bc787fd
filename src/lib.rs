#![doc = include_str!("../README.md")]

// Re-export std common modules
pub mod prelude {
    pub use std::env;
    pub use std::fs;
    pub use std::io;
    pub use std::path::{Path, PathBuf};
    pub use std::process::exit;
    pub use std::process::Child;
    pub use std::process::Command;
    pub use std::process::Stdio;
    pub use std::sync::mpsc;
    pub use std::sync::{Arc, Mutex};
    pub use std::time::Instant;
    pub use log::{debug, error};
}

pub mod e_types;
pub use e_types::*;
pub mod e_parser;
pub use e_parser::{classify, classify_all};
pub mod e_aggregator;
pub use e_aggregator::{ErrorAggregator, FileErrorGroup};
pub mod e_fmt;
pub use e_fmt::ReportFormatter;
pub mod e_render;
pub mod e_analyzer;
pub use e_analyzer::{analyze, Analysis, BuildAnalyzer};
pub mod e_reports;
pub use e_reports::ReportWriter;
pub mod e_prompts;
pub mod e_config;
pub use e_config::Settings;
pub mod e_cli;
pub use e_cli::Cli;
pub mod e_runner;
