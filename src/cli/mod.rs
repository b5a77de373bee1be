//! CLI module - Command-line interface for vidgrab
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// vidgrab - video download service with plan-based quotas
#[derive(Parser)]
#[command(name = "vidgrab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server (default)
    #[command(alias = "web")]
    Serve,

    /// Evaluate a single download against a plan
    #[command(alias = "c")]
    Check {
        /// Plan tier (Free, Pro, Unlimited)
        #[arg(long, short)]
        plan: String,

        /// Downloads already completed in the current period
        #[arg(long, short, default_value_t = 0)]
        count: u32,

        /// Requested quality label, e.g. 720p or 4K
        #[arg(long, short)]
        quality: String,
    },

    /// Show the plan tiers and their limits
    #[command(alias = "ls")]
    Plans,
}

pub use commands::*;
