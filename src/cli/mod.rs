//! CLI module for the Storefront Catalog Gateway
//!
//! Provides subcommands for running the gateway:
//! - `serve`: catalog API server

pub mod serve;

use clap::{Parser, Subcommand};

/// Storefront Catalog Gateway - cached proxy over the catalog provider
#[derive(Parser)]
#[command(name = "storefront-catalog-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the catalog API server
    Serve,
}
