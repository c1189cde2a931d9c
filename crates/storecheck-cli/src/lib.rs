//! Storecheck CLI library
//!
//! Command definitions and handlers for the `storecheck` binary.

#![warn(missing_docs)]

mod commands;
mod error;
pub mod handlers;

pub use commands::{
    CatalogArgs, Cli, Commands, ConfigArgs, ConfigFormat, PurchaseArgs, SigninArgs,
};
pub use error::{CliError, CliResult};
