//! Console front end for the battle runtime.
//!
//! The `battle` binary is the composition root: it reads [`ClientConfig`]
//! from the environment, installs logging, loads content through
//! `battle-content`, runs one encounter on a `battle-runtime` [`Runtime`]
//! and prints the report.
//!
//! [`Runtime`]: battle_runtime::Runtime
pub mod config;
pub mod logging;
pub mod presenter;

pub use config::{ClientConfig, OutputFormat};
