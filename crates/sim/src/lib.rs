//! Scripted driver for the inventory ledger and order scheduler.
//!
//! Reads a JSON list of steps, applies each one to an in-memory
//! [`Simulation`], and hands back the status line for every step.

pub mod config;
pub mod script;
pub mod simulation;

pub use config::{ConfigError, SimConfig};
pub use script::Step;
pub use simulation::{Report, Simulation};
