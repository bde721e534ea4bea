//! Core domain + application logic for the EVE Frontier development assistant bot.
//!
//! This crate is framework-agnostic. The chat platform and the model provider
//! live behind ports (traits) implemented in adapter crates.

pub mod assistant;
pub mod bot;
pub mod chunking;
pub mod commands;
pub mod config;
pub mod docs;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod model;
pub mod prompt;

#[cfg(test)]
mod fakes;

pub use errors::{Error, Result};
