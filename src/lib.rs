// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod model;

pub mod document;
pub mod specs;
pub mod stones;
pub mod assemble;

pub mod catalog;
pub mod csv;
pub mod file;
pub mod progress;
pub mod runner;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use assemble::parse_game;
pub use error::{GameError, Location, ParseError};
