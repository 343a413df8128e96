// src/core/mod.rs

pub mod xml;
pub mod sanitize;
