//! Skycast Library
//!
//! This module exposes the cli, data, and scheme modules for use in
//! integration tests.

pub mod cli;
pub mod data;
pub mod scheme;
