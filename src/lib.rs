//! Dockstat: an interactive terminal dashboard for Docker containers,
//! images, networks, volumes and compose stacks.
//!
//! This library exposes the core modules for use by the binary and by tests.

pub mod app;
pub mod compose;
pub mod config;
pub mod docker;
pub mod error;
pub mod grouping;
pub mod layout;
pub mod logging;
pub mod model;
pub mod table;
pub mod view;

pub use error::{Error, Result};
