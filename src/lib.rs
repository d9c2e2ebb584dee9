//! depchain library: dependency chain resolution over binding dependency maps.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod server;
