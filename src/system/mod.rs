//! Configuration and host services

pub mod config;
pub mod host;
pub mod time;
pub mod timer;
