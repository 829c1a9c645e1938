//! Stride library
//!
//! This library exposes the core functionality of Stride for testing
//! and potential future library use.

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod services;
