//! Core application modules
//!
//! This module contains configuration, constants, logging, and the provider
//! layer that talks to the hosted model.

pub mod config;
pub mod constants;
pub mod logging;
pub mod provider;
pub mod providers;
