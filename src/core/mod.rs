//! core
//!
//! Repository description, remote parsing and configuration.
//!
//! # Modules
//!
//! - [`types`] - Repository info and forge arguments
//! - [`remote`] - Git remote URL parsing
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Values are validated once, before a forge is selected
//! - Schemas are strict and self-describing

pub mod config;
pub mod remote;
pub mod types;
