//! # Address Book API Server Library
//!
//! HTTP surface of the address book service.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers
//! - `validation`: Request validation preamble

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod validation;
