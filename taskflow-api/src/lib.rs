//! # TaskFlow API Server Library
//!
//! This library provides the core functionality for the TaskFlow API server.
//!
//! ## Modules
//!
//! - `app`: Application state, router builder, and the auth gate
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
