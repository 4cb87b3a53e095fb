//! # TaskFlow Shared Library
//!
//! This crate contains shared types and business logic used by the TaskFlow
//! API server.
//!
//! ## Module Organization
//!
//! - `models`: Domain models and their persistence operations
//! - `auth`: Session token (JWT) issuance and validation
//! - `supabase`: Client for the Supabase platform (PostgREST, GoTrue, Storage)

pub mod auth;
pub mod models;
pub mod supabase;

/// Current version of the TaskFlow shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
