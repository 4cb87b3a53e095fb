/// Authentication utilities
///
/// This module provides the session-token primitives for TaskFlow:
///
/// # Modules
///
/// - [`jwt`]: JWT token generation and validation
///
/// User credentials themselves are never handled here; password
/// verification is delegated to the Supabase auth service. This module
/// only mints and checks the locally-issued session tokens that protect
/// API routes.

pub mod jwt;
