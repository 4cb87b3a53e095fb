/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Liveness probes
/// - `auth`: Authentication endpoints (signup, login, me, logout)
/// - `projects`: Owner-scoped project CRUD
/// - `tasks`: Task CRUD, owner-checked through the parent project
/// - `files`: Task file attachment upload

pub mod auth;
pub mod files;
pub mod health;
pub mod projects;
pub mod tasks;
