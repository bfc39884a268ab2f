//! API route handlers
//!
//! This module contains all route handlers organized by resource:
//!
//! - `health`: Health check endpoint
//! - `auth`: Authentication endpoints (register, login, refresh)
//! - `boards`: Board CRUD and membership management
//! - `lists`: List CRUD and position updates
//! - `cards`: Card CRUD and position updates

pub mod auth;
pub mod boards;
pub mod cards;
pub mod health;
pub mod lists;
