//! Database models for KanbanFlow
//!
//! This module contains all database models and their CRUD operations.
//!
//! # Models
//!
//! - `user`: User accounts and authentication
//! - `board`: Kanban boards owned by users
//! - `board_member`: Board membership with roles (owner, editor, viewer)
//! - `list`: Ordered lists (columns) within a board
//! - `card`: Ordered cards within a list
//!
//! # Example
//!
//! ```no_run
//! use kanbanflow_shared::models::user::{User, CreateUser};
//! use kanbanflow_shared::db::pool::{create_pool, DatabaseConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::default()).await?;
//!
//! let new_user = CreateUser {
//!     email: "user@example.com".to_string(),
//!     password_hash: "$argon2id$...".to_string(),
//!     name: Some("John Doe".to_string()),
//! };
//!
//! let user = User::create(&pool, new_user).await?;
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod board_member;
pub mod card;
pub mod list;
pub mod user;
