//! Authentication and authorization utilities
//!
//! This module provides the authentication primitives for KanbanFlow:
//!
//! # Modules
//!
//! - [`password`]: Argon2id password hashing and validation
//! - [`jwt`]: JWT token generation and validation
//! - [`middleware`]: Bearer token extraction for axum requests
//! - [`authorization`]: Board membership and role checks
//!
//! # Security Features
//!
//! - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
//! - **JWT Tokens**: HS256 signing with separate access and refresh expirations
//! - **Constant-time Comparison**: Password verification uses constant-time operations
//!
//! # Example
//!
//! ```no_run
//! use kanbanflow_shared::auth::jwt::{create_token, Claims, TokenType};
//! use kanbanflow_shared::auth::password::{hash_password, verify_password};
//! use uuid::Uuid;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Password authentication
//! let hash = hash_password("user_password")?;
//! assert!(verify_password("user_password", &hash)?);
//!
//! // JWT token generation
//! let claims = Claims::new(Uuid::new_v4(), TokenType::Access);
//! let token = create_token(&claims, "secret-key")?;
//! # Ok(())
//! # }
//! ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
