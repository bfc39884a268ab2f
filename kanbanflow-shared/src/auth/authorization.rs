//! Board authorization checks
//!
//! Every protected route resolves the caller's role on the target board with
//! a single membership lookup, then compares it against the minimum role the
//! operation needs.
//!
//! # Permission Model
//!
//! - **Viewer**: read boards, lists, and cards
//! - **Editor**: Viewer plus create/update/delete lists and cards, edit board metadata
//! - **Owner**: Editor plus delete the board and manage members
//!
//! # Example
//!
//! ```no_run
//! use kanbanflow_shared::auth::authorization::{require_membership, require_role};
//! use kanbanflow_shared::models::board_member::BoardRole;
//! use sqlx::PgPool;
//! use uuid::Uuid;
//!
//! # async fn example(pool: PgPool, board_id: Uuid, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
//! // Any member may read the board
//! let role = require_membership(&pool, board_id, user_id).await?;
//!
//! // Mutations need editor or higher
//! require_role(&pool, board_id, user_id, BoardRole::Editor).await?;
//! # Ok(())
//! # }
//! ```

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::board_member::{BoardMember, BoardRole};

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// User is not a member of the board
    #[error("Not a member of board {0}")]
    NotMember(Uuid),

    /// User doesn't have required role
    #[error("Insufficient permissions: requires {required:?}, has {actual:?}")]
    InsufficientRole {
        required: BoardRole,
        actual: BoardRole,
    },

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Resolves a user's role on a board, requiring membership
///
/// # Returns
///
/// The user's role if they are a member
///
/// # Errors
///
/// Returns `AuthzError::NotMember` if the user has no membership row for
/// the board. Nonexistent boards produce the same error, so callers cannot
/// distinguish hidden boards from missing ones.
///
/// # Example
///
/// ```no_run
/// # use kanbanflow_shared::auth::authorization::require_membership;
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
/// # async fn example(pool: PgPool, board_id: Uuid, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let role = require_membership(&pool, board_id, user_id).await?;
/// # Ok(())
/// # }
/// ```
pub async fn require_membership(
    pool: &PgPool,
    board_id: Uuid,
    user_id: Uuid,
) -> Result<BoardRole, AuthzError> {
    BoardMember::get_role(pool, board_id, user_id)
        .await?
        .ok_or(AuthzError::NotMember(board_id))
}

/// Checks that a user holds at least the required role on a board
///
/// # Returns
///
/// The user's actual role if it satisfies the requirement
///
/// # Errors
///
/// Returns error if:
/// - User is not a member
/// - User's role is insufficient
///
/// # Example
///
/// ```no_run
/// # use kanbanflow_shared::auth::authorization::require_role;
/// # use kanbanflow_shared::models::board_member::BoardRole;
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
/// # async fn example(pool: PgPool, board_id: Uuid, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// // Require owner
/// require_role(&pool, board_id, user_id, BoardRole::Owner).await?;
/// # Ok(())
/// # }
/// ```
pub async fn require_role(
    pool: &PgPool,
    board_id: Uuid,
    user_id: Uuid,
    required_role: BoardRole,
) -> Result<BoardRole, AuthzError> {
    let user_role = require_membership(pool, board_id, user_id).await?;

    if !user_role.has_permission(&required_role) {
        return Err(AuthzError::InsufficientRole {
            required: required_role,
            actual: user_role,
        });
    }

    Ok(user_role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authz_error_display() {
        let board_id = Uuid::new_v4();
        let err = AuthzError::NotMember(board_id);
        assert!(err.to_string().contains("Not a member"));
        assert!(err.to_string().contains(&board_id.to_string()));

        let err = AuthzError::InsufficientRole {
            required: BoardRole::Owner,
            actual: BoardRole::Viewer,
        };
        assert!(err.to_string().contains("Insufficient permissions"));
    }
}
