//! Board membership model and database operations
//!
//! Implements the many-to-many relationship between users and boards with
//! role-based access control.
//!
//! # Schema
//!
//! ```sql
//! CREATE TYPE board_role AS ENUM ('owner', 'editor', 'viewer');
//!
//! CREATE TABLE board_members (
//!     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
//!     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
//!     role board_role NOT NULL DEFAULT 'viewer',
//!     joined_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     PRIMARY KEY (board_id, user_id)
//! );
//! ```
//!
//! # Roles
//!
//! - **owner**: Full control, delete board, manage members
//! - **editor**: Create and modify lists and cards, edit board metadata
//! - **viewer**: Read-only access
//!
//! # Example
//!
//! ```no_run
//! use kanbanflow_shared::models::board_member::{BoardMember, BoardRole, CreateBoardMember};
//! use sqlx::PgPool;
//! use uuid::Uuid;
//!
//! # async fn example(pool: PgPool, board_id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error> {
//! // Add a user to a board as an editor
//! let member = BoardMember::create(&pool, CreateBoardMember {
//!     board_id,
//!     user_id,
//!     role: BoardRole::Editor,
//! }).await?;
//!
//! // Look up their role later
//! let role = BoardMember::get_role(&pool, board_id, user_id).await?;
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// RBAC roles for board memberships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "board_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BoardRole {
    /// Full control: delete board, manage members
    Owner,

    /// Can create and modify lists and cards, edit board metadata
    Editor,

    /// Read-only access to the board
    Viewer,
}

impl BoardRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardRole::Owner => "owner",
            BoardRole::Editor => "editor",
            BoardRole::Viewer => "viewer",
        }
    }

    /// Can create, update, and delete lists and cards, and edit board metadata
    pub fn can_edit_content(&self) -> bool {
        matches!(self, BoardRole::Owner | BoardRole::Editor)
    }

    /// Can add members to the board
    pub fn can_manage_members(&self) -> bool {
        matches!(self, BoardRole::Owner)
    }

    /// Can delete the board
    pub fn can_delete_board(&self) -> bool {
        matches!(self, BoardRole::Owner)
    }

    /// Whether an owner may grant this role to another user
    ///
    /// The owner role is assigned only at board creation and cannot be
    /// granted through member management.
    pub fn is_grantable(&self) -> bool {
        !matches!(self, BoardRole::Owner)
    }

    /// Checks if this role has permission level of the required role
    ///
    /// Hierarchy: Owner > Editor > Viewer
    pub fn has_permission(&self, required: &BoardRole) -> bool {
        self.permission_level() >= required.permission_level()
    }

    /// Returns numeric permission level for comparison
    fn permission_level(&self) -> u8 {
        match self {
            BoardRole::Owner => 3,
            BoardRole::Editor => 2,
            BoardRole::Viewer => 1,
        }
    }
}

/// Board membership model representing a user-board relationship with role
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BoardMember {
    /// Board ID
    pub board_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the board
    pub role: BoardRole,

    /// When the membership was created
    pub joined_at: DateTime<Utc>,
}

/// Input for creating a new board membership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoardMember {
    /// Board ID
    pub board_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role to assign (defaults to Viewer)
    #[serde(default = "default_role")]
    pub role: BoardRole,
}

fn default_role() -> BoardRole {
    BoardRole::Viewer
}

/// Board member enriched with user identity for listings
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BoardMemberInfo {
    /// User ID
    pub user_id: Uuid,

    /// Member's email address
    pub email: String,

    /// Member's display name
    pub name: Option<String>,

    /// Role within the board
    pub role: BoardRole,

    /// When the membership was created
    pub joined_at: DateTime<Utc>,
}

impl BoardMember {
    /// Creates a new membership (adds user to board)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Membership already exists (primary key violation)
    /// - Board or user doesn't exist (foreign key violation)
    /// - Database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use kanbanflow_shared::models::board_member::{BoardMember, BoardRole, CreateBoardMember};
    /// # use sqlx::PgPool;
    /// # use uuid::Uuid;
    /// # async fn example(pool: PgPool, board_id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error> {
    /// let member = BoardMember::create(&pool, CreateBoardMember {
    ///     board_id,
    ///     user_id,
    ///     role: BoardRole::Viewer,
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &PgPool, data: CreateBoardMember) -> Result<Self, sqlx::Error> {
        let member = sqlx::query_as::<_, BoardMember>(
            r#"
            INSERT INTO board_members (board_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING board_id, user_id, role, joined_at
            "#,
        )
        .bind(data.board_id)
        .bind(data.user_id)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Ok(member)
    }

    /// Gets a user's role on a board
    ///
    /// # Returns
    ///
    /// The user's role if they are a member, None otherwise
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use kanbanflow_shared::models::board_member::BoardMember;
    /// # use sqlx::PgPool;
    /// # use uuid::Uuid;
    /// # async fn example(pool: PgPool, board_id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error> {
    /// if let Some(role) = BoardMember::get_role(&pool, board_id, user_id).await? {
    ///     println!("User role: {}", role.as_str());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_role(
        pool: &PgPool,
        board_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<BoardRole>, sqlx::Error> {
        let role: Option<BoardRole> = sqlx::query_scalar(
            r#"
            SELECT role FROM board_members
            WHERE board_id = $1 AND user_id = $2
            "#,
        )
        .bind(board_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(role)
    }

    /// Lists all members of a board with their user identity
    ///
    /// Results are ordered by join time, so the owner comes first.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use kanbanflow_shared::models::board_member::BoardMember;
    /// # use sqlx::PgPool;
    /// # use uuid::Uuid;
    /// # async fn example(pool: PgPool, board_id: Uuid) -> Result<(), sqlx::Error> {
    /// let members = BoardMember::list_for_board(&pool, board_id).await?;
    /// println!("Board has {} members", members.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_for_board(
        pool: &PgPool,
        board_id: Uuid,
    ) -> Result<Vec<BoardMemberInfo>, sqlx::Error> {
        let members = sqlx::query_as::<_, BoardMemberInfo>(
            r#"
            SELECT bm.user_id, u.email, u.name, bm.role, bm.joined_at
            FROM board_members bm
            JOIN users u ON u.id = bm.user_id
            WHERE bm.board_id = $1
            ORDER BY bm.joined_at ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await?;

        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_role_as_str() {
        assert_eq!(BoardRole::Owner.as_str(), "owner");
        assert_eq!(BoardRole::Editor.as_str(), "editor");
        assert_eq!(BoardRole::Viewer.as_str(), "viewer");
    }

    #[test]
    fn test_role_permissions() {
        // Owner can do everything
        assert!(BoardRole::Owner.can_edit_content());
        assert!(BoardRole::Owner.can_manage_members());
        assert!(BoardRole::Owner.can_delete_board());

        // Editor can modify content but not manage the board
        assert!(BoardRole::Editor.can_edit_content());
        assert!(!BoardRole::Editor.can_manage_members());
        assert!(!BoardRole::Editor.can_delete_board());

        // Viewer can only read
        assert!(!BoardRole::Viewer.can_edit_content());
        assert!(!BoardRole::Viewer.can_manage_members());
        assert!(!BoardRole::Viewer.can_delete_board());
    }

    #[test]
    fn test_role_hierarchy() {
        assert!(BoardRole::Owner.has_permission(&BoardRole::Viewer));
        assert!(BoardRole::Owner.has_permission(&BoardRole::Editor));
        assert!(BoardRole::Owner.has_permission(&BoardRole::Owner));

        assert!(BoardRole::Editor.has_permission(&BoardRole::Viewer));
        assert!(BoardRole::Editor.has_permission(&BoardRole::Editor));
        assert!(!BoardRole::Editor.has_permission(&BoardRole::Owner));

        assert!(BoardRole::Viewer.has_permission(&BoardRole::Viewer));
        assert!(!BoardRole::Viewer.has_permission(&BoardRole::Editor));
        assert!(!BoardRole::Viewer.has_permission(&BoardRole::Owner));
    }

    #[test]
    fn test_grantable_roles() {
        assert!(!BoardRole::Owner.is_grantable());
        assert!(BoardRole::Editor.is_grantable());
        assert!(BoardRole::Viewer.is_grantable());
    }

    #[test]
    fn test_create_board_member_default_role() {
        assert_eq!(default_role(), BoardRole::Viewer);
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&BoardRole::Editor).unwrap(),
            "\"editor\""
        );
        let role: BoardRole = serde_json::from_str("\"owner\"").unwrap();
        assert_eq!(role, BoardRole::Owner);
    }

    // Integration tests for database operations are in the API crate's tests/
}
