//! Board model and database operations
//!
//! Boards are the top-level container: each board has one owner, a set of
//! members with roles, and ordered lists of cards.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE boards (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     title VARCHAR(255) NOT NULL,
//!     description TEXT NOT NULL DEFAULT '',
//!     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use kanbanflow_shared::models::board::{Board, CreateBoard};
//! use sqlx::PgPool;
//! use uuid::Uuid;
//!
//! # async fn example(pool: PgPool, owner_id: Uuid) -> Result<(), sqlx::Error> {
//! let board = Board::create(&pool, owner_id, CreateBoard {
//!     title: "Sprint 12".to_string(),
//!     description: Some("Current sprint".to_string()),
//! }).await?;
//!
//! let boards = Board::list_for_user(&pool, owner_id).await?;
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::board_member::BoardRole;

/// Board model representing a kanban board
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    /// Unique board ID (UUID v4)
    pub id: Uuid,

    /// Board title
    pub title: String,

    /// Board description (empty string when not provided)
    pub description: String,

    /// User who created the board
    pub owner_id: Uuid,

    /// When the board was created
    pub created_at: DateTime<Utc>,

    /// When the board was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoard {
    /// Board title
    pub title: String,

    /// Optional description (defaults to empty)
    pub description: Option<String>,
}

/// Input for updating an existing board
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBoard {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,
}

impl Board {
    /// Creates a new board and its owner membership
    ///
    /// The board row and the owner's `board_members` row are inserted in a
    /// single transaction, so a board can never exist without exactly one
    /// owner membership.
    ///
    /// # Returns
    ///
    /// The newly created board with generated ID and timestamps
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Owner doesn't exist (foreign key violation)
    /// - Database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use kanbanflow_shared::models::board::{Board, CreateBoard};
    /// # use sqlx::PgPool;
    /// # use uuid::Uuid;
    /// # async fn example(pool: PgPool, owner_id: Uuid) -> Result<(), sqlx::Error> {
    /// let board = Board::create(&pool, owner_id, CreateBoard {
    ///     title: "Roadmap".to_string(),
    ///     description: None,
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        data: CreateBoard,
    ) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let board = sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (title, description, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, owner_id, created_at, updated_at
            "#,
        )
        .bind(&data.title)
        .bind(data.description.unwrap_or_default())
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO board_members (board_id, user_id, role)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(board.id)
        .bind(owner_id)
        .bind(BoardRole::Owner)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(board)
    }

    /// Finds a board by ID
    ///
    /// # Returns
    ///
    /// The board if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            SELECT id, title, description, owner_id, created_at, updated_at
            FROM boards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(board)
    }

    /// Lists all boards a user is a member of
    ///
    /// Includes boards the user owns, since the owner always has a
    /// membership row.
    ///
    /// # Returns
    ///
    /// Vector of boards, ordered by creation date (newest first)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use kanbanflow_shared::models::board::Board;
    /// # use sqlx::PgPool;
    /// # use uuid::Uuid;
    /// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    /// let boards = Board::list_for_user(&pool, user_id).await?;
    /// println!("User can see {} boards", boards.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let boards = sqlx::query_as::<_, Board>(
            r#"
            SELECT b.id, b.title, b.description, b.owner_id, b.created_at, b.updated_at
            FROM boards b
            JOIN board_members bm ON bm.board_id = b.id
            WHERE bm.user_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(boards)
    }

    /// Updates an existing board
    ///
    /// Only non-None fields in `data` will be updated. The `updated_at`
    /// timestamp is automatically set to the current time.
    ///
    /// # Returns
    ///
    /// The updated board if found, None if board doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateBoard,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE boards SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, title, description, owner_id, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Board>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }

        let board = q.fetch_optional(pool).await?;

        Ok(board)
    }

    /// Deletes a board by ID
    ///
    /// Memberships, lists, and cards are removed by `ON DELETE CASCADE`.
    ///
    /// # Returns
    ///
    /// True if board was deleted, false if board didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_board_default() {
        let update = UpdateBoard::default();
        assert!(update.title.is_none());
        assert!(update.description.is_none());
    }

    #[test]
    fn test_board_serializes_description() {
        let board = Board {
            id: Uuid::new_v4(),
            title: "Sprint".to_string(),
            description: String::new(),
            owner_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["description"], "");
        assert_eq!(json["title"], "Sprint");
    }

    // Integration tests for database operations are in the API crate's tests/
}
