//! List model and database operations
//!
//! Lists are ordered columns within a board. Ordering uses a 1-based
//! integer `position`; new lists are appended after the current maximum.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE lists (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     title VARCHAR(255) NOT NULL,
//!     position INTEGER NOT NULL CHECK (position > 0),
//!     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use kanbanflow_shared::models::list::{CreateList, List};
//! use sqlx::PgPool;
//! use uuid::Uuid;
//!
//! # async fn example(pool: PgPool, board_id: Uuid) -> Result<(), sqlx::Error> {
//! let list = List::create(&pool, CreateList {
//!     title: "In Progress".to_string(),
//!     board_id,
//! }).await?;
//!
//! assert!(list.position >= 1);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::card::Card;

/// List model representing an ordered column on a board
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct List {
    /// Unique list ID (UUID v4)
    pub id: Uuid,

    /// List title
    pub title: String,

    /// 1-based ordinal within the board
    pub position: i32,

    /// Board this list belongs to
    pub board_id: Uuid,

    /// When the list was created
    pub created_at: DateTime<Utc>,

    /// When the list was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateList {
    /// List title
    pub title: String,

    /// Board to append the list to
    pub board_id: Uuid,
}

/// Input for updating an existing list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateList {
    /// New title
    pub title: Option<String>,
}

/// A list together with its cards, ordered by position
#[derive(Debug, Clone, Serialize)]
pub struct ListWithCards {
    /// The list itself, flattened into the JSON object
    #[serde(flatten)]
    pub list: List,

    /// Cards in the list, ordered by position
    pub cards: Vec<Card>,
}

impl List {
    /// Creates a new list at the end of a board
    ///
    /// The position is computed as `MAX(position) + 1` over the board's
    /// lists (1 for the first list). The parent board row is locked for the
    /// duration of the transaction; concurrent creates for the same board
    /// queue on that lock, so two lists never compute the same position.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error::RowNotFound` if the board doesn't exist
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use kanbanflow_shared::models::list::{CreateList, List};
    /// # use sqlx::PgPool;
    /// # use uuid::Uuid;
    /// # async fn example(pool: PgPool, board_id: Uuid) -> Result<(), sqlx::Error> {
    /// let list = List::create(&pool, CreateList {
    ///     title: "Done".to_string(),
    ///     board_id,
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &PgPool, data: CreateList) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Lock the parent board row for the position computation
        let _board_id: Uuid = sqlx::query_scalar("SELECT id FROM boards WHERE id = $1 FOR UPDATE")
            .bind(data.board_id)
            .fetch_one(&mut *tx)
            .await?;

        let next_position: i32 =
            sqlx::query_scalar("SELECT COALESCE(MAX(position), 0) + 1 FROM lists WHERE board_id = $1")
                .bind(data.board_id)
                .fetch_one(&mut *tx)
                .await?;

        let list = sqlx::query_as::<_, List>(
            r#"
            INSERT INTO lists (title, position, board_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, position, board_id, created_at, updated_at
            "#,
        )
        .bind(&data.title)
        .bind(next_position)
        .bind(data.board_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(list)
    }

    /// Finds a list by ID
    ///
    /// # Returns
    ///
    /// The list if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let list = sqlx::query_as::<_, List>(
            r#"
            SELECT id, title, position, board_id, created_at, updated_at
            FROM lists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(list)
    }

    /// Lists all lists on a board, ordered by position
    pub async fn list_for_board(pool: &PgPool, board_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let lists = sqlx::query_as::<_, List>(
            r#"
            SELECT id, title, position, board_id, created_at, updated_at
            FROM lists
            WHERE board_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await?;

        Ok(lists)
    }

    /// Lists all lists on a board with their cards nested
    ///
    /// Cards are fetched in a single query across all lists and grouped in
    /// memory, so the cost stays at two queries regardless of board size.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use kanbanflow_shared::models::list::List;
    /// # use sqlx::PgPool;
    /// # use uuid::Uuid;
    /// # async fn example(pool: PgPool, board_id: Uuid) -> Result<(), sqlx::Error> {
    /// let lists = List::list_with_cards(&pool, board_id).await?;
    /// for list in &lists {
    ///     println!("{}: {} cards", list.list.title, list.cards.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_with_cards(
        pool: &PgPool,
        board_id: Uuid,
    ) -> Result<Vec<ListWithCards>, sqlx::Error> {
        let lists = Self::list_for_board(pool, board_id).await?;

        let list_ids: Vec<Uuid> = lists.iter().map(|l| l.id).collect();
        let cards = Card::list_for_lists(pool, &list_ids).await?;

        let mut by_list: HashMap<Uuid, Vec<Card>> = HashMap::new();
        for card in cards {
            by_list.entry(card.list_id).or_default().push(card);
        }

        Ok(lists
            .into_iter()
            .map(|list| {
                let cards = by_list.remove(&list.id).unwrap_or_default();
                ListWithCards { list, cards }
            })
            .collect())
    }

    /// Updates an existing list
    ///
    /// # Returns
    ///
    /// The updated list if found, None if list doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateList,
    ) -> Result<Option<Self>, sqlx::Error> {
        match data.title {
            Some(title) => {
                let list = sqlx::query_as::<_, List>(
                    r#"
                    UPDATE lists
                    SET title = $2, updated_at = NOW()
                    WHERE id = $1
                    RETURNING id, title, position, board_id, created_at, updated_at
                    "#,
                )
                .bind(id)
                .bind(title)
                .fetch_optional(pool)
                .await?;

                Ok(list)
            }
            None => Self::find_by_id(pool, id).await,
        }
    }

    /// Overwrites a list's position
    ///
    /// The caller supplies the target ordinal directly; positions of other
    /// lists are not renumbered and duplicates are allowed.
    ///
    /// # Returns
    ///
    /// The updated list if found, None if list doesn't exist
    pub async fn set_position(
        pool: &PgPool,
        id: Uuid,
        position: i32,
    ) -> Result<Option<Self>, sqlx::Error> {
        let list = sqlx::query_as::<_, List>(
            r#"
            UPDATE lists
            SET position = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, position, board_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(position)
        .fetch_optional(pool)
        .await?;

        Ok(list)
    }

    /// Deletes a list by ID
    ///
    /// Cards in the list are removed by `ON DELETE CASCADE`. Positions of
    /// the remaining lists are not renumbered.
    ///
    /// # Returns
    ///
    /// True if list was deleted, false if list didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
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
    fn test_update_list_default() {
        let update = UpdateList::default();
        assert!(update.title.is_none());
    }

    #[test]
    fn test_list_with_cards_flattens_list_fields() {
        let list = List {
            id: Uuid::new_v4(),
            title: "Todo".to_string(),
            position: 1,
            board_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let with_cards = ListWithCards {
            list,
            cards: vec![],
        };

        let json = serde_json::to_value(&with_cards).unwrap();
        assert_eq!(json["title"], "Todo");
        assert_eq!(json["position"], 1);
        assert!(json["cards"].as_array().unwrap().is_empty());
        assert!(json.get("list").is_none());
    }

    // Integration tests for database operations are in the API crate's tests/
}
