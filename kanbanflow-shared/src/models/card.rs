//! Card model and database operations
//!
//! Cards are ordered items within a list. Like lists, ordering uses a
//! 1-based integer `position` and new cards are appended at the end.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE cards (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     title VARCHAR(255) NOT NULL,
//!     description TEXT NOT NULL DEFAULT '',
//!     position INTEGER NOT NULL CHECK (position > 0),
//!     list_id UUID NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
//!     assignee_id UUID REFERENCES users(id) ON DELETE SET NULL,
//!     due_date TIMESTAMPTZ,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use kanbanflow_shared::models::card::{Card, CreateCard};
//! use sqlx::PgPool;
//! use uuid::Uuid;
//!
//! # async fn example(pool: PgPool, list_id: Uuid) -> Result<(), sqlx::Error> {
//! let card = Card::create(&pool, CreateCard {
//!     title: "Write release notes".to_string(),
//!     description: None,
//!     list_id,
//!     assignee_id: None,
//!     due_date: None,
//! }).await?;
//!
//! assert!(card.position >= 1);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Card model representing a work item in a list
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Card {
    /// Unique card ID (UUID v4)
    pub id: Uuid,

    /// Card title
    pub title: String,

    /// Card description (empty string when not provided)
    pub description: String,

    /// 1-based ordinal within the list
    pub position: i32,

    /// List this card belongs to
    pub list_id: Uuid,

    /// Assigned user, if any
    ///
    /// Set to NULL by the database when the assignee's account is deleted
    pub assignee_id: Option<Uuid>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// When the card was created
    pub created_at: DateTime<Utc>,

    /// When the card was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCard {
    /// Card title
    pub title: String,

    /// Optional description (defaults to empty)
    pub description: Option<String>,

    /// List to append the card to
    pub list_id: Uuid,

    /// Optional assignee
    pub assignee_id: Option<Uuid>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
}

/// Input for updating an existing card
///
/// All fields are optional. Only non-None fields will be updated. For the
/// nullable columns, use `Some(None)` to clear the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCard {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New assignee (use Some(None) to clear)
    pub assignee_id: Option<Option<Uuid>>,

    /// New due date (use Some(None) to clear)
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl Card {
    /// Creates a new card at the end of a list
    ///
    /// The position is computed as `MAX(position) + 1` over the list's
    /// cards (1 for the first card). The parent list row is locked for the
    /// duration of the transaction; concurrent creates for the same list
    /// queue on that lock, so two cards never compute the same position.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error::RowNotFound` if the list doesn't exist
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use kanbanflow_shared::models::card::{Card, CreateCard};
    /// # use sqlx::PgPool;
    /// # use uuid::Uuid;
    /// # async fn example(pool: PgPool, list_id: Uuid) -> Result<(), sqlx::Error> {
    /// let card = Card::create(&pool, CreateCard {
    ///     title: "Fix login redirect".to_string(),
    ///     description: Some("Repro steps in #142".to_string()),
    ///     list_id,
    ///     assignee_id: None,
    ///     due_date: None,
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &PgPool, data: CreateCard) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Lock the parent list row for the position computation
        let _list_id: Uuid = sqlx::query_scalar("SELECT id FROM lists WHERE id = $1 FOR UPDATE")
            .bind(data.list_id)
            .fetch_one(&mut *tx)
            .await?;

        let next_position: i32 =
            sqlx::query_scalar("SELECT COALESCE(MAX(position), 0) + 1 FROM cards WHERE list_id = $1")
                .bind(data.list_id)
                .fetch_one(&mut *tx)
                .await?;

        let card = sqlx::query_as::<_, Card>(
            r#"
            INSERT INTO cards (title, description, position, list_id, assignee_id, due_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, position, list_id, assignee_id, due_date,
                      created_at, updated_at
            "#,
        )
        .bind(&data.title)
        .bind(data.description.unwrap_or_default())
        .bind(next_position)
        .bind(data.list_id)
        .bind(data.assignee_id)
        .bind(data.due_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(card)
    }

    /// Finds a card by ID
    ///
    /// # Returns
    ///
    /// The card if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            SELECT id, title, description, position, list_id, assignee_id, due_date,
                   created_at, updated_at
            FROM cards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(card)
    }

    /// Lists all cards in a list, ordered by position
    pub async fn list_for_list(pool: &PgPool, list_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT id, title, description, position, list_id, assignee_id, due_date,
                   created_at, updated_at
            FROM cards
            WHERE list_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(list_id)
        .fetch_all(pool)
        .await?;

        Ok(cards)
    }

    /// Lists all cards across a set of lists in one query
    ///
    /// Results are ordered by list and then by position, so callers can
    /// group them without re-sorting.
    pub async fn list_for_lists(pool: &PgPool, list_ids: &[Uuid]) -> Result<Vec<Self>, sqlx::Error> {
        if list_ids.is_empty() {
            return Ok(Vec::new());
        }

        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT id, title, description, position, list_id, assignee_id, due_date,
                   created_at, updated_at
            FROM cards
            WHERE list_id = ANY($1)
            ORDER BY list_id, position ASC
            "#,
        )
        .bind(list_ids)
        .fetch_all(pool)
        .await?;

        Ok(cards)
    }

    /// Updates an existing card
    ///
    /// Only non-None fields in `data` will be updated. The `updated_at`
    /// timestamp is automatically set to the current time.
    ///
    /// # Returns
    ///
    /// The updated card if found, None if card doesn't exist
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use kanbanflow_shared::models::card::{Card, UpdateCard};
    /// # use sqlx::PgPool;
    /// # use uuid::Uuid;
    /// # async fn example(pool: PgPool, card_id: Uuid) -> Result<(), sqlx::Error> {
    /// let update = UpdateCard {
    ///     title: Some("New title".to_string()),
    ///     assignee_id: Some(None), // clear the assignee
    ///     ..Default::default()
    /// };
    ///
    /// Card::update(&pool, card_id, update).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateCard,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE cards SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.assignee_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", assignee_id = ${}", bind_count));
        }
        if data.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, title, description, position, list_id, assignee_id, \
             due_date, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Card>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(assignee_opt) = data.assignee_id {
            q = q.bind(assignee_opt);
        }
        if let Some(due_opt) = data.due_date {
            q = q.bind(due_opt);
        }

        let card = q.fetch_optional(pool).await?;

        Ok(card)
    }

    /// Overwrites a card's position
    ///
    /// The caller supplies the target ordinal directly; positions of other
    /// cards are not renumbered and duplicates are allowed.
    ///
    /// # Returns
    ///
    /// The updated card if found, None if card doesn't exist
    pub async fn set_position(
        pool: &PgPool,
        id: Uuid,
        position: i32,
    ) -> Result<Option<Self>, sqlx::Error> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            UPDATE cards
            SET position = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, position, list_id, assignee_id, due_date,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(position)
        .fetch_optional(pool)
        .await?;

        Ok(card)
    }

    /// Deletes a card by ID
    ///
    /// Positions of the remaining cards are not renumbered.
    ///
    /// # Returns
    ///
    /// True if card was deleted, false if card didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
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
    fn test_update_card_default() {
        let update = UpdateCard::default();
        assert!(update.title.is_none());
        assert!(update.description.is_none());
        assert!(update.assignee_id.is_none());
        assert!(update.due_date.is_none());
    }

    #[test]
    fn test_update_card_clearing_fields() {
        let update = UpdateCard {
            assignee_id: Some(None),
            due_date: Some(None),
            ..Default::default()
        };

        // Outer Some means "write this column", inner None means NULL
        assert_eq!(update.assignee_id, Some(None));
        assert_eq!(update.due_date, Some(None));
    }

    // Integration tests for database operations are in the API crate's tests/
}
