//! Card endpoints
//!
//! Cards live inside lists, so card routes resolve card -> list -> board
//! before authorizing against the board. Routes addressed by list id live
//! under `/api/lists/:id/cards`.
//!
//! # Endpoints
//!
//! - `GET /api/lists/:id/cards` - Cards in position order
//! - `POST /api/lists/:id/cards` - Create card (owner/editor)
//! - `PUT /api/cards/:id` - Update card (owner/editor)
//! - `DELETE /api/cards/:id` - Delete card (owner/editor)
//! - `PUT /api/cards/:id/position` - Move card (owner/editor)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use kanbanflow_shared::{
    auth::{
        authorization::{require_membership, require_role},
        middleware::AuthContext,
    },
    models::{
        board_member::BoardRole,
        card::{Card, CreateCard, UpdateCard},
        list::List,
    },
};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Create card request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCardRequest {
    /// Card title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional description
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// Optional assignee
    pub assignee_id: Option<Uuid>,

    /// Optional due date (ISO 8601)
    pub due_date: Option<DateTime<Utc>>,
}

/// Update card request
///
/// Absent fields are left unchanged. For the nullable fields, an explicit
/// `null` clears the stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCardRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    /// New description
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// New assignee (null clears)
    #[serde(default, deserialize_with = "double_option")]
    pub assignee_id: Option<Option<Uuid>>,

    /// New due date (null clears)
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// Position update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCardPositionRequest {
    /// Target 1-based ordinal
    #[validate(range(min = 1, message = "Position must be at least 1"))]
    pub position: i32,
}

/// Delete card response
#[derive(Debug, Serialize)]
pub struct DeleteCardResponse {
    /// Whether the card was deleted
    pub deleted: bool,
}

/// Distinguishes a field set to `null` (Some(None)) from an absent field
/// (None, via serde's default)
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Resolves the board a card belongs to via its list
async fn board_of_card(db: &PgPool, card: &Card) -> Result<Uuid, ApiError> {
    let list = List::find_by_id(db, card.list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    Ok(list.board_id)
}

/// List cards
///
/// Returns the list's cards in position order. Requires membership on the
/// list's board (any role).
///
/// # Endpoint
///
/// ```text
/// GET /api/lists/:id/cards
/// Authorization: Bearer <jwt_token>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `403 Forbidden`: Caller is not a member of the board
/// - `404 Not Found`: List not found
pub async fn list_cards(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(list_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Card>>> {
    let list = List::find_by_id(&state.db, list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    require_membership(&state.db, list.board_id, auth.user_id).await?;

    let cards = Card::list_for_list(&state.db, list_id).await?;

    Ok(Json(cards))
}

/// Create card
///
/// Appends a new card at the end of the list. The position is computed
/// atomically under a row lock on the list. Requires owner or editor role
/// on the list's board.
///
/// # Endpoint
///
/// ```text
/// POST /api/lists/:id/cards
/// Authorization: Bearer <jwt_token>
/// Content-Type: application/json
///
/// {
///   "title": "Fix login redirect",
///   "description": "Repro steps in the bug tracker",
///   "assignee_id": "uuid",
///   "due_date": "2025-09-15T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or unknown assignee
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `403 Forbidden`: Insufficient role
/// - `404 Not Found`: List not found
pub async fn create_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(list_id): Path<Uuid>,
    payload: Result<Json<CreateCardRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Card>)> {
    let Json(req) = payload?;
    req.validate()?;

    let list = List::find_by_id(&state.db, list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    require_role(&state.db, list.board_id, auth.user_id, BoardRole::Editor).await?;

    let card = Card::create(
        &state.db,
        CreateCard {
            title: req.title,
            description: req.description,
            list_id,
            assignee_id: req.assignee_id,
            due_date: req.due_date,
        },
    )
    .await?;

    tracing::info!(card_id = %card.id, list_id = %list_id, position = card.position, "Card created");

    Ok((StatusCode::CREATED, Json(card)))
}

/// Update card
///
/// Partially updates the card. Absent fields keep their values; explicit
/// `null` clears `assignee_id` or `due_date`. Requires owner or editor
/// role on the card's board.
///
/// # Endpoint
///
/// ```text
/// PUT /api/cards/:id
/// Authorization: Bearer <jwt_token>
/// Content-Type: application/json
///
/// {
///   "title": "Fix login redirect (edge)",
///   "assignee_id": null
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or unknown assignee
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `403 Forbidden`: Insufficient role
/// - `404 Not Found`: Card not found
pub async fn update_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateCardRequest>, JsonRejection>,
) -> ApiResult<Json<Card>> {
    let Json(req) = payload?;
    req.validate()?;

    let card = Card::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    let board_id = board_of_card(&state.db, &card).await?;
    require_role(&state.db, board_id, auth.user_id, BoardRole::Editor).await?;

    let card = Card::update(
        &state.db,
        id,
        UpdateCard {
            title: req.title,
            description: req.description,
            assignee_id: req.assignee_id,
            due_date: req.due_date,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    Ok(Json(card))
}

/// Delete card
///
/// Positions of the remaining cards are not renumbered. Requires owner or
/// editor role on the card's board.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `403 Forbidden`: Insufficient role
/// - `404 Not Found`: Card not found
pub async fn delete_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteCardResponse>> {
    let card = Card::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    let board_id = board_of_card(&state.db, &card).await?;
    require_role(&state.db, board_id, auth.user_id, BoardRole::Editor).await?;

    let deleted = Card::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Card not found".to_string()));
    }

    Ok(Json(DeleteCardResponse { deleted }))
}

/// Move card
///
/// Overwrites the card's position with the supplied ordinal. Sibling
/// positions are not renumbered. Requires owner or editor role on the
/// card's board.
///
/// # Errors
///
/// - `400 Bad Request`: Position below 1
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `403 Forbidden`: Insufficient role
/// - `404 Not Found`: Card not found
pub async fn update_card_position(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateCardPositionRequest>, JsonRejection>,
) -> ApiResult<Json<Card>> {
    let Json(req) = payload?;
    req.validate()?;

    let card = Card::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    let board_id = board_of_card(&state.db, &card).await?;
    require_role(&state.db, board_id, auth.user_id, BoardRole::Editor).await?;

    let card = Card::set_position(&state.db, id, req.position)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    Ok(Json(card))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let req: UpdateCardRequest = serde_json::from_str(r#"{"assignee_id": null}"#).unwrap();
        assert_eq!(req.assignee_id, Some(None));
        assert!(req.due_date.is_none());

        let req: UpdateCardRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(req.assignee_id.is_none());
        assert!(req.due_date.is_none());
    }

    #[test]
    fn test_update_request_with_values() {
        let id = Uuid::new_v4();
        let req: UpdateCardRequest =
            serde_json::from_str(&format!(r#"{{"assignee_id": "{}"}}"#, id)).unwrap();
        assert_eq!(req.assignee_id, Some(Some(id)));
    }
}
