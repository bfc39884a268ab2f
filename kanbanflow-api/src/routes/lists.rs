//! List endpoints
//!
//! Lists are the ordered columns of a board. Routes addressed by board id
//! live under `/api/boards/:id/lists`; routes addressed by list id resolve
//! the list's board first and authorize against that.
//!
//! # Endpoints
//!
//! - `GET /api/boards/:id/lists` - Lists with cards, in position order
//! - `POST /api/boards/:id/lists` - Create list (owner/editor)
//! - `PUT /api/lists/:id` - Update list title (owner/editor)
//! - `DELETE /api/lists/:id` - Delete list (owner/editor)
//! - `PUT /api/lists/:id/position` - Move list (owner/editor)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use kanbanflow_shared::{
    auth::{
        authorization::{require_membership, require_role},
        middleware::AuthContext,
    },
    models::{
        board_member::BoardRole,
        list::{CreateList, List, ListWithCards, UpdateList},
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create list request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateListRequest {
    /// List title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
}

/// Update list request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateListRequest {
    /// New title (absent leaves the title unchanged)
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
}

/// Position update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePositionRequest {
    /// Target 1-based ordinal
    #[validate(range(min = 1, message = "Position must be at least 1"))]
    pub position: i32,
}

/// Delete list response
#[derive(Debug, Serialize)]
pub struct DeleteListResponse {
    /// Whether the list was deleted
    pub deleted: bool,
}

/// List lists with their cards
///
/// Returns the board's lists in position order, each with its cards in
/// position order. Requires membership (any role).
///
/// # Endpoint
///
/// ```text
/// GET /api/boards/:id/lists
/// Authorization: Bearer <jwt_token>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `403 Forbidden`: Caller is not a member of the board
/// - `500 Internal Server Error`: Server error
pub async fn list_lists(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<Uuid>,
) -> ApiResult<Json<Vec<ListWithCards>>> {
    require_membership(&state.db, board_id, auth.user_id).await?;

    let lists = List::list_with_cards(&state.db, board_id).await?;

    Ok(Json(lists))
}

/// Create list
///
/// Appends a new list at the end of the board. The position is computed
/// atomically under a row lock on the board, so concurrent creates never
/// collide. Requires owner or editor role.
///
/// # Endpoint
///
/// ```text
/// POST /api/boards/:id/lists
/// Authorization: Bearer <jwt_token>
/// Content-Type: application/json
///
/// {
///   "title": "In Progress"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `403 Forbidden`: Insufficient role
/// - `500 Internal Server Error`: Server error
pub async fn create_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<Uuid>,
    payload: Result<Json<CreateListRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<List>)> {
    let Json(req) = payload?;
    req.validate()?;

    require_role(&state.db, board_id, auth.user_id, BoardRole::Editor).await?;

    let list = List::create(
        &state.db,
        CreateList {
            title: req.title,
            board_id,
        },
    )
    .await?;

    tracing::info!(list_id = %list.id, board_id = %board_id, position = list.position, "List created");

    Ok((StatusCode::CREATED, Json(list)))
}

/// Update list
///
/// Partially updates the list's title. The board is resolved from the list
/// before authorization. Requires owner or editor role.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `403 Forbidden`: Insufficient role
/// - `404 Not Found`: List not found
pub async fn update_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateListRequest>, JsonRejection>,
) -> ApiResult<Json<List>> {
    let Json(req) = payload?;
    req.validate()?;

    let list = List::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    require_role(&state.db, list.board_id, auth.user_id, BoardRole::Editor).await?;

    let list = List::update(&state.db, id, UpdateList { title: req.title })
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    Ok(Json(list))
}

/// Delete list
///
/// Deletes the list and its cards. Positions of the remaining lists are
/// not renumbered. Requires owner or editor role.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `403 Forbidden`: Insufficient role
/// - `404 Not Found`: List not found
pub async fn delete_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteListResponse>> {
    let list = List::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    require_role(&state.db, list.board_id, auth.user_id, BoardRole::Editor).await?;

    let deleted = List::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("List not found".to_string()));
    }

    Ok(Json(DeleteListResponse { deleted }))
}

/// Move list
///
/// Overwrites the list's position with the supplied ordinal. Sibling
/// positions are not renumbered; the client owns the ordering scheme.
/// Requires owner or editor role.
///
/// # Endpoint
///
/// ```text
/// PUT /api/lists/:id/position
/// Authorization: Bearer <jwt_token>
/// Content-Type: application/json
///
/// {
///   "position": 3
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Position below 1
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `403 Forbidden`: Insufficient role
/// - `404 Not Found`: List not found
pub async fn update_list_position(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdatePositionRequest>, JsonRejection>,
) -> ApiResult<Json<List>> {
    let Json(req) = payload?;
    req.validate()?;

    let list = List::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    require_role(&state.db, list.board_id, auth.user_id, BoardRole::Editor).await?;

    let list = List::set_position(&state.db, id, req.position)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    Ok(Json(list))
}
