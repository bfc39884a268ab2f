//! Board endpoints
//!
//! This module provides CRUD endpoints for boards and board membership.
//! All endpoints require JWT authentication; per-board access is decided
//! by the caller's membership role.
//!
//! # Endpoints
//!
//! - `GET /api/boards` - List boards the caller belongs to
//! - `POST /api/boards` - Create board (caller becomes owner)
//! - `GET /api/boards/:id` - Board with nested lists and cards
//! - `PUT /api/boards/:id` - Update board (owner/editor)
//! - `DELETE /api/boards/:id` - Delete board (owner)
//! - `GET /api/boards/:id/members` - List members
//! - `POST /api/boards/:id/members` - Add member (owner)

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
        board::{Board, CreateBoard, UpdateBoard},
        board_member::{BoardMember, BoardMemberInfo, BoardRole, CreateBoardMember},
        list::{List, ListWithCards},
        user::User,
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create board request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBoardRequest {
    /// Board title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional description
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

/// Update board request
///
/// Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBoardRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    /// New description
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

/// Board with nested lists and cards
#[derive(Debug, Serialize)]
pub struct BoardDetailResponse {
    /// Board fields
    #[serde(flatten)]
    pub board: Board,

    /// Lists in position order, each with its cards
    pub lists: Vec<ListWithCards>,
}

/// Add member request
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    /// User to add
    pub user_id: Uuid,

    /// Role to grant (defaults to viewer; owner is not grantable)
    #[serde(default = "default_member_role")]
    pub role: BoardRole,
}

fn default_member_role() -> BoardRole {
    BoardRole::Viewer
}

/// Delete board response
#[derive(Debug, Serialize)]
pub struct DeleteBoardResponse {
    /// Whether the board was deleted
    pub deleted: bool,
}

/// List boards
///
/// Returns all boards the authenticated user is a member of, newest first.
///
/// # Endpoint
///
/// ```text
/// GET /api/boards
/// Authorization: Bearer <jwt_token>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `500 Internal Server Error`: Server error
pub async fn list_boards(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Board>>> {
    let boards = Board::list_for_user(&state.db, auth.user_id).await?;

    Ok(Json(boards))
}

/// Create board
///
/// Creates a new board and adds the caller as its owner member in the same
/// transaction.
///
/// # Endpoint
///
/// ```text
/// POST /api/boards
/// Authorization: Bearer <jwt_token>
/// Content-Type: application/json
///
/// {
///   "title": "Sprint 1",
///   "description": "Current sprint work"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": "uuid",
///   "title": "Sprint 1",
///   "description": "Current sprint work",
///   "owner_id": "uuid",
///   "created_at": "2025-09-01T12:00:00Z",
///   "updated_at": "2025-09-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `500 Internal Server Error`: Server error
pub async fn create_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<CreateBoardRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Board>)> {
    let Json(req) = payload?;
    req.validate()?;

    let board = Board::create(
        &state.db,
        auth.user_id,
        CreateBoard {
            title: req.title,
            description: req.description,
        },
    )
    .await?;

    tracing::info!(board_id = %board.id, owner_id = %auth.user_id, "Board created");

    Ok((StatusCode::CREATED, Json(board)))
}

/// Get board with lists and cards
///
/// Returns the board along with its lists in position order, each list
/// carrying its cards in position order. Requires membership (any role).
///
/// # Endpoint
///
/// ```text
/// GET /api/boards/:id
/// Authorization: Bearer <jwt_token>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `403 Forbidden`: Caller is not a member of the board
/// - `404 Not Found`: Board not found
pub async fn get_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BoardDetailResponse>> {
    require_membership(&state.db, id, auth.user_id).await?;

    let board = Board::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?;

    let lists = List::list_with_cards(&state.db, id).await?;

    Ok(Json(BoardDetailResponse { board, lists }))
}

/// Update board
///
/// Partially updates title and/or description. Absent fields keep their
/// stored values. Requires owner or editor role.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `403 Forbidden`: Insufficient role
/// - `404 Not Found`: Board not found
pub async fn update_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateBoardRequest>, JsonRejection>,
) -> ApiResult<Json<Board>> {
    let Json(req) = payload?;
    req.validate()?;

    require_role(&state.db, id, auth.user_id, BoardRole::Editor).await?;

    let board = Board::update(
        &state.db,
        id,
        UpdateBoard {
            title: req.title,
            description: req.description,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?;

    Ok(Json(board))
}

/// Delete board
///
/// Deletes the board along with its memberships, lists, and cards.
/// Requires the owner role.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `403 Forbidden`: Caller is not the board's owner
/// - `404 Not Found`: Board not found
pub async fn delete_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteBoardResponse>> {
    require_role(&state.db, id, auth.user_id, BoardRole::Owner).await?;

    let deleted = Board::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Board not found".to_string()));
    }

    tracing::info!(board_id = %id, user_id = %auth.user_id, "Board deleted");

    Ok(Json(DeleteBoardResponse { deleted }))
}

/// List board members
///
/// Returns all members with their email, name, and role, ordered by join
/// time. Requires membership (any role).
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `403 Forbidden`: Caller is not a member of the board
/// - `500 Internal Server Error`: Server error
pub async fn list_members(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<BoardMemberInfo>>> {
    require_membership(&state.db, id, auth.user_id).await?;

    let members = BoardMember::list_for_board(&state.db, id).await?;

    Ok(Json(members))
}

/// Add board member
///
/// Grants another user access to the board. Only the owner can add
/// members, and only the editor and viewer roles can be granted; a board
/// has exactly one owner, fixed at creation.
///
/// # Endpoint
///
/// ```text
/// POST /api/boards/:id/members
/// Authorization: Bearer <jwt_token>
/// Content-Type: application/json
///
/// {
///   "user_id": "uuid",
///   "role": "viewer"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "board_id": "uuid",
///   "user_id": "uuid",
///   "role": "viewer",
///   "joined_at": "2025-09-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Owner role requested
/// - `401 Unauthorized`: Missing or invalid JWT token
/// - `403 Forbidden`: Caller is not the board's owner
/// - `404 Not Found`: Target user not found
/// - `409 Conflict`: User is already a member
pub async fn add_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    payload: Result<Json<AddMemberRequest>, JsonRejection>,
) -> ApiResult<Json<BoardMember>> {
    let Json(req) = payload?;

    require_role(&state.db, id, auth.user_id, BoardRole::Owner).await?;

    if !req.role.is_grantable() {
        return Err(ApiError::BadRequest(
            "The owner role cannot be granted".to_string(),
        ));
    }

    // Verify the target user exists so a bad id gives 404 instead of a
    // foreign key error
    User::find_by_id(&state.db, req.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let member = BoardMember::create(
        &state.db,
        CreateBoardMember {
            board_id: id,
            user_id: req.user_id,
            role: req.role,
        },
    )
    .await?;

    tracing::info!(
        board_id = %id,
        member_id = %req.user_id,
        role = member.role.as_str(),
        "Member added to board"
    );

    Ok(Json(member))
}
