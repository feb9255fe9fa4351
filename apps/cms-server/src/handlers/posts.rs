//! Post list and editor endpoints.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use pharmacy_core::access::{post_create_access, post_edit_access};
use pharmacy_core::domain::Post;
use pharmacy_core::editor::{PostAuthor, PostEditor, SaveError, save_post};
use pharmacy_shared::dto::{
    PostFormRequest, PostSummary, SaveFailedBody, SaveResponse, ValidationErrorBody,
};

use super::views::{editor_form, editor_response, form_request, post_response, post_summary};
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::guard::see_other;
use crate::middleware::session::StaffSession;
use crate::observability::RequestId;
use crate::state::AppState;

/// GET /admin/posts
pub async fn list(state: web::Data<AppState>, _staff: StaffSession) -> AppResult<HttpResponse> {
    let posts: Vec<PostSummary> = state
        .repos
        .posts
        .list_all()
        .await?
        .iter()
        .map(post_summary)
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /admin/posts/new
pub async fn new_post(state: web::Data<AppState>, staff: StaffSession) -> AppResult<HttpResponse> {
    if let Some(location) = post_create_access(staff.role).redirect_location() {
        return Ok(see_other(location));
    }

    let categories = state.repos.categories.list().await?;
    let editor = PostEditor::new();

    Ok(HttpResponse::Ok().json(editor_response(
        &editor,
        &categories,
        staff.profile.display_name(),
    )))
}

/// POST /admin/posts
pub async fn create(
    state: web::Data<AppState>,
    staff: StaffSession,
    request_id: RequestId,
    body: web::Json<PostFormRequest>,
) -> AppResult<HttpResponse> {
    if let Some(location) = post_create_access(staff.role).redirect_location() {
        return Ok(see_other(location));
    }

    let author = PostAuthor {
        id: Some(staff.identity.user_id),
        name: staff.profile.display_name().to_string(),
    };

    Ok(submit(&state, PostEditor::new(), body.into_inner(), &author, &request_id).await)
}

/// GET /admin/posts/{id}/edit
pub async fn edit(
    state: web::Data<AppState>,
    staff: StaffSession,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;
    let access = post_edit_access(staff.identity.user_id, staff.role, &post);
    if let Some(location) = access.redirect_location() {
        return Ok(see_other(location));
    }

    let categories = state.repos.categories.list().await?;
    let editor = PostEditor::load(&post);

    Ok(HttpResponse::Ok().json(editor_response(&editor, &categories, &post.author_name)))
}

/// PUT /admin/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    staff: StaffSession,
    request_id: RequestId,
    path: web::Path<Uuid>,
    body: web::Json<PostFormRequest>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;
    let access = post_edit_access(staff.identity.user_id, staff.role, &post);
    if let Some(location) = access.redirect_location() {
        return Ok(see_other(location));
    }

    // Editing keeps the original author
    let author = PostAuthor {
        id: post.author_id.or(Some(staff.identity.user_id)),
        name: post.author_name.clone(),
    };

    let editor = PostEditor::load(&post);
    Ok(submit(&state, editor, body.into_inner(), &author, &request_id).await)
}

async fn find_post(state: &AppState, id: Uuid) -> AppResult<Post> {
    state
        .repos
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))
}

/// Apply `request` to `editor` and save it.
async fn submit(
    state: &AppState,
    mut editor: PostEditor,
    request: PostFormRequest,
    author: &PostAuthor,
    request_id: &RequestId,
) -> HttpResponse {
    let submitted = request.action;
    let (form, action) = editor_form(request);
    editor.apply(form);

    match save_post(state.repos.posts.as_ref(), &mut editor, action, author, Utc::now()).await {
        Ok(outcome) => {
            let body = SaveResponse {
                message: outcome.message().to_string(),
                redirect_to: outcome.redirect_to().to_string(),
                post: post_response(&outcome.post),
            };
            if outcome.created {
                HttpResponse::Created().json(body)
            } else {
                HttpResponse::Ok().json(body)
            }
        }
        Err(SaveError::Invalid(errors)) => {
            HttpResponse::UnprocessableEntity().json(ValidationErrorBody {
                message: errors.summary().unwrap_or_default(),
                fields: errors
                    .iter()
                    .map(|(field, message)| (field.as_str().to_string(), message.to_string()))
                    .collect(),
                focus: errors.focus().map(|f| f.as_str().to_string()),
                form: form_request(editor.form(), submitted),
            })
        }
        Err(err @ SaveError::Persistence(_)) => {
            HttpResponse::InternalServerError().json(SaveFailedBody {
                message: err.to_string(),
                request_id: request_id.as_str().to_string(),
                form: form_request(editor.form(), submitted),
            })
        }
    }
}
