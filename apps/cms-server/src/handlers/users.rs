//! User administration. The route guard keeps non-admins out.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use pharmacy_core::access::{RoleChange, check_role_change};
use pharmacy_core::domain::Role;
use pharmacy_shared::ApiResponse;
use pharmacy_shared::dto::{ProfileResponse, RoleUpdateRequest, UsersResponse};

use super::views::profile_response;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::StaffSession;
use crate::state::AppState;

/// GET /admin/users
pub async fn list(state: web::Data<AppState>, _staff: StaffSession) -> AppResult<HttpResponse> {
    let users: Vec<ProfileResponse> = state
        .repos
        .profiles
        .list()
        .await?
        .iter()
        .map(profile_response)
        .collect();

    Ok(HttpResponse::Ok().json(UsersResponse {
        users,
        roles: Role::ALL.iter().map(|r| r.as_str().to_string()).collect(),
    }))
}

/// PUT /admin/users/{id}/role
pub async fn update_role(
    state: web::Data<AppState>,
    staff: StaffSession,
    path: web::Path<Uuid>,
    body: web::Json<RoleUpdateRequest>,
) -> AppResult<HttpResponse> {
    let target_id = path.into_inner();
    let requested = Role::parse(&body.role)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown role: {}", body.role)))?;

    let target = state
        .repos
        .profiles
        .find_by_id(target_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {target_id} not found")))?;

    let change = check_role_change(
        staff.identity.user_id,
        staff.role,
        target_id,
        target.role,
        requested,
    )?;

    let (profile, message) = match change {
        RoleChange::Unchanged => (target, "Role unchanged"),
        RoleChange::Apply(role) => {
            let updated = state.repos.profiles.update_role(target_id, role).await?;
            tracing::info!(
                actor = %staff.identity.user_id,
                target = %target_id,
                role = role.as_str(),
                "Role updated"
            );
            (updated, "Role updated successfully")
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        profile_response(&profile),
        message,
    )))
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;

    use pharmacy_core::domain::Role;
    use pharmacy_shared::dto::UsersResponse;

    use crate::middleware::session::SESSION_COOKIE;
    use crate::state::test_support::{in_memory_state, sign_up};

    #[actix_web::test]
    async fn test_admin_lists_users_with_roles() {
        let state = in_memory_state();
        let (_, admin) = sign_up(&state, "admin@example.com", Some(Role::Admin)).await;
        sign_up(&state, "author@example.com", Some(Role::Author)).await;
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri("/admin/users")
            .cookie(Cookie::new(SESSION_COOKIE, admin))
            .to_request();
        let body: UsersResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.users.len(), 2);
        assert_eq!(body.roles, vec!["admin", "editor", "author", "viewer"]);
    }

    #[actix_web::test]
    async fn test_admin_changes_another_users_role() {
        let state = in_memory_state();
        let (_, admin) = sign_up(&state, "admin@example.com", Some(Role::Admin)).await;
        let (author_id, _) = sign_up(&state, "author@example.com", Some(Role::Author)).await;
        let app = test_app!(state.clone());

        let req = test::TestRequest::put()
            .uri(&format!("/admin/users/{author_id}/role"))
            .cookie(Cookie::new(SESSION_COOKIE, admin))
            .set_json(json!({ "role": "editor" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["data"]["role"], "editor");
        assert_eq!(body["message"], "Role updated successfully");
        let stored = state.repos.profiles.find_by_id(author_id).await.unwrap().unwrap();
        assert_eq!(stored.role, Some(Role::Editor));
    }

    #[actix_web::test]
    async fn test_admin_cannot_change_own_role() {
        let state = in_memory_state();
        let (admin_id, admin) = sign_up(&state, "admin@example.com", Some(Role::Admin)).await;
        let app = test_app!(state.clone());

        let req = test::TestRequest::put()
            .uri(&format!("/admin/users/{admin_id}/role"))
            .cookie(Cookie::new(SESSION_COOKIE, admin.clone()))
            .set_json(json!({ "role": "viewer" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["detail"], "You cannot change your own role");

        // Re-selecting the current role is a no-op
        let req = test::TestRequest::put()
            .uri(&format!("/admin/users/{admin_id}/role"))
            .cookie(Cookie::new(SESSION_COOKIE, admin))
            .set_json(json!({ "role": "admin" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Role unchanged");

        let stored = state.repos.profiles.find_by_id(admin_id).await.unwrap().unwrap();
        assert_eq!(stored.role, Some(Role::Admin));
    }

    #[actix_web::test]
    async fn test_unknown_role_is_rejected() {
        let state = in_memory_state();
        let (_, admin) = sign_up(&state, "admin@example.com", Some(Role::Admin)).await;
        let (author_id, _) = sign_up(&state, "author@example.com", Some(Role::Author)).await;
        let app = test_app!(state);

        let req = test::TestRequest::put()
            .uri(&format!("/admin/users/{author_id}/role"))
            .cookie(Cookie::new(SESSION_COOKIE, admin))
            .set_json(json!({ "role": "superuser" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
