//! Sign-in and sign-out for the admin area.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpResponse, web};
use serde::Serialize;

use pharmacy_core::access::{DASHBOARD_PATH, LOGIN_PATH};
use pharmacy_core::domain::{Credential, Profile};
use pharmacy_core::error::RepoError;
use pharmacy_core::ports::AuthError;
use pharmacy_shared::dto::{LoginRequest, SessionResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::guard::see_other;
use crate::middleware::session::SESSION_COOKIE;
use crate::state::AppState;

#[derive(Serialize)]
pub struct LoginPage {
    pub title: &'static str,
    pub action: &'static str,
}

/// GET /admin/login
pub async fn login_page() -> HttpResponse {
    HttpResponse::Ok().json(LoginPage {
        title: "Admin Login",
        action: LOGIN_PATH,
    })
}

/// POST /admin/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = req.email.trim();

    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    // Unknown email and wrong password answer the same way
    let credential = state
        .repos
        .credentials
        .find_by_email(email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !state
        .passwords
        .verify(&req.password, &credential.password_hash)?
    {
        tracing::info!(user_id = %credential.id, "Rejected sign-in");
        return Err(AuthError::InvalidCredentials.into());
    }

    let profile = ensure_profile(&state, &credential).await?;

    let token = state
        .tokens
        .generate_token(credential.id, &credential.email)?;
    let expires_in = state.tokens.expiration_seconds();

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(state.session.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(expires_in))
        .finish();

    tracing::info!(user_id = %credential.id, "Signed in");

    Ok(HttpResponse::Ok().cookie(cookie).json(SessionResponse {
        user_id: credential.id,
        email: credential.email,
        role: profile.role.map(|r| r.as_str().to_string()),
        expires_in,
        redirect_to: DASHBOARD_PATH.to_string(),
    }))
}

/// The profile of `credential`, created as a viewer on first sign-in.
async fn ensure_profile(state: &AppState, credential: &Credential) -> AppResult<Profile> {
    if let Some(profile) = state.repos.profiles.find_by_id(credential.id).await? {
        return Ok(profile);
    }

    let profile = Profile::new(credential.id, credential.email.clone());
    match state.repos.profiles.insert(profile).await {
        Ok(created) => {
            tracing::info!(user_id = %created.id, "Created viewer profile");
            Ok(created)
        }
        // Concurrent first sign-in created it first
        Err(RepoError::Constraint(_)) => state
            .repos
            .profiles
            .find_by_id(credential.id)
            .await?
            .ok_or_else(|| AppError::Internal("Profile missing after conflict".to_string())),
        Err(e) => Err(e.into()),
    }
}

/// POST /admin/logout
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();

    let mut response = see_other(LOGIN_PATH);
    if let Err(e) = response.add_cookie(&cookie) {
        tracing::warn!(error = %e, "Failed to clear session cookie");
    }
    response
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use serde_json::json;

    use pharmacy_core::domain::Role;

    use super::*;
    use crate::state::test_support::{TEST_PASSWORD, in_memory_state, sign_up};

    #[actix_web::test]
    async fn test_login_sets_session_cookie() {
        let state = in_memory_state();
        sign_up(&state, "editor@example.com", Some(Role::Editor)).await;
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/admin/login")
            .set_json(json!({ "email": "editor@example.com", "password": TEST_PASSWORD }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("session cookie");
        assert_eq!(cookie.http_only(), Some(true));

        let body: SessionResponse = test::read_body_json(res).await;
        assert_eq!(body.role.as_deref(), Some("editor"));
        assert_eq!(body.redirect_to, DASHBOARD_PATH);
    }

    #[actix_web::test]
    async fn test_first_sign_in_creates_viewer_profile() {
        let state = in_memory_state();
        let (id, _) = sign_up(&state, "new@example.com", None).await;
        let app = test_app!(state.clone());

        let req = test::TestRequest::post()
            .uri("/admin/login")
            .set_json(json!({ "email": "new@example.com", "password": TEST_PASSWORD }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let profile = state.repos.profiles.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(profile.role, Some(Role::Viewer));
    }

    #[actix_web::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let state = in_memory_state();
        sign_up(&state, "author@example.com", Some(Role::Author)).await;
        let app = test_app!(state);

        for (email, password) in [
            ("author@example.com", "wrong password"),
            ("nobody@example.com", TEST_PASSWORD),
        ] {
            let req = test::TestRequest::post()
                .uri("/admin/login")
                .set_json(json!({ "email": email, "password": password }))
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

            let body: serde_json::Value = test::read_body_json(res).await;
            assert_eq!(body["detail"], "Invalid credentials");
        }
    }

    #[actix_web::test]
    async fn test_logout_clears_cookie_and_redirects() {
        let state = in_memory_state();
        let (_, token) = sign_up(&state, "author@example.com", Some(Role::Author)).await;
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/admin/logout")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), LOGIN_PATH);
        let cleared = res
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("removal cookie");
        assert_eq!(cleared.value(), "");
    }

    #[actix_web::test]
    async fn test_logout_works_for_session_without_profile() {
        let state = in_memory_state();
        let (_, token) = sign_up(&state, "pending@example.com", None).await;
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/admin/logout")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), LOGIN_PATH);
        assert!(res.response().cookies().any(|c| c.name() == SESSION_COOKIE));
    }
}
