//! Admin dashboard.

use actix_web::{HttpRequest, HttpResponse, web};

use pharmacy_core::access::{DASHBOARD_PATH, navigation_for};
use pharmacy_core::domain::PostStatus;
use pharmacy_shared::dto::DashboardResponse;

use super::views::{nav_items, post_summary, profile_response};
use crate::middleware::error::AppResult;
use crate::middleware::guard::see_other;
use crate::middleware::session::StaffSession;
use crate::state::AppState;

const RECENT_POSTS: u64 = 5;

/// GET /admin
pub async fn index() -> HttpResponse {
    see_other(DASHBOARD_PATH)
}

/// GET /admin/dashboard
pub async fn show(
    req: HttpRequest,
    state: web::Data<AppState>,
    staff: StaffSession,
) -> AppResult<HttpResponse> {
    let posts = &state.repos.posts;
    let total_posts = posts.count(None).await?;
    let published_posts = posts.count(Some(PostStatus::Published)).await?;
    let draft_posts = posts.count(Some(PostStatus::Draft)).await?;
    let recent_posts = posts
        .recent(RECENT_POSTS)
        .await?
        .iter()
        .map(post_summary)
        .collect();

    Ok(HttpResponse::Ok().json(DashboardResponse {
        profile: profile_response(&staff.profile),
        navigation: nav_items(navigation_for(staff.role, req.path())),
        total_posts,
        published_posts,
        draft_posts,
        recent_posts,
    }))
}
