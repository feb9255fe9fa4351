//! Public blog endpoints. Only live posts are visible here.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use pharmacy_core::domain::BlogPost;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/blog
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<BlogPost> = state
        .repos
        .posts
        .list_published(Utc::now())
        .await?
        .into_iter()
        .map(BlogPost::from)
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/blog/{slug}
pub async fn show(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let post = state
        .repos
        .posts
        .find_by_slug(&slug)
        .await?
        .filter(|p| p.is_live(Utc::now()))
        .ok_or_else(|| AppError::NotFound(format!("Post {slug} not found")))?;

    Ok(HttpResponse::Ok().json(BlogPost::from(post)))
}

/// GET /api/blog/slugs
pub async fn slugs(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let slugs = state.repos.posts.published_slugs(Utc::now()).await?;
    Ok(HttpResponse::Ok().json(slugs))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::Duration;
    use uuid::Uuid;

    use pharmacy_core::domain::{Post, PostStatus, SeoOverrides};

    use crate::state::test_support::in_memory_state;

    fn post(slug: &str, status: PostStatus, published_in: Option<Duration>) -> Post {
        let now = chrono::Utc::now();
        Post {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            excerpt: "Excerpt".to_string(),
            content: "<p>Body</p>".to_string(),
            published_at: published_in.map(|d| now + d),
            author_id: None,
            author_name: "Pharmacist".to_string(),
            category: "Health Tips".to_string(),
            featured_image: None,
            read_time: None,
            status,
            seo: SeoOverrides::default(),
            created_at: now,
            updated_at: now,
        }
    }

    #[actix_web::test]
    async fn test_only_live_posts_are_public() {
        let state = in_memory_state();
        let posts = &state.repos.posts;
        posts
            .insert(post("live", PostStatus::Published, Some(-Duration::hours(1))))
            .await
            .unwrap();
        posts
            .insert(post("scheduled", PostStatus::Published, Some(Duration::days(1))))
            .await
            .unwrap();
        posts.insert(post("draft", PostStatus::Draft, None)).await.unwrap();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/api/blog").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let listed: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["slug"].as_str())
            .collect();
        assert_eq!(listed, vec!["live"]);
        assert_eq!(body[0]["image"], "/placeholder.svg");
        assert_eq!(body[0]["read_time"], "5 min read");

        let req = test::TestRequest::get().uri("/api/blog/live").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        for hidden in ["/api/blog/draft", "/api/blog/scheduled", "/api/blog/missing"] {
            let req = test::TestRequest::get().uri(hidden).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "{hidden}");
        }
    }

    #[actix_web::test]
    async fn test_slugs_route_is_not_a_post_lookup() {
        let state = in_memory_state();
        state
            .repos
            .posts
            .insert(post("flu-season", PostStatus::Published, Some(-Duration::hours(1))))
            .await
            .unwrap();
        state
            .repos
            .posts
            .insert(post("scheduled", PostStatus::Published, Some(Duration::days(1))))
            .await
            .unwrap();
        state
            .repos
            .posts
            .insert(post("draft", PostStatus::Draft, None))
            .await
            .unwrap();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/api/blog/slugs").to_request();
        let body: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, vec!["flu-season".to_string()]);
    }
}
