//! HTTP handlers and route configuration.

/// Full application over `$state`, for handler tests.
#[cfg(test)]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .configure(crate::handlers::configure_routes),
        )
        .await
    };
}

mod auth;
mod blog;
mod dashboard;
mod health;
mod images;
mod posts;
mod users;
mod views;

use actix_web::web;

use pharmacy_core::images::MAX_IMAGE_BYTES;

use crate::middleware::guard::RouteGuard;
use crate::middleware::session::SessionResolver;

/// Raw upload bodies may exceed the image limit so oversized files get the friendly message.
const UPLOAD_BODY_LIMIT: usize = 2 * MAX_IMAGE_BYTES;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/blog")
                    .route("", web::get().to(blog::list))
                    .route("/slugs", web::get().to(blog::slugs))
                    .route("/{slug}", web::get().to(blog::show)),
            ),
    )
    .route(
        "/storage/v1/object/public/{bucket}/{path:.*}",
        web::get().to(images::serve_local),
    )
    // Outside the guard so a session without a profile can still be cleared
    .route("/admin/logout", web::post().to(auth::logout))
    .service(
        // Admin routes - every request passes the route guard
        web::scope("/admin")
            .wrap(RouteGuard)
            .wrap(SessionResolver)
            .route("", web::get().to(dashboard::index))
            .service(
                web::resource("/login")
                    .route(web::get().to(auth::login_page))
                    .route(web::post().to(auth::login)),
            )
            .route("/dashboard", web::get().to(dashboard::show))
            .service(
                web::resource("/posts")
                    .route(web::get().to(posts::list))
                    .route(web::post().to(posts::create)),
            )
            .route("/posts/new", web::get().to(posts::new_post))
            .route("/posts/{id}/edit", web::get().to(posts::edit))
            .route("/posts/{id}", web::put().to(posts::update))
            .route("/users", web::get().to(users::list))
            .route("/users/{id}/role", web::put().to(users::update_role))
            .service(
                web::resource("/images")
                    .app_data(web::PayloadConfig::new(UPLOAD_BODY_LIMIT))
                    .route(web::post().to(images::upload)),
            )
            .route("/images/url", web::post().to(images::from_url))
            .route("/images/remove", web::post().to(images::remove)),
    );
}
