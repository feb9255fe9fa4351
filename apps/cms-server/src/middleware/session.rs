//! Session resolution - identity from the session token, role from the profile.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
    web,
};

use pharmacy_core::access::SessionIdentity;
use pharmacy_core::domain::{Profile, Role};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Name of the HTTP-only session cookie.
pub const SESSION_COOKIE: &str = "cms_session";

/// Who is making the request, resolved once per request.
///
/// Every failure along the way leaves the corresponding part empty.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub identity: Option<SessionIdentity>,
    pub profile: Option<Profile>,
}

impl SessionContext {
    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().and_then(|p| p.role)
    }
}

/// Session token from the cookie, falling back to a Bearer header.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// Validate `token` and look up the profile behind it.
pub async fn resolve(state: &AppState, token: Option<&str>) -> SessionContext {
    let Some(token) = token else {
        return SessionContext::default();
    };

    let claims = match state.tokens.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid session token");
            return SessionContext::default();
        }
    };

    let identity = SessionIdentity {
        user_id: claims.user_id,
        email: claims.email,
    };

    let profile = match state.repos.profiles.find_by_id(identity.user_id).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(user_id = %identity.user_id, error = %e, "Profile lookup failed");
            None
        }
    };

    SessionContext {
        identity: Some(identity),
        profile,
    }
}

/// Middleware that resolves the [`SessionContext`] and stores it in request extensions.
pub struct SessionResolver;

impl<S, B> Transform<S, ServiceRequest> for SessionResolver
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionResolverService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionResolverService {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionResolverService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionResolverService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = session_token(req.request());
            let context = match req.app_data::<web::Data<AppState>>().cloned() {
                Some(state) => resolve(&state, token.as_deref()).await,
                None => {
                    tracing::error!("AppState not found in app data");
                    SessionContext::default()
                }
            };

            req.extensions_mut().insert(context);
            service.call(req).await
        })
    }
}

impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(req
            .extensions()
            .get::<SessionContext>()
            .cloned()
            .unwrap_or_default()))
    }
}

/// A signed-in user with a profile and a known role.
#[derive(Debug, Clone)]
pub struct StaffSession {
    pub identity: SessionIdentity,
    pub profile: Profile,
    pub role: Role,
}

impl FromRequest for StaffSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let context = req.extensions().get::<SessionContext>().cloned();

        let staff = context.and_then(|ctx| {
            let role = ctx.role()?;
            Some(StaffSession {
                identity: ctx.identity?,
                profile: ctx.profile?,
                role,
            })
        });

        ready(staff.ok_or_else(|| AppError::Unauthorized("Sign in required".to_string())))
    }
}
