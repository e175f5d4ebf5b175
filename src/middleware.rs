use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    cookie::{Cookie, SameSite},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use uuid::Uuid;

use crate::errors::AppError;

pub const SESSION_COOKIE: &str = "quiz_session";

/// Gives every browser a quiz session id, issuing the cookie on first contact.
pub struct SessionCookieMiddleware;

impl<S, B> Transform<S, ServiceRequest> for SessionCookieMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionCookieMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionCookieMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionCookieMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionCookieMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let existing = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());
        let session_id = existing.unwrap_or_else(Uuid::new_v4);
        req.extensions_mut().insert(QuizSessionId(session_id));

        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let mut res = service.call(req).await?;

            if existing.is_none() {
                log::debug!("Issuing quiz session {}", session_id);
                let mut cookie = Cookie::new(SESSION_COOKIE, session_id.to_string());
                cookie.set_path("/");
                cookie.set_http_only(true);
                cookie.set_same_site(SameSite::Lax);
                if let Err(err) = res.response_mut().add_cookie(&cookie) {
                    log::warn!("Failed to set session cookie: {}", err);
                }
            }

            Ok(res.map_into_left_body())
        })
    }
}

/// Extractor for the caller's quiz session id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizSessionId(pub Uuid);

impl FromRequest for QuizSessionId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let id = req
            .extensions()
            .get::<QuizSessionId>()
            .copied()
            .ok_or_else(|| {
                AppError::InternalError("Session middleware is not installed".to_string())
            });

        ready(id)
    }
}
