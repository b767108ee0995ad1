//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{Error, HttpResponse, test, web};

use crate::domain::UserId;
use crate::domain::ports::{
    MockCommentCommand, MockLoginService, MockPostCommand, MockPostQuery, MockProfileCommand,
    MockProfileQuery, MockReferenceDataQuery,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Mocked driving ports; set expectations, then turn them into state.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub posts: MockPostQuery,
    pub post_commands: MockPostCommand,
    pub comments: MockCommentCommand,
    pub profiles: MockProfileQuery,
    pub profile_commands: MockProfileCommand,
    pub reference_data: MockReferenceDataQuery,
}

impl MockPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            login: Arc::new(self.login),
            posts: Arc::new(self.posts),
            post_commands: Arc::new(self.post_commands),
            comments: Arc::new(self.comments),
            profiles: Arc::new(self.profiles),
            profile_commands: Arc::new(self.profile_commands),
            reference_data: Arc::new(self.reference_data),
        })
    }
}

/// Route that signs the caller in as `user_id`; mount it with
/// `.route("/test-login/{id}", web::get().to(sign_in))`.
pub async fn sign_in(
    session: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, crate::domain::Error> {
    let user_id = UserId::new(path.into_inner())
        .map_err(|err| crate::domain::Error::invalid_request(err.to_string()))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Obtain a session cookie for `user_id` from an app mounting [`sign_in`].
pub async fn session_cookie<S, B>(app: &S, user_id: &UserId) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = Error>,
    B: actix_web::body::MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/test-login/{user_id}"))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "test sign-in failed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}
