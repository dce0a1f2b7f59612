/// Session cookie accessors — the single owner of the `token`/`user` cookie
/// pair. No other module reads or writes these cookie names.
///
/// The two cookies are set together at login and cleared together at logout
/// or when the backend reports the token stale. A `user` cookie without a
/// `token` cookie is a logged-out state.
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::errors::AppError;
use crate::models::user::{SessionUser, UserType};

pub const TOKEN_COOKIE: &str = "token";
pub const USER_COOKIE: &str = "user";

pub const LOGIN_PATH: &str = "/auth/login";
pub const SEEKER_HOME: &str = "/dashboard";
pub const EMPLOYER_HOME: &str = "/employer-dashboard";

const SESSION_TTL: time::Duration = time::Duration::hours(24);

/// The current session as derived from request cookies.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    /// `None` when the user cookie is absent or malformed; role checks then
    /// fail closed.
    pub user: Option<SessionUser>,
}

impl Session {
    /// Reads the session out of a cookie jar. Returns `None` when there is
    /// no usable token, regardless of what the user cookie says.
    pub fn from_jar(jar: &CookieJar) -> Option<Self> {
        let token = jar.get(TOKEN_COOKIE)?.value().to_string();
        if token.is_empty() {
            return None;
        }
        let user = parse_user(jar.get(USER_COOKIE).map(|c| c.value()));
        Some(Session { token, user })
    }

    pub fn role(&self) -> Option<UserType> {
        self.user.as_ref().map(|u| u.user_type)
    }

    /// The landing page for this session's role. Sessions without a usable
    /// role land on the job-seeker side, where further gating applies.
    pub fn home_path(&self) -> &'static str {
        match self.role() {
            Some(UserType::Employer) => EMPLOYER_HOME,
            _ => SEEKER_HOME,
        }
    }

    /// The session user's id, required for upload ownership.
    pub fn user_id(&self) -> Result<&str, AppError> {
        self.user
            .as_ref()
            .map(|u| u.id.as_str())
            .ok_or(AppError::SessionExpired)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Session::from_jar(&jar).ok_or(AppError::SessionExpired)
    }
}

/// The raw token when one is present, for flows where the whole session is
/// optional (public job reads).
pub fn token_from_jar(jar: &CookieJar) -> Option<String> {
    Session::from_jar(jar).map(|s| s.token)
}

/// Malformed or absent cookie JSON parses to `None`, never an error.
pub fn parse_user(raw: Option<&str>) -> Option<SessionUser> {
    raw.and_then(|s| serde_json::from_str(s).ok())
}

/// Adds the login cookie pair to the jar: http-only, Lax, 24h expiry,
/// `Secure` per deployment config.
pub fn with_login(
    jar: CookieJar,
    token: &str,
    user: &SessionUser,
    secure: bool,
) -> Result<CookieJar, serde_json::Error> {
    let user_json = serde_json::to_string(user)?;
    Ok(jar
        .add(session_cookie(TOKEN_COOKIE, token.to_string(), secure))
        .add(session_cookie(USER_COOKIE, user_json, secure)))
}

/// Removes the login cookie pair from the jar.
pub fn without_login(jar: CookieJar) -> CookieJar {
    let [token, user] = removal_cookies();
    jar.remove(token).remove(user)
}

/// Expired cookies used to clear the pair on logout or session invalidation.
pub fn removal_cookies() -> [Cookie<'static>; 2] {
    [removal_cookie(TOKEN_COOKIE), removal_cookie(USER_COOKIE)]
}

fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(SESSION_TTL)
        .build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, "")).path("/").build();
    cookie.make_removal();
    cookie
}
