/// Route gate — the one place navigation access is decided.
///
/// `decide` is a pure function over the requested path and the session read
/// from cookies, so every redirect rule is testable without a router or
/// network. The middleware below only applies its verdict.
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::session::{Session, EMPLOYER_HOME, LOGIN_PATH, SEEKER_HOME};
use crate::models::user::UserType;

/// Exact-match paths reachable without a session.
const PUBLIC_PATHS: &[&str] = &["/", LOGIN_PATH, "/auth/register"];
/// Prefixes reserved for employer accounts.
const EMPLOYER_PREFIXES: &[&str] = &[EMPLOYER_HOME, "/employer"];
/// Prefixes reserved for job-seeker accounts.
const SEEKER_PREFIXES: &[&str] = &[SEEKER_HOME, "/applications"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectTo(&'static str),
}

pub fn decide(path: &str, session: Option<&Session>) -> RouteDecision {
    if PUBLIC_PATHS.contains(&path) {
        // Logged-in visitors never see the public pages; they land on
        // their role's home instead.
        return match session {
            Some(session) => RouteDecision::RedirectTo(session.home_path()),
            None => RouteDecision::Allow,
        };
    }

    let Some(session) = session else {
        return RouteDecision::RedirectTo(LOGIN_PATH);
    };

    // A missing or unparseable user cookie yields no role, so both checks
    // fail closed and redirect away from role-prefixed paths.
    if EMPLOYER_PREFIXES.iter().any(|p| path.starts_with(p))
        && session.role() != Some(UserType::Employer)
    {
        return RouteDecision::RedirectTo(SEEKER_HOME);
    }
    if SEEKER_PREFIXES.iter().any(|p| path.starts_with(p))
        && session.role() != Some(UserType::JobSeeker)
    {
        return RouteDecision::RedirectTo(EMPLOYER_HOME);
    }

    RouteDecision::Allow
}

/// Middleware applying `decide` to every page navigation. The `/api` and
/// `/health` namespaces are routed outside this layer.
pub async fn auth_gate(request: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let session = Session::from_jar(&jar);
    match decide(request.uri().path(), session.as_ref()) {
        RouteDecision::Allow => next.run(request).await,
        RouteDecision::RedirectTo(path) => Redirect::to(path).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::SessionUser;

    fn session(user_type: Option<&str>) -> Session {
        let user = user_type.map(|t| {
            serde_json::from_value::<SessionUser>(serde_json::json!({
                "id": "u1",
                "name": "Test",
                "email": "test@example.com",
                "userType": t
            }))
            .unwrap()
        });
        Session {
            token: "tok".to_string(),
            user,
        }
    }

    #[test]
    fn test_public_paths_allowed_without_session() {
        for path in ["/", "/auth/login", "/auth/register"] {
            assert_eq!(decide(path, None), RouteDecision::Allow, "path: {path}");
        }
    }

    #[test]
    fn test_public_path_with_seeker_session_redirects_home() {
        let s = session(Some("jobseeker"));
        for path in ["/", "/auth/login", "/auth/register"] {
            assert_eq!(
                decide(path, Some(&s)),
                RouteDecision::RedirectTo(SEEKER_HOME),
                "path: {path}"
            );
        }
    }

    #[test]
    fn test_public_path_with_employer_session_redirects_to_employer_home() {
        let s = session(Some("employer"));
        assert_eq!(decide("/", Some(&s)), RouteDecision::RedirectTo(EMPLOYER_HOME));
    }

    #[test]
    fn test_protected_paths_require_a_session() {
        for path in [
            "/dashboard",
            "/applications",
            "/jobs",
            "/jobs/42",
            "/jobs/42/apply",
            "/profile",
            "/employer-dashboard",
            "/employer/jobs",
        ] {
            assert_eq!(
                decide(path, None),
                RouteDecision::RedirectTo(LOGIN_PATH),
                "path: {path}"
            );
        }
    }

    #[test]
    fn test_seeker_blocked_from_employer_paths() {
        let s = session(Some("jobseeker"));
        for path in [
            "/employer-dashboard",
            "/employer/jobs",
            "/employer/jobs/42/applications",
            "/employer/profile",
        ] {
            assert_eq!(
                decide(path, Some(&s)),
                RouteDecision::RedirectTo(SEEKER_HOME),
                "path: {path}"
            );
        }
    }

    #[test]
    fn test_employer_blocked_from_seeker_paths() {
        let s = session(Some("employer"));
        for path in ["/dashboard", "/applications"] {
            assert_eq!(
                decide(path, Some(&s)),
                RouteDecision::RedirectTo(EMPLOYER_HOME),
                "path: {path}"
            );
        }
    }

    #[test]
    fn test_roleless_session_fails_both_role_checks() {
        // Token present but user cookie missing or malformed.
        let s = session(None);
        assert_eq!(
            decide("/employer-dashboard", Some(&s)),
            RouteDecision::RedirectTo(SEEKER_HOME)
        );
        assert_eq!(
            decide("/dashboard", Some(&s)),
            RouteDecision::RedirectTo(EMPLOYER_HOME)
        );
    }

    #[test]
    fn test_unprefixed_paths_allowed_for_any_role() {
        for user_type in ["jobseeker", "employer"] {
            let s = session(Some(user_type));
            assert_eq!(decide("/jobs", Some(&s)), RouteDecision::Allow);
            assert_eq!(decide("/jobs/42", Some(&s)), RouteDecision::Allow);
            assert_eq!(decide("/profile", Some(&s)), RouteDecision::Allow);
        }
    }

    #[test]
    fn test_matching_roles_allowed_through() {
        assert_eq!(
            decide("/dashboard", Some(&session(Some("jobseeker")))),
            RouteDecision::Allow
        );
        assert_eq!(
            decide("/employer/jobs", Some(&session(Some("employer")))),
            RouteDecision::Allow
        );
    }
}
