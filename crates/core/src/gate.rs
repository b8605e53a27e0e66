//! Page route-gate policy.
//!
//! Decides, from the request path and whether the caller holds a valid
//! session, if a page request passes through or is redirected. The HTTP
//! plumbing lives in `marvedge_api::middleware::gate`; this module is pure.

/// Landing page; unauthenticated users are sent here.
pub const HOME_PATH: &str = "/";

/// Authenticated landing page.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Pages only meaningful without a session.
const PUBLIC_ONLY_PATHS: &[&str] = &[HOME_PATH, "/login", "/signup"];

/// Pages that need a session.
const AUTH_REQUIRED_PATHS: &[&str] = &[DASHBOARD_PATH, "/create-tour"];

/// Classification of a request path for gating purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Login, signup, and home.
    PublicOnly,
    /// Dashboard and the tour creator.
    AuthRequired,
    /// Everything else, including the JSON API.
    Other,
}

impl PathClass {
    /// Classify `path` by exact match.
    pub fn of(path: &str) -> Self {
        if PUBLIC_ONLY_PATHS.contains(&path) {
            PathClass::PublicOnly
        } else if AUTH_REQUIRED_PATHS.contains(&path) {
            PathClass::AuthRequired
        } else {
            PathClass::Other
        }
    }
}

/// Outcome of the gate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    Redirect(&'static str),
}

/// Apply the gate policy.
///
/// | Path class    | Authenticated           | Unauthenticated    |
/// |---------------|-------------------------|--------------------|
/// | PublicOnly    | redirect to dashboard   | pass               |
/// | AuthRequired  | pass                    | redirect to home   |
/// | Other         | pass                    | pass               |
pub fn decide(path: &str, authenticated: bool) -> GateDecision {
    match (PathClass::of(path), authenticated) {
        (PathClass::PublicOnly, true) => GateDecision::Redirect(DASHBOARD_PATH),
        (PathClass::AuthRequired, false) => GateDecision::Redirect(HOME_PATH),
        _ => GateDecision::Pass,
    }
}
