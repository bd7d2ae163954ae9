//! Route table for the wiki.
//!
//! ## Routes
//!
//! - `GET /` - redirect to the front page
//! - `GET /view/{title}` - rendered page, or redirect to the editor if missing
//! - `GET /edit/{title}` - edit form
//! - `POST /save/{title}` - store the `body` form field
//! - `GET /static/{path}` - files from the static directory
//!
//! Anything else, including a title that is not `[a-zA-Z0-9]+` and a wrong
//! method on a page route, is a 404.

use axum::{
    async_trait,
    extract::{DefaultBodyLimit, FromRequestParts, Path as AxumPath},
    http::request::Parts,
    routing::{get, post, MethodRouter},
    Router,
};
use log::debug;
use tower_http::services::ServeDir;

use crate::config::MAX_FORM_BYTES;
use crate::errors::WikiError;
use crate::handlers;
use crate::types::{AppState, Title};

/// Page verbs, one handler each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    View,
    Edit,
    Save,
}

impl Verb {
    pub const ALL: [Verb; 3] = [Verb::View, Verb::Edit, Verb::Save];

    pub fn name(self) -> &'static str {
        match self {
            Verb::View => "view",
            Verb::Edit => "edit",
            Verb::Save => "save",
        }
    }

    /// Route pattern with the title as its only parameter
    pub fn pattern(self) -> String {
        format!("/{}/:title", self.name())
    }

    /// Concrete path of this verb for a page
    pub fn path(self, title: &str) -> String {
        format!("/{}/{}", self.name(), title)
    }

    fn handler(self) -> MethodRouter<AppState> {
        let method_router = match self {
            Verb::View => get(handlers::view),
            Verb::Edit => get(handlers::edit),
            Verb::Save => post(handlers::save),
        };
        method_router.fallback(handlers::not_found)
    }
}

/// Build the complete wiki router
pub fn router(state: AppState) -> Router {
    let mut router = Router::new().route("/", get(handlers::root).fallback(handlers::not_found));
    for verb in Verb::ALL {
        router = router.route(&verb.pattern(), verb.handler());
    }

    router
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .with_state(state)
}

/// Titles are taken from the `:title` path segment and validated before any
/// handler runs.
#[async_trait]
impl<S> FromRequestParts<S> for Title
where
    S: Send + Sync,
{
    type Rejection = WikiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AxumPath(raw) = AxumPath::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| WikiError::NotFound(e.body_text()))?;
        Title::parse(&raw).ok_or_else(|| {
            debug!("Rejected title token {:?}", raw);
            WikiError::NotFound(raw)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_paths() {
        assert_eq!(Verb::View.pattern(), "/view/:title");
        assert_eq!(Verb::Save.pattern(), "/save/:title");
        assert_eq!(Verb::Edit.path("FrontPage"), "/edit/FrontPage");
    }

    #[test]
    fn verbs_are_distinct() {
        let names: Vec<&str> = Verb::ALL.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["view", "edit", "save"]);
    }
}
