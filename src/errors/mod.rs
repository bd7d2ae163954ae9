use std::error::Error as _;
use std::io;

use axum::{http::StatusCode, response::{IntoResponse, Response}};

/// Error kinds for the wiki application
#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    /// No file exists for the page title.
    #[error("page {0} does not exist")]
    NotFound(String),

    /// Reading or writing a file failed.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// A template was requested under a name that was never registered.
    #[error("the template {0} does not exist")]
    Configuration(String),

    /// A template failed to parse at startup or to execute.
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

impl WikiError {
    /// Error text followed by every underlying cause
    pub fn detailed(&self) -> String {
        let mut text = self.to_string();
        // the wrapped error's own message is already part of `text`
        let mut source = match self {
            WikiError::Template(e) => e.source(),
            WikiError::NotFound(_) | WikiError::Io(_) | WikiError::Configuration(_) => None,
        };
        while let Some(cause) = source {
            text.push_str(": ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        text
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            WikiError::NotFound(_) => (StatusCode::NOT_FOUND, "404 page not found").into_response(),
            WikiError::Io(_) | WikiError::Configuration(_) | WikiError::Template(_) => {
                log::error!("Request failed: {}", self.detailed());
                (StatusCode::INTERNAL_SERVER_ERROR, self.detailed()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_keeps_raw_text() {
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let err = WikiError::from(denied);
        assert_eq!(err.to_string(), "permission denied");
        assert_eq!(err.detailed(), "permission denied");
    }

    #[test]
    fn template_error_lists_causes() {
        let mut tera = tera::Tera::default();
        tera.add_raw_template("t.html", "{{ missing }}").unwrap();
        let err = WikiError::from(tera.render("t.html", &tera::Context::new()).unwrap_err());
        let text = err.detailed();
        assert!(text.starts_with("template error: "));
        assert!(text.contains("missing"));
    }

    #[test]
    fn configuration_names_the_template() {
        let err = WikiError::Configuration("missing.html".to_string());
        assert_eq!(err.to_string(), "the template missing.html does not exist");
    }

    #[test]
    fn not_found_is_a_404() {
        let response = WikiError::NotFound("Nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_kinds_are_500() {
        let response = WikiError::Configuration("x.html".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = WikiError::Io(io::Error::other("disk full")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
