use axum::{
    extract::{rejection::FormRejection, Form, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use log::{debug, info, warn};
use serde::Deserialize;

use crate::errors::WikiError;
use crate::routes::Verb;
use crate::types::{AppState, Page, Title};

pub const VIEW_TEMPLATE: &str = "view.html";
pub const EDIT_TEMPLATE: &str = "edit.html";

/// Fields posted by the edit form
#[derive(Debug, Deserialize)]
pub struct SaveForm {
    /// Missing means empty.
    #[serde(default)]
    pub body: String,
}

/// Handle root path requests
pub async fn root(State(state): State<AppState>) -> Response {
    found(&Verb::View.path(&state.config.front_page))
}

/// Show a page, or send the user to the editor when it does not exist yet
pub async fn view(State(state): State<AppState>, title: Title) -> Result<Response, WikiError> {
    info!("View request for '{}'", title);

    let page = match state.pages.load(&title) {
        Ok(page) => page,
        Err(WikiError::NotFound(_)) => {
            debug!("Page '{}' does not exist, redirecting to editor", title);
            return Ok(found(&Verb::Edit.path(title.as_str())));
        }
        Err(WikiError::Io(e)) => {
            warn!("Could not read page '{}', redirecting to editor: {}", title, e);
            return Ok(found(&Verb::Edit.path(title.as_str())));
        }
        Err(e @ (WikiError::Configuration(_) | WikiError::Template(_))) => return Err(e),
    };

    render(&state, VIEW_TEMPLATE, &page)
}

/// Show the edit form, blank for a page that does not exist yet
pub async fn edit(State(state): State<AppState>, title: Title) -> Result<Response, WikiError> {
    info!("Edit request for '{}'", title);

    let page = match state.pages.load(&title) {
        Ok(page) => page,
        Err(WikiError::NotFound(_)) => {
            debug!("Page '{}' does not exist, editing a blank page", title);
            Page::blank(title)
        }
        Err(WikiError::Io(e)) => {
            warn!("Could not read page '{}', editing a blank page: {}", title, e);
            Page::blank(title)
        }
        Err(e @ (WikiError::Configuration(_) | WikiError::Template(_))) => return Err(e),
    };

    render(&state, EDIT_TEMPLATE, &page)
}

/// Store the submitted body and go back to the page
pub async fn save(
    State(state): State<AppState>,
    title: Title,
    form: Result<Form<SaveForm>, FormRejection>,
) -> Result<Response, WikiError> {
    let body = match form {
        Ok(Form(form)) => form.body,
        Err(FormRejection::InvalidFormContentType(_)) => {
            debug!("Save for '{}' without a form body, saving an empty page", title);
            String::new()
        }
        Err(rejection) => {
            warn!("Rejected save for '{}': {}", title, rejection.body_text());
            return Ok(rejection.into_response());
        }
    };
    info!("Save request for '{}', {} bytes", title, body.len());

    let page = Page::new(title, body);
    state.pages.save(&page)?;
    Ok(found(&Verb::View.path(page.title.as_str())))
}

/// Answer for every path outside the route table
pub async fn not_found(uri: Uri) -> WikiError {
    debug!("No route for '{}'", uri.path());
    WikiError::NotFound(uri.path().to_string())
}

fn render(state: &AppState, template: &str, page: &Page) -> Result<Response, WikiError> {
    let html = state.templates.render(template, page)?;
    Ok(Html(html).into_response())
}

/// 302 redirect
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
