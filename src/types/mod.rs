use std::fmt;
use std::sync::Arc;

use time::OffsetDateTime;

use crate::config::Config;
use crate::errors::WikiError;
use crate::services::{PageStore, TemplateRegistry};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pages: PageStore,
    pub templates: Arc<TemplateRegistry>,
}

impl AppState {
    /// Load the template registry and open the page store described by `config`
    pub fn new(config: Config) -> Result<Self, WikiError> {
        let templates = TemplateRegistry::load(
            &config.templates_dir,
            &config.includes_dir,
            &config.template_format,
        )?;
        Ok(Self::with_templates(config, templates))
    }

    pub fn with_templates(config: Config, templates: TemplateRegistry) -> Self {
        let pages = PageStore::new(config.data_dir.clone(), config.data_format.clone());
        Self {
            config: Arc::new(config),
            pages,
            templates: Arc::new(templates),
        }
    }
}

/// A page title: one or more ASCII letters or digits.
///
/// The restriction keeps a title usable as a file name as-is: it cannot
/// contain separators, dots or anything that would let two titles map to the
/// same file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    /// Accept `raw` only if it is a valid title token
    pub fn parse(raw: &str) -> Option<Self> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Some(Title(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A wiki page: its title and raw markup source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: Title,
    pub body: Vec<u8>,
    /// Last write time of the backing file, when the page was loaded from disk.
    pub modified: Option<OffsetDateTime>,
}

impl Page {
    pub fn new(title: Title, body: impl Into<Vec<u8>>) -> Self {
        Self { title, body: body.into(), modified: None }
    }

    /// A page with no content, used when editing a page that does not exist yet
    pub fn blank(title: Title) -> Self {
        Self::new(title, Vec::new())
    }

    /// Body as text, replacing invalid UTF-8 sequences
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_accepts_alphanumerics() {
        for raw in ["FrontPage", "a", "Page2", "123", "ZZtop9"] {
            assert_eq!(Title::parse(raw).map(|t| t.to_string()), Some(raw.to_string()));
        }
    }

    #[test]
    fn title_rejects_everything_else() {
        for raw in ["", "a b", "a/b", "..", "a.md", "-x", "под", "a_b", "x%2Fy"] {
            assert!(Title::parse(raw).is_none(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn blank_page_has_empty_body() {
        let page = Page::blank(Title::parse("New").unwrap());
        assert!(page.body.is_empty());
        assert_eq!(page.title.as_str(), "New");
        assert!(page.modified.is_none());
    }

    #[test]
    fn body_text_is_lossy() {
        let page = Page::new(Title::parse("Bin").unwrap(), vec![b'h', b'i', 0xff]);
        assert_eq!(page.body_text(), "hi\u{fffd}");
    }
}
