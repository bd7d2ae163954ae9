use pulldown_cmark::{html, Options, Parser};

/// Service for turning page markup into HTML that is safe to embed
pub struct MarkdownService {
    options: Options,
}

impl MarkdownService {
    /// Create a new markdown service with GitHub-flavored extensions enabled
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);
        Self { options }
    }

    /// Render raw page bytes to sanitized HTML.
    ///
    /// Raw HTML in the source passes through the markdown stage untouched, so
    /// everything is cleaned afterwards: script and style contents, event
    /// handler attributes and non-http(s)/mailto URLs are removed.
    pub fn render(&self, body: &[u8]) -> String {
        let source = String::from_utf8_lossy(body);
        let unsafe_html = self.markdown_to_html(&source);
        ammonia::clean(&unsafe_html)
    }

    fn markdown_to_html(&self, content: &str) -> String {
        let parser = Parser::new_ext(content, self.options);
        let mut out = String::with_capacity(content.len() * 2);
        html::push_html(&mut out, parser);
        out
    }
}

impl Default for MarkdownService {
    fn default() -> Self {
        Self::new()
    }
}
