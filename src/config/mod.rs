use std::path::{Path, PathBuf};

/// Directory holding one file per page.
pub const DATA_DIR: &str = "data";
/// Extension appended to a page title to form its file name.
pub const DATA_FORMAT: &str = ".md";
/// Directory of top-level page templates.
pub const TEMPLATES_DIR: &str = "templates";
/// Directory of templates shared by every top-level template.
pub const INCLUDES_DIR: &str = "includes";
/// Extension of template and include files.
pub const TEMPLATE_FORMAT: &str = ".html";
pub const STATIC_DIR: &str = "static";
/// Page `/` redirects to.
pub const FRONT_PAGE: &str = "FrontPage";
pub const PORT: u16 = 8000;
/// Largest accepted request body, so page saves up to this size succeed.
pub const MAX_FORM_BYTES: usize = 10 << 20;

/// Application configuration and constants
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub data_format: String,
    pub templates_dir: PathBuf,
    pub includes_dir: PathBuf,
    pub template_format: String,
    pub static_dir: PathBuf,
    pub front_page: String,
    pub port: u16,
}

impl Config {
    /// Create a new configuration with the fixed default values
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_DIR),
            data_format: DATA_FORMAT.to_string(),
            templates_dir: PathBuf::from(TEMPLATES_DIR),
            includes_dir: PathBuf::from(INCLUDES_DIR),
            template_format: TEMPLATE_FORMAT.to_string(),
            static_dir: PathBuf::from(STATIC_DIR),
            front_page: FRONT_PAGE.to_string(),
            port: PORT,
        }
    }

    /// Same layout as [`Config::new`], with every directory placed under `root`
    pub fn with_root(root: &Path) -> Self {
        Self {
            data_dir: root.join(DATA_DIR),
            templates_dir: root.join(TEMPLATES_DIR),
            includes_dir: root.join(INCLUDES_DIR),
            static_dir: root.join(STATIC_DIR),
            ..Self::new()
        }
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_fixed_layout() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.data_format, ".md");
        assert_eq!(config.templates_dir, PathBuf::from("templates"));
        assert_eq!(config.includes_dir, PathBuf::from("includes"));
        assert_eq!(config.template_format, ".html");
        assert_eq!(config.front_page, "FrontPage");
        assert_eq!(config.socket_addr().port(), 8000);
    }

    #[test]
    fn with_root_moves_directories_only() {
        let config = Config::with_root(Path::new("/srv/wiki"));
        assert_eq!(config.data_dir, PathBuf::from("/srv/wiki/data"));
        assert_eq!(config.static_dir, PathBuf::from("/srv/wiki/static"));
        assert_eq!(config.data_format, ".md");
        assert_eq!(config.port, PORT);
    }
}
