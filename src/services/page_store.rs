use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use log::{debug, info, warn, error};
use time::OffsetDateTime;

use crate::errors::WikiError;
use crate::types::{Page, Title};

/// Flat-file storage for pages: one file per title in a single directory.
///
/// There is no locking. Two saves of the same title race and the last
/// writer wins.
#[derive(Debug, Clone)]
pub struct PageStore {
    data_dir: PathBuf,
    extension: String,
}

impl PageStore {
    /// Create a page store over `data_dir`, naming files `<title><extension>`
    pub fn new(data_dir: PathBuf, extension: String) -> Self {
        debug!("Creating PageStore in {:?} with extension {}", data_dir, extension);
        Self { data_dir, extension }
    }

    /// File backing the page with this title
    pub fn path_for(&self, title: &Title) -> PathBuf {
        self.data_dir.join(format!("{}{}", title, self.extension))
    }

    /// Create the data directory if it is missing
    pub fn ensure_dir(&self) -> Result<(), WikiError> {
        if !self.data_dir.is_dir() {
            info!("Creating data directory {:?}", self.data_dir);
            fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }

    /// Read a page from disk
    pub fn load(&self, title: &Title) -> Result<Page, WikiError> {
        let path = self.path_for(title);
        debug!("Loading page {} from {:?}", title, path);

        let body = fs::read(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                debug!("Page file does not exist: {:?}", path);
                WikiError::NotFound(title.to_string())
            } else {
                warn!("Failed to read page {:?}: {}", path, e);
                WikiError::Io(e)
            }
        })?;

        let modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .map(OffsetDateTime::from);

        info!("Loaded page {}, {} bytes", title, body.len());
        Ok(Page { title: title.clone(), body, modified })
    }

    /// Write the full page body, creating or truncating its file.
    /// New files are readable and writable by the owner only.
    pub fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.path_for(&page.title);
        debug!("Saving page {} to {:?}", page.title, path);

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&path).map_err(|e| {
            error!("Failed to open {:?} for writing: {}", path, e);
            WikiError::Io(e)
        })?;
        file.write_all(&page.body).map_err(|e| {
            error!("Failed to write {:?}: {}", path, e);
            WikiError::Io(e)
        })?;

        info!("Saved page {}, {} bytes", page.title, page.body.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn title(raw: &str) -> Title {
        Title::parse(raw).unwrap()
    }

    fn store(dir: &TempDir) -> PageStore {
        PageStore::new(dir.path().to_path_buf(), ".md".to_string())
    }

    #[test]
    fn path_is_title_plus_extension() {
        let td = TempDir::new().unwrap();
        let path = store(&td).path_for(&title("FrontPage"));
        assert_eq!(path, td.path().join("FrontPage.md"));
    }

    #[test]
    fn save_then_load_returns_same_bytes() {
        let td = TempDir::new().unwrap();
        let pages = store(&td);
        let body = b"# Hello\n\nsome *text* \xff\x00 bytes".to_vec();
        pages.save(&Page::new(title("Hello"), body.clone())).unwrap();

        let loaded = pages.load(&title("Hello")).unwrap();
        assert_eq!(loaded.title, title("Hello"));
        assert_eq!(loaded.body, body);
        assert!(loaded.modified.is_some());
    }

    #[test]
    fn save_truncates_previous_content() {
        let td = TempDir::new().unwrap();
        let pages = store(&td);
        pages.save(&Page::new(title("P"), "a much longer first version")).unwrap();
        pages.save(&Page::new(title("P"), "short")).unwrap();
        assert_eq!(pages.load(&title("P")).unwrap().body, b"short");
    }

    #[test]
    fn load_missing_page_is_not_found() {
        let td = TempDir::new().unwrap();
        match store(&td).load(&title("Missing")) {
            Err(WikiError::NotFound(t)) => assert_eq!(t, "Missing"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn save_into_missing_directory_is_io_error() {
        let td = TempDir::new().unwrap();
        let pages = PageStore::new(td.path().join("nope"), ".md".to_string());
        let err = pages.save(&Page::new(title("X"), "x")).unwrap_err();
        assert!(matches!(err, WikiError::Io(_)));
    }

    #[test]
    fn ensure_dir_creates_data_directory() {
        let td = TempDir::new().unwrap();
        let pages = PageStore::new(td.path().join("data"), ".md".to_string());
        pages.ensure_dir().unwrap();
        pages.save(&Page::new(title("X"), "x")).unwrap();
        assert!(td.path().join("data/X.md").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn new_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let td = TempDir::new().unwrap();
        let pages = store(&td);
        pages.save(&Page::new(title("Secret"), "s")).unwrap();
        let mode = fs::metadata(pages.path_for(&title("Secret"))).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
