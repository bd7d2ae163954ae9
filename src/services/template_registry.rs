use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, error};
use tera::{Context, Tera, Value};
use time::format_description::well_known::Rfc3339;

use crate::errors::WikiError;
use crate::services::MarkdownService;
use crate::types::Page;

/// Include every layout is expected to extend.
pub const BASE_TEMPLATE: &str = "base.html";

/// Filter turning page markup into sanitized HTML: `{{ body | markdown | safe }}`.
pub const MARKDOWN_FILTER: &str = "markdown";

/// Named, pre-parsed page templates.
///
/// Every top-level template becomes its own unit, parsed together with all
/// shared includes, and is keyed by its file name (`view.html`). The registry
/// is built once at startup and only read afterwards.
pub struct TemplateRegistry {
    units: HashMap<String, Tera>,
}

impl TemplateRegistry {
    /// Parse every `<templates_dir>/*<extension>` together with every
    /// `<includes_dir>/*<extension>`. A missing includes directory means no
    /// includes; a missing templates directory is an error.
    pub fn load(
        templates_dir: &Path,
        includes_dir: &Path,
        extension: &str,
    ) -> Result<Self, WikiError> {
        let layouts = list_templates(templates_dir, extension)?;
        let includes = match list_templates(includes_dir, extension) {
            Ok(files) => files,
            Err(WikiError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No includes directory at {:?}", includes_dir);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let mut units = HashMap::new();
        for layout in &layouts {
            let name = file_name(layout);
            let mut files: Vec<(&Path, Option<String>)> = includes
                .iter()
                .map(|p| (p.as_path(), Some(file_name(p))))
                .collect();
            files.push((layout.as_path(), Some(name.clone())));

            let mut unit = new_unit();
            unit.add_template_files(files).map_err(|e| {
                error!("Failed to parse template {:?}: {}", layout, e);
                WikiError::Template(e)
            })?;
            debug!("Registered template {} with {} includes", name, includes.len());
            units.insert(name, unit);
        }

        info!("Loaded {} templates from {:?}", units.len(), templates_dir);
        Ok(Self { units })
    }

    /// Build a registry from in-memory `(name, source)` pairs
    pub fn from_sources(
        layouts: &[(&str, &str)],
        includes: &[(&str, &str)],
    ) -> Result<Self, WikiError> {
        let mut units = HashMap::new();
        for (name, source) in layouts {
            let sources: Vec<(&str, &str)> =
                includes.iter().copied().chain([(*name, *source)]).collect();
            let mut unit = new_unit();
            unit.add_raw_templates(sources)?;
            units.insert(name.to_string(), unit);
        }
        Ok(Self { units })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Registered template names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.units.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Render the named template with `page` as its data context.
    ///
    /// Asking for a name that was never registered is a wiring defect and
    /// reported as [`WikiError::Configuration`].
    pub fn render(&self, name: &str, page: &Page) -> Result<String, WikiError> {
        let unit = self.units.get(name).ok_or_else(|| {
            error!("Template {} is not registered", name);
            WikiError::Configuration(name.to_string())
        })?;

        let html = unit.render(name, &page_context(page)).map_err(|e| {
            error!("Failed to execute template {}: {}", name, e);
            WikiError::Template(e)
        })?;
        debug!("Rendered template {} for page {}, {} bytes", name, page.title, html.len());
        Ok(html)
    }
}

fn new_unit() -> Tera {
    let mut unit = Tera::default();
    unit.register_filter(MARKDOWN_FILTER, markdown_filter);
    unit
}

/// Markup is only rendered where a template applies the filter.
fn markdown_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let source = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("the markdown filter expects a string"))?;
    Ok(Value::String(MarkdownService::new().render(source.as_bytes())))
}

/// Data context handed to templates
fn page_context(page: &Page) -> Context {
    let mut context = Context::new();
    context.insert("title", page.title.as_str());
    context.insert("body", &page.body_text());
    if let Some(modified) = page.modified.and_then(|m| m.format(&Rfc3339).ok()) {
        context.insert("modified", &modified);
    }
    context
}

/// Files directly inside `dir` whose name ends with `extension`, sorted
fn list_templates(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, WikiError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && file_name(&path).ends_with(extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
