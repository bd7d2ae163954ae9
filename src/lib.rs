//! Folio - a minimal personal wiki
//!
//! Pages are markdown files in a flat data directory, rendered to sanitized
//! HTML through page templates and edited in the browser.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod routes;
pub mod services;
pub mod types;

// Re-export commonly used items
pub use config::Config;
pub use errors::WikiError;
pub use routes::{router, Verb};
pub use types::{AppState, Page, Title};
pub use services::{MarkdownService, PageStore, TemplateRegistry};
