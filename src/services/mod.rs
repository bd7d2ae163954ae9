pub mod page_store;
pub mod markdown_service;
pub mod template_registry;

pub use page_store::PageStore;
pub use markdown_service::MarkdownService;
pub use template_registry::TemplateRegistry;
