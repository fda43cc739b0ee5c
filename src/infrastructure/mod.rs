pub mod document_port;
pub mod loader;
pub mod memory_document;

pub use document_port::DocumentPort;
pub use loader::{load_document, save_document};
pub use memory_document::{MemoryDocument, MemoryPage, MemoryWord};
