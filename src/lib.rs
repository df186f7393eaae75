// Library surface shared by the binary and the integration tests.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod import;
pub mod language;
pub mod resolver;
pub mod store;

pub use error::{ImportError, SelectError, StoreError};
pub use language::Language;
pub use resolver::{Origin, Selection, SelectionRequest, TextResolver};
pub use store::TextStore;
