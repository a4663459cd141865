pub mod error;
pub mod factory;
pub mod http;
pub mod local;
pub mod traits;

pub use error::BackendError;
pub use factory::create_backend;
pub use http::HttpBackend;
pub use local::{KeyValueStore, LocalBackend};
pub use traits::CatalogBackend;
