//! Local persistence fallback: the catalog and the favorite set live under
//! two string keys, each holding a JSON document.

pub mod client;
pub mod storage;

pub use client::LocalBackend;
pub use storage::KeyValueStore;
