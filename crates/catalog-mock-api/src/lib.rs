//! json-server compatible mock of the catalog REST API
//!
//! Serves `/movies[/:id]` and `/favorites` out of a single JSON db file
//! (`{"movies": [...], "favorites": {"ids": [...]}}`), persisting every
//! mutation immediately.

pub mod db;
pub mod routes;
pub mod seed;

pub use db::{DbError, MockDb};
pub use routes::{router, serve, spawn, MockApiState};
pub use seed::seed_movies;
