//! Local storage for the feeding log
//!
//! [`LocalStorage`] owns the SeaORM connection to SQLite (a file or a private
//! in-memory database) and creates the schema on open. Queries live in
//! [`crate::repositories`].

pub mod db;

pub use db::LocalStorage;
