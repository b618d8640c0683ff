//! Repository layer for database operations.
//!
//! Repositories encapsulate the SeaORM queries and hand back decoded
//! [`crate::feeding::Feeding`] values, keeping the entities as plain row models.

pub mod feeding;

pub use feeding::FeedingRepository;
