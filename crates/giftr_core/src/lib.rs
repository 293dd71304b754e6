//! Core domain logic for Giftr, a personal gift-planning tracker.
//! This crate is the single source of truth for business invariants:
//! unique identifiers, Person/Idea ownership, and persistence
//! consistency. Screens, navigation, and camera capture live outside
//! and only call the store API.

pub mod db;
pub mod id;
pub mod logging;
pub mod model;
pub mod store;

pub use id::new_id;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::person::{
    sorted_by_name, Idea, IdeaId, Person, PersonId, PersonValidationError,
};
pub use store::gateway::{
    PersistenceGateway, PersistenceReadError, PersistenceWriteError, SqliteSnapshotGateway,
    PEOPLE_KEY,
};
pub use store::people_store::{NewPerson, PeopleStore, StoreError, StoreResult, SubscriptionId};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
