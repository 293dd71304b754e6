//! People storage: persistence gateway and reactive store.
//!
//! # Responsibility
//! - Define the durable snapshot contract (`PersistenceGateway`).
//! - Own the canonical in-memory people collection (`PeopleStore`).
//!
//! # Invariants
//! - The in-memory collection is authoritative for the running session;
//!   the persisted snapshot converges with it after every successful save.
//! - All snapshot writes go through one gateway call site, in mutation
//!   order, never overlapping.

pub mod gateway;
pub mod people_store;
