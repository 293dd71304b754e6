//! Domain model for gift recipients and their gift ideas.
//!
//! # Responsibility
//! - Define the canonical Person/Idea records shared by store and gateway.
//! - Keep Idea ownership structural: an Idea only exists inside a Person.
//!
//! # Invariants
//! - Every record is identified by a stable, never-reused id.
//! - A Person's `ideas` vector is owned by value and never shared.

pub mod person;
