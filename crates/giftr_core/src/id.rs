//! Collision-resistant identifier generation.
//!
//! # Responsibility
//! - Provide the single id source for Person and Idea records.
//!
//! # Invariants
//! - Generation performs no I/O and never blocks.
//! - Collision probability is negligible across process lifetimes and
//!   reinstalls, so ids stay unique against previously persisted data.

use uuid::Uuid;

/// Generates a fresh opaque identifier.
///
/// Version-4 UUIDs carry 122 random bits; the store treats the value as
/// an opaque token and never inspects its structure.
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::new_id;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_unique_and_non_nil() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let id = new_id();
            assert!(!id.is_nil());
            assert!(seen.insert(id), "id generator produced a duplicate");
        }
    }
}
