//! Person and Idea domain records.
//!
//! # Responsibility
//! - Define the persisted record shape for a gift recipient.
//! - Provide validation used on every store write path and on load read-back.
//! - Provide helpers for expressing idea changes as full-person replacement.
//!
//! # Invariants
//! - `id` is stable and never reused for another person or idea.
//! - `ideas` is owned by value; an Idea cannot outlive its Person.
//! - Idea ids are unique within their owning Person.

use crate::id::new_id;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a Person record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PersonId = Uuid;

/// Stable identifier for an Idea record, scoped to its owning Person.
pub type IdeaId = Uuid;

/// One gift suggestion for a Person.
///
/// `image` is an opaque path/URI reference to an externally stored photo
/// blob; this crate never reads or writes the image bytes themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    /// Stable id, unique within the owning Person's `ideas`.
    pub id: IdeaId,
    /// Free-form gift idea text.
    pub text: String,
    /// Optional photo reference. Omitted on the wire when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Idea {
    /// Creates a new idea with a generated stable id and no photo.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            image: None,
        }
    }

    /// Creates an idea with a caller-provided stable id.
    ///
    /// Used by import paths where identity already exists externally.
    ///
    /// # Errors
    /// - Rejects the nil id, which would break id-based removal.
    pub fn with_id(id: IdeaId, text: impl Into<String>) -> Result<Self, PersonValidationError> {
        if id.is_nil() {
            return Err(PersonValidationError::NilIdeaId);
        }
        Ok(Self {
            id,
            text: text.into(),
            image: None,
        })
    }

    /// Attaches a photo reference, builder-style.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Canonical record for a gift recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Stable id, unique within the whole collection.
    pub id: PersonId,
    /// Display name. Must be non-blank.
    pub name: String,
    /// Birthday as text in the external date-picker's format.
    /// No calendar validation beyond non-blank.
    pub birthday: String,
    /// Gift ideas owned exclusively by this person, in insertion order.
    #[serde(default)]
    pub ideas: Vec<Idea>,
}

impl Person {
    /// Creates a new person with a generated stable id and no ideas.
    pub fn new(name: impl Into<String>, birthday: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            birthday: birthday.into(),
            ideas: Vec::new(),
        }
    }

    /// Creates a person with a caller-provided stable id.
    ///
    /// Used by import paths where identity already exists externally.
    ///
    /// # Errors
    /// - Rejects the nil id.
    pub fn with_id(
        id: PersonId,
        name: impl Into<String>,
        birthday: impl Into<String>,
    ) -> Result<Self, PersonValidationError> {
        if id.is_nil() {
            return Err(PersonValidationError::NilId);
        }
        Ok(Self {
            id,
            name: name.into(),
            birthday: birthday.into(),
            ideas: Vec::new(),
        })
    }

    /// Checks record invariants.
    ///
    /// # Errors
    /// - Nil person id or nil idea id.
    /// - Blank `name`, `birthday`, or idea `text`.
    /// - Duplicate idea id within this person.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        if self.id.is_nil() {
            return Err(PersonValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(PersonValidationError::EmptyName);
        }
        if self.birthday.trim().is_empty() {
            return Err(PersonValidationError::EmptyBirthday);
        }

        let mut seen = HashSet::with_capacity(self.ideas.len());
        for idea in &self.ideas {
            if idea.id.is_nil() {
                return Err(PersonValidationError::NilIdeaId);
            }
            if idea.text.trim().is_empty() {
                return Err(PersonValidationError::EmptyIdeaText { idea_id: idea.id });
            }
            if !seen.insert(idea.id) {
                return Err(PersonValidationError::DuplicateIdeaId { idea_id: idea.id });
            }
        }

        Ok(())
    }

    /// Returns one idea by id.
    pub fn find_idea(&self, id: IdeaId) -> Option<&Idea> {
        self.ideas.iter().find(|idea| idea.id == id)
    }

    /// Appends one idea to this person.
    ///
    /// Uniqueness of the idea id is enforced by `validate()` when the
    /// modified record goes through the store.
    pub fn add_idea(&mut self, idea: Idea) {
        self.ideas.push(idea);
    }

    /// Removes one idea by id. Returns whether a matching idea existed.
    pub fn remove_idea(&mut self, id: IdeaId) -> bool {
        let before = self.ideas.len();
        self.ideas.retain(|idea| idea.id != id);
        self.ideas.len() != before
    }
}

/// Returns people ordered by case-insensitive name for display.
///
/// Display ordering is a presentation concern; the store itself keeps
/// insertion order.
pub fn sorted_by_name(people: &[Person]) -> Vec<Person> {
    let mut sorted = people.to_vec();
    sorted.sort_by_cached_key(|person| person.name.to_lowercase());
    sorted
}

/// Validation error for Person/Idea records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonValidationError {
    /// Person id is the nil uuid.
    NilId,
    /// Person name is empty or whitespace-only.
    EmptyName,
    /// Person birthday is empty or whitespace-only.
    EmptyBirthday,
    /// An idea id is the nil uuid.
    NilIdeaId,
    /// An idea has empty or whitespace-only text.
    EmptyIdeaText { idea_id: IdeaId },
    /// Two ideas of the same person share one id.
    DuplicateIdeaId { idea_id: IdeaId },
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "person id must not be the nil uuid"),
            Self::EmptyName => write!(f, "person name must not be empty"),
            Self::EmptyBirthday => write!(f, "person birthday must not be empty"),
            Self::NilIdeaId => write!(f, "idea id must not be the nil uuid"),
            Self::EmptyIdeaText { idea_id } => {
                write!(f, "idea {idea_id} must have non-empty text")
            }
            Self::DuplicateIdeaId { idea_id } => {
                write!(f, "idea id {idea_id} appears twice in one person")
            }
        }
    }
}

impl Error for PersonValidationError {}
