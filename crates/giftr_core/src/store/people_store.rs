//! Reactive store over the people collection.
//!
//! # Responsibility
//! - Own the canonical in-memory collection of Person records.
//! - Apply CRUD mutations atomically and write each accepted mutation
//!   through to the persistence gateway.
//! - Notify registered subscribers after every accepted mutation.
//!
//! # Invariants
//! - Mutations require `&mut self`, so `snapshot()` can never observe a
//!   partially applied change and gateway writes never overlap.
//! - Id generation for `add_person` happens inside the store, the only
//!   place that can enforce collection-wide id uniqueness.
//! - In-memory state is applied optimistically: a failed snapshot write
//!   is surfaced to the caller but never rolls the mutation back.

use crate::id::new_id;
use crate::model::person::{sorted_by_name, Idea, Person, PersonId, PersonValidationError};
use crate::store::gateway::{PersistenceGateway, PersistenceWriteError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle for one registered snapshot subscriber.
pub type SubscriptionId = u64;

type Listener = Box<dyn Fn(&[Person])>;

/// Store-level error for people CRUD operations.
#[derive(Debug)]
pub enum StoreError {
    /// Mutation attempted before `initialize()` completed.
    NotReady,
    /// `update_person` targeted an id absent from the collection.
    NotFound(PersonId),
    /// Input record failed validation; no mutation was performed.
    Invalid(PersonValidationError),
    /// `add_person_record` carried an id already present in the collection.
    DuplicateId(PersonId),
    /// The mutation was applied in memory but the snapshot write failed;
    /// the change may not survive a restart.
    Persistence(PersistenceWriteError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReady => write!(f, "store is not initialized yet"),
            Self::NotFound(id) => write!(f, "person not found: {id}"),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "person id already exists: {id}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::NotReady | Self::NotFound(_) | Self::DuplicateId(_) => None,
        }
    }
}

impl From<PersonValidationError> for StoreError {
    fn from(value: PersonValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl From<PersistenceWriteError> for StoreError {
    fn from(value: PersistenceWriteError) -> Self {
        Self::Persistence(value)
    }
}

/// Input for `PeopleStore::add_person`. The store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub birthday: String,
    /// Initial ideas; empty when the person starts idea-less.
    pub ideas: Vec<Idea>,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, birthday: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            birthday: birthday.into(),
            ideas: Vec::new(),
        }
    }
}

/// Reactive container over the people collection.
///
/// Single logical owner: all operations go through one instance from one
/// control flow. Idea mutation has no separate API on purpose; ideas are
/// changed by passing a full modified Person to `update_person`, which
/// keeps "ideas only exist inside a person" structurally enforced.
pub struct PeopleStore<G: PersistenceGateway> {
    gateway: G,
    people: Vec<Person>,
    initialized: bool,
    subscribers: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl<G: PersistenceGateway> PeopleStore<G> {
    /// Creates a store that is not yet initialized.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            people: Vec::new(),
            initialized: false,
            subscribers: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Adopts the last persisted snapshot, or an empty collection.
    ///
    /// A read error (corrupt blob, storage failure) falls back to an
    /// empty collection and is logged, never surfaced to the caller.
    /// Calling again after successful initialization is a no-op: the
    /// in-memory collection is authoritative for the running session.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.people = match self.gateway.load() {
            Ok(Some(people)) => {
                info!(
                    "event=store_init module=store status=ok people={}",
                    people.len()
                );
                people
            }
            Ok(None) => {
                info!("event=store_init module=store status=ok people=0 prior_data=none");
                Vec::new()
            }
            Err(err) => {
                warn!("event=store_init module=store status=fallback_empty error={err}");
                Vec::new()
            }
        };
        self.initialized = true;
    }

    /// Returns whether `initialize()` has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current collection in insertion order.
    ///
    /// The borrow is a point-in-time view: every mutation needs
    /// `&mut self`, so the slice cannot change while held.
    pub fn snapshot(&self) -> &[Person] {
        &self.people
    }

    /// Current collection ordered by case-insensitive name, for display.
    pub fn snapshot_sorted_by_name(&self) -> Vec<Person> {
        sorted_by_name(&self.people)
    }

    /// Returns one person by id.
    pub fn find_person(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|person| person.id == id)
    }

    /// Adds a new person, generating its id inside the store.
    ///
    /// # Errors
    /// - `NotReady` before initialization.
    /// - `Invalid` when name/birthday/ideas fail validation.
    /// - `Persistence` when the write-through fails (mutation kept).
    pub fn add_person(&mut self, input: NewPerson) -> StoreResult<Person> {
        self.ensure_ready()?;

        let person = Person {
            id: new_id(),
            name: input.name,
            birthday: input.birthday,
            ideas: input.ideas,
        };
        person.validate()?;

        self.people.push(person.clone());
        self.commit("add_person")?;
        Ok(person)
    }

    /// Adds a person that already carries its id (import path).
    ///
    /// # Errors
    /// - `NotReady` before initialization.
    /// - `Invalid` when the record fails validation (including a nil id).
    /// - `DuplicateId` when the id is already present; no mutation.
    /// - `Persistence` when the write-through fails (mutation kept).
    pub fn add_person_record(&mut self, person: Person) -> StoreResult<Person> {
        self.ensure_ready()?;
        person.validate()?;

        if self.find_person(person.id).is_some() {
            return Err(StoreError::DuplicateId(person.id));
        }

        self.people.push(person.clone());
        self.commit("add_person_record")?;
        Ok(person)
    }

    /// Replaces the whole record with the same id, preserving position.
    ///
    /// This is also the only way to add or remove ideas.
    ///
    /// # Errors
    /// - `NotReady` before initialization.
    /// - `Invalid` when the record fails validation; no mutation.
    /// - `NotFound` when the id is absent; the collection is untouched.
    /// - `Persistence` when the write-through fails (mutation kept).
    pub fn update_person(&mut self, person: Person) -> StoreResult<Person> {
        self.ensure_ready()?;
        person.validate()?;

        let Some(position) = self.people.iter().position(|p| p.id == person.id) else {
            return Err(StoreError::NotFound(person.id));
        };

        self.people[position] = person.clone();
        self.commit("update_person")?;
        Ok(person)
    }

    /// Removes one person and, with it, all their ideas.
    ///
    /// Deleting an absent id is a no-op: no error, no write, no
    /// notification.
    ///
    /// # Errors
    /// - `NotReady` before initialization.
    /// - `Persistence` when the write-through fails (mutation kept).
    pub fn delete_person(&mut self, id: PersonId) -> StoreResult<()> {
        self.ensure_ready()?;

        let Some(position) = self.people.iter().position(|p| p.id == id) else {
            return Ok(());
        };

        self.people.remove(position);
        self.commit("delete_person")?;
        Ok(())
    }

    /// Registers a subscriber invoked with the snapshot after every
    /// accepted mutation. Returns a handle for `unsubscribe`.
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.push((id, listener));
        id
    }

    /// Removes one subscriber. Returns whether the handle was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    fn ensure_ready(&self) -> StoreResult<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(StoreError::NotReady)
        }
    }

    /// Notifies subscribers, then writes the snapshot through.
    ///
    /// Subscribers always observe the latest accepted in-memory state,
    /// even when the durable write afterwards fails.
    fn commit(&mut self, operation: &str) -> StoreResult<()> {
        for (_, listener) in &self.subscribers {
            listener(&self.people);
        }

        if let Err(err) = self.gateway.save(&self.people) {
            error!(
                "event=snapshot_save module=store status=error operation={operation} error={err}"
            );
            return Err(StoreError::Persistence(err));
        }

        Ok(())
    }
}
