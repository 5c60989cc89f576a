/// Seeker preference model and matching
///
/// A seeker is a visitor who registered breed/age search criteria to be
/// notified about matching pets. Preferences form an independent
/// collection: they are never linked back to a user record and only meet
/// pets at notification time.
///
/// # Matching rule
///
/// A seeker matches a pet iff:
/// - no breed filter is set, OR the pet's breed case-insensitively
///   contains the filter substring; AND
/// - no age filter is set, OR the pet's resolved age is known and at
///   most `max_age`. A pet with unknown age never satisfies an age
///   filter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::pet::Pet;
use crate::store::{LocalStore, StoreError, SEEKERS};

/// A registered search preference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekerPreference {
    /// Contact email for notifications
    pub email: String,

    /// Breed substring filter, stored case-folded; `None` matches any breed
    pub breed: Option<String>,

    /// Maximum acceptable age in years; `None` matches any age
    pub max_age: Option<u32>,
}

impl SeekerPreference {
    /// Builds a preference, case-folding the breed filter
    ///
    /// A blank breed filter is treated as absent.
    pub fn new(email: impl Into<String>, breed: Option<&str>, max_age: Option<u32>) -> Self {
        let breed = breed
            .map(|b| b.trim().to_lowercase())
            .filter(|b| !b.is_empty());
        Self {
            email: email.into(),
            breed,
            max_age,
        }
    }

    /// Tests whether this preference matches a pet at the given date
    pub fn matches(&self, pet: &Pet, now: NaiveDate) -> bool {
        if let Some(breed) = &self.breed {
            if !pet.breed.to_lowercase().contains(breed.as_str()) {
                return false;
            }
        }

        if let Some(max_age) = self.max_age {
            match pet.resolved_age(now) {
                Some(age) if age <= max_age => {}
                _ => return false,
            }
        }

        true
    }

    /// Appends this preference to the seekers collection
    ///
    /// No duplicate suppression: registering twice notifies twice.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the seekers collection cannot be persisted.
    pub async fn insert(self, store: &LocalStore) -> Result<(), StoreError> {
        store
            .update(SEEKERS, move |seekers: &mut Vec<SeekerPreference>| {
                seekers.push(self);
            })
            .await
    }

    /// Lists all registered preferences in registration order
    pub async fn list(store: &LocalStore) -> Vec<Self> {
        store.load(SEEKERS).await
    }
}
