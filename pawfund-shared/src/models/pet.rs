/// Pet profile model
///
/// This module provides the canonical `Pet` shape. Earlier revisions of
/// the service stored pets in two loosely-typed variants (with or without
/// an explicit age, single photo slot vs. photo array); those are
/// reconciled here into one schema: `photos` is always an ordered vector
/// and the explicit age is always an `Option`.
///
/// # Age resolution
///
/// The displayed/matched age prefers the explicit `age_years` field; if
/// absent it is derived from `date_of_birth` using a 365.25-day year,
/// floored; if neither is present the age is unknown. Resolution is
/// deterministic for a fixed "now", which is why `resolved_age` takes the
/// reference date as an argument instead of reading the clock.
///
/// # Example
///
/// ```
/// use pawfund_shared::models::pet::Pet;
/// use chrono::NaiveDate;
///
/// let mut pet = Pet::new("Rex", "Labrador");
/// pet.date_of_birth = NaiveDate::from_ymd_opt(2022, 3, 1);
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
/// assert_eq!(pet.resolved_age(now), Some(2));
/// ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Length of a year in days used for age derivation
pub const DAYS_PER_YEAR: f64 = 365.25;

/// An embedded binary file (vet certificate) stored as a data URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Original filename as selected by the user
    pub filename: String,

    /// File content as a base64 data URI, embeddable in JSON
    pub data: String,
}

/// A photo in the pet's album
///
/// Photos keep their insertion order; the first photo of the album is the
/// canonical display image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Original filename as selected by the user
    pub filename: String,

    /// Image content as a base64 data URI
    pub data: String,

    /// Free-text comment, attached or edited after ingestion
    ///
    /// Empty until the owner writes one; never collected while the
    /// photo is being read in.
    #[serde(default)]
    pub comment: String,
}

/// A sponsored pet's profile
///
/// Exactly one pet belongs to each user that has completed the profile
/// form; the pet has no identity of its own outside its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    /// Pet name
    pub name: String,

    /// Breed, matched case-insensitively against seeker filters
    pub breed: String,

    /// Date of birth, if known
    pub date_of_birth: Option<NaiveDate>,

    /// Explicit age in whole years; takes precedence over the derived age
    pub age_years: Option<u32>,

    /// Free-text description shown on listings
    #[serde(default)]
    pub description: String,

    /// Favourite food
    #[serde(default)]
    pub food: String,

    /// Favourite toy
    #[serde(default)]
    pub toy: String,

    /// Behaviour notes
    #[serde(default)]
    pub behavior: String,

    /// Veterinary certificate, if uploaded
    pub vet_document: Option<Attachment>,

    /// Photo album in insertion order; the first entry is the display image
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl Pet {
    /// Creates a pet with the required identity fields and everything else empty
    pub fn new(name: impl Into<String>, breed: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            breed: breed.into(),
            date_of_birth: None,
            age_years: None,
            description: String::new(),
            food: String::new(),
            toy: String::new(),
            behavior: String::new(),
            vet_document: None,
            photos: Vec::new(),
        }
    }

    /// Resolves the pet's age in whole years at the given reference date
    ///
    /// Explicit `age_years` wins; otherwise the age is derived from
    /// `date_of_birth` with a 365.25-day year, floored. A date of birth in
    /// the future clamps to zero rather than going negative. Returns
    /// `None` when neither field is set.
    pub fn resolved_age(&self, now: NaiveDate) -> Option<u32> {
        if let Some(age) = self.age_years {
            return Some(age);
        }

        let dob = self.date_of_birth?;
        let days = (now - dob).num_days();
        if days <= 0 {
            return Some(0);
        }

        Some((days as f64 / DAYS_PER_YEAR).floor() as u32)
    }

    /// Returns the canonical display photo (first of the album), if any
    pub fn display_photo(&self) -> Option<&Photo> {
        self.photos.first()
    }
}
