/// Adoptable pet listing and seeker matching
///
/// This module serves the public browsing surface: every user who has
/// saved a pet profile appears as an adoptable listing, and visitors can
/// register breed/age preferences to be told about matching pets.
///
/// Notification here is advisory only. The demo has no mail transport,
/// so a match is surfaced as a structured log line and returned to the
/// caller; nothing is queued or retried.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::error::ServiceResult;
use pawfund_shared::models::pet::Pet;
use pawfund_shared::models::seeker::SeekerPreference;
use pawfund_shared::models::user::User;
use pawfund_shared::store::LocalStore;

/// Seeker registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SeekerRequest {
    /// Contact email for notifications
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Breed substring filter; blank means any breed
    pub breed: Option<String>,

    /// Maximum acceptable age in years; absent means any age
    pub max_age: Option<u32>,
}

/// One entry of the public adoptable list
///
/// Carries the sponsorship fund so the browsing page can show how much
/// has been raised for each dog.
#[derive(Debug, Clone, Serialize)]
pub struct AdoptableListing {
    /// Owner account the pet belongs to
    pub owner_email: String,

    /// Sponsorship fund raised for this pet, in euros
    pub fund: f64,

    /// The pet profile itself
    pub pet: Pet,
}

/// Listing service: public browsing and seeker matching
#[derive(Clone)]
pub struct ListingService {
    store: Arc<LocalStore>,
}

impl ListingService {
    /// Creates the listing service over a store
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    /// Returns every user with a saved pet profile, in registration order
    ///
    /// The home page and the full browsing page share this query; they
    /// differ only in how many entries they render.
    pub async fn list_adoptable_pets(&self) -> Vec<AdoptableListing> {
        User::list(&self.store)
            .await
            .into_iter()
            .filter_map(|user| {
                let pet = user.pet?;
                Some(AdoptableListing {
                    owner_email: user.email,
                    fund: user.fund,
                    pet,
                })
            })
            .collect()
    }

    /// Registers a seeker preference
    ///
    /// Preferences are append-only and independent of user accounts;
    /// registering the same criteria twice simply notifies twice.
    ///
    /// # Errors
    ///
    /// - `Validation` if the email is malformed
    /// - `Store` if the seekers collection cannot be persisted
    pub async fn register_seeker(&self, req: SeekerRequest) -> ServiceResult<SeekerPreference> {
        req.validate()?;

        let preference = SeekerPreference::new(
            User::normalize_email(&req.email),
            req.breed.as_deref(),
            req.max_age,
        );
        preference.clone().insert(&self.store).await?;
        info!(email = %preference.email, "Registered seeker preference");

        Ok(preference)
    }

    /// Returns the emails of every seeker whose preference matches `pet`
    ///
    /// Seekers are returned in registration order, duplicates included.
    pub async fn match_seekers(&self, pet: &Pet, now: NaiveDate) -> Vec<String> {
        SeekerPreference::list(&self.store)
            .await
            .into_iter()
            .filter(|seeker| seeker.matches(pet, now))
            .map(|seeker| seeker.email)
            .collect()
    }

    /// Logs a notification line for every seeker matching `pet`
    ///
    /// Returns the notified emails so the caller can surface them too.
    pub async fn notify_seekers(&self, pet: &Pet, now: NaiveDate) -> Vec<String> {
        let matched = self.match_seekers(pet, now).await;
        for email in &matched {
            info!(
                seeker = %email,
                pet = %pet.name,
                breed = %pet.breed,
                "Pet matches a registered seeker preference"
            );
        }
        matched
    }
}
