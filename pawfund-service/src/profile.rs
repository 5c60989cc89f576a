/// Pet profile workflow
///
/// This module captures and edits a user's pet profile: the identity
/// form, the veterinary certificate, and the photo album. File ingestion
/// happens before any write, behind the all-of barrier of the `ingest`
/// module, so a save either lands completely or not at all.
///
/// # Validation policy
///
/// The relaxed policy: `name` and `breed` are required (a listing entry
/// without them is useless for browsing and matching); every other field
/// is optional, and a save may carry zero photos. New photos are
/// **appended** to the existing album in selection order.
///
/// # Commenting
///
/// Photo comments are never collected during ingestion; they are attached
/// or edited afterwards with `attach_photo_comment`, so no interactive
/// step can block the read barrier.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::config::IngestConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::ingest::{self, FileUpload};
use pawfund_shared::models::pet::{Pet, Photo};
use pawfund_shared::models::user::User;
use pawfund_shared::store::LocalStore;

/// The pet identity form
///
/// Field values arrive from the presentation layer already trimmed of
/// any UI concerns; only `name` and `breed` are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    /// Pet name (required)
    #[validate(length(min = 1, message = "Pet name is required"))]
    pub name: String,

    /// Breed (required)
    #[validate(length(min = 1, message = "Breed is required"))]
    pub breed: String,

    /// Date of birth, if known
    pub date_of_birth: Option<NaiveDate>,

    /// Explicit age in whole years; takes precedence over the derived age
    pub age_years: Option<u32>,

    /// Free-text description
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
}

impl ProfileForm {
    /// Projects a stored pet back into form state (for the edit form)
    pub fn from_pet(pet: &Pet) -> Self {
        Self {
            name: pet.name.clone(),
            breed: pet.breed.clone(),
            date_of_birth: pet.date_of_birth,
            age_years: pet.age_years,
            description: pet.description.clone(),
            food: pet.food.clone(),
            toy: pet.toy.clone(),
            behavior: pet.behavior.clone(),
        }
    }
}

/// Pet profile service
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<LocalStore>,
    ingest: IngestConfig,
}

impl ProfileService {
    /// Creates the profile service over a store
    pub fn new(store: Arc<LocalStore>, config: &IngestConfig) -> Self {
        Self {
            store,
            ingest: config.clone(),
        }
    }

    /// Returns the user's stored pet, if any (direct field read)
    pub async fn load_profile(&self, email: &str) -> Option<Pet> {
        User::find_by_email(&self.store, email).await?.pet
    }

    /// Returns form state prefilled from the stored pet
    ///
    /// Pure read; has no side effects. Rendering the form itself is the
    /// presentation layer's concern.
    pub async fn edit_profile(&self, email: &str) -> Option<ProfileForm> {
        let pet = self.load_profile(email).await?;
        Some(ProfileForm::from_pet(&pet))
    }

    /// Saves the pet profile: form fields plus optional file uploads
    ///
    /// All file reads resolve behind the ingestion barrier before any
    /// write happens; a read failure, size violation or timeout rejects
    /// the save and leaves the previously stored pet intact. On success
    /// the new photos are appended to the existing album (insertion
    /// order preserved), a newly uploaded vet certificate replaces the
    /// old one (otherwise the old one is kept), and the returned `Pet`
    /// is exactly what was persisted.
    ///
    /// # Errors
    ///
    /// - `Validation` if `name` or `breed` is empty
    /// - `FileRead` / `FileReadTimeout` / `FileTooLarge` from ingestion
    /// - `NotFound` if no account exists for `email`
    /// - `Store` if persistence fails
    pub async fn save_profile(
        &self,
        email: &str,
        form: ProfileForm,
        vet_file: Option<FileUpload>,
        photo_files: Vec<FileUpload>,
    ) -> ServiceResult<Pet> {
        form.validate()?;

        // One barrier over every pending read: the vet certificate and
        // all photos are ingested concurrently, and nothing is written
        // until the last of them has resolved.
        let vet_task = async {
            match &vet_file {
                Some(upload) => ingest::read_one(upload, &self.ingest).await.map(Some),
                None => Ok(None),
            }
        };
        let photos_task = ingest::read_all(photo_files, &self.ingest);
        let (new_vet, new_photos) = tokio::try_join!(vet_task, photos_task)?;

        let photo_count = new_photos.len();
        let updated = User::upsert_pet(&self.store, email, move |previous| {
            let (mut photos, previous_vet) = match previous {
                Some(pet) => (pet.photos, pet.vet_document),
                None => (Vec::new(), None),
            };
            photos.extend(new_photos.into_iter().map(|attachment| Photo {
                filename: attachment.filename,
                data: attachment.data,
                comment: String::new(),
            }));

            Pet {
                name: form.name,
                breed: form.breed,
                date_of_birth: form.date_of_birth,
                age_years: form.age_years,
                description: form.description,
                food: form.food,
                toy: form.toy,
                behavior: form.behavior,
                vet_document: new_vet.or(previous_vet),
                photos,
            }
        })
        .await?;

        let user = updated.ok_or_else(|| ServiceError::NotFound(email.to_string()))?;
        // upsert_pet always stores Some(pet) for an existing user
        let pet = user
            .pet
            .ok_or_else(|| ServiceError::NotFound(email.to_string()))?;

        info!(email = %user.email, photos = photo_count, "Saved pet profile");
        Ok(pet)
    }

    /// Appends photos to an existing pet's album without touching the form
    ///
    /// This is the standalone album flow: it requires a saved profile and
    /// goes through the same ingestion barrier as a full save.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the account or its pet does not exist
    /// - ingestion errors as for `save_profile`
    pub async fn add_photos(
        &self,
        email: &str,
        photo_files: Vec<FileUpload>,
    ) -> ServiceResult<Pet> {
        let new_photos = ingest::read_all(photo_files, &self.ingest).await?;

        let updated = User::modify_pet(&self.store, email, move |pet| {
            pet.photos.extend(new_photos.into_iter().map(|attachment| Photo {
                filename: attachment.filename,
                data: attachment.data,
                comment: String::new(),
            }));
        })
        .await?;

        let user = updated.ok_or_else(|| ServiceError::NotFound(email.to_string()))?;
        user.pet
            .ok_or_else(|| ServiceError::NotFound(email.to_string()))
    }

    /// Attaches or edits the free-text comment of an album photo
    ///
    /// Decoupled from ingestion: comments are written against photos
    /// that are already stored, identified by their position in the
    /// album. The index is validated against the album as it exists
    /// under the update lock, not against an earlier read.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the account or its pet does not exist
    /// - `Validation` if `index` is outside the album
    /// - `Store` if persistence fails
    pub async fn attach_photo_comment(
        &self,
        email: &str,
        index: usize,
        comment: impl Into<String>,
    ) -> ServiceResult<Pet> {
        let comment = comment.into();
        let updated = User::modify_pet(&self.store, email, move |pet| {
            if let Some(photo) = pet.photos.get_mut(index) {
                photo.comment = comment;
            }
        })
        .await?;

        let user = updated.ok_or_else(|| ServiceError::NotFound(email.to_string()))?;
        let pet = user
            .pet
            .ok_or_else(|| ServiceError::NotFound(email.to_string()))?;

        // The closure edited (or skipped) exactly this persisted album,
        // so the bound check here cannot disagree with what was stored.
        if index >= pet.photos.len() {
            return Err(ServiceError::validation(
                "photo_index",
                format!("No photo at position {index}"),
            ));
        }

        Ok(pet)
    }
}
