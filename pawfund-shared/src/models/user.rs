/// User model and store operations
///
/// This module provides the `User` model and the per-entity persistence
/// operations over the local store. Users are keyed by their normalized
/// (trimmed, lowercased) email address; uniqueness is enforced at insert
/// time inside the store's update lock.
///
/// # Example
///
/// ```no_run
/// use pawfund_shared::models::user::{CreateUser, User};
/// use pawfund_shared::store::LocalStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = LocalStore::open("./data")?;
///
/// let created = User::insert(
///     &store,
///     CreateUser {
///         email: "owner@example.com".to_string(),
///         password: "hunter2".to_string(),
///         fund: 4.0,
///     },
/// )
/// .await?;
///
/// if created.is_none() {
///     println!("email already registered");
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::pet::Pet;
use crate::store::{LocalStore, StoreError, USERS};

/// A registered account
///
/// Lifecycle: created at registration, pet set or replaced on profile
/// save, never deleted. Exactly one pet belongs to at most one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Normalized email address; unique across all users
    pub email: String,

    /// Password, compared verbatim at login
    ///
    /// This is a local demo service with no real authentication; the
    /// password is stored as entered and never hashed.
    pub password: String,

    /// Sponsorship fund balance in euros; never negative
    pub fund: f64,

    /// The user's pet profile, once the profile form has been saved
    pub pet: Option<Pet>,

    /// When the account was registered
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address (normalized before storage)
    pub email: String,

    /// Password as entered
    pub password: String,

    /// Starting sponsorship fund
    pub fund: f64,
}

impl User {
    /// Normalizes an email for storage and lookup: trimmed and lowercased
    pub fn normalize_email(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Creates a new user unless the email is already taken
    ///
    /// The duplicate check and the insert happen inside one store update,
    /// so two racing registrations cannot both claim the same email.
    ///
    /// # Returns
    ///
    /// `Some(user)` on success, `None` if the normalized email already
    /// exists (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the users collection cannot be persisted.
    pub async fn insert(store: &LocalStore, data: CreateUser) -> Result<Option<Self>, StoreError> {
        let email = Self::normalize_email(&data.email);

        let created = store
            .update(USERS, move |users: &mut Vec<User>| {
                if users.iter().any(|u| u.email == email) {
                    return None;
                }
                let user = User {
                    email,
                    password: data.password,
                    fund: data.fund,
                    pet: None,
                    created_at: Utc::now(),
                };
                users.push(user.clone());
                Some(user)
            })
            .await?;

        if let Some(user) = &created {
            info!(email = %user.email, "Registered new account");
        }
        Ok(created)
    }

    /// Finds a user by email address (case-insensitive)
    pub async fn find_by_email(store: &LocalStore, email: &str) -> Option<Self> {
        let email = Self::normalize_email(email);
        let users: Vec<User> = store.load(USERS).await;
        users.into_iter().find(|u| u.email == email)
    }

    /// Lists all users in registration order
    pub async fn list(store: &LocalStore) -> Vec<Self> {
        store.load(USERS).await
    }

    /// Sets or replaces the user's pet profile
    ///
    /// The users collection is re-read under the store's update lock
    /// immediately before the write, so a concurrent save cannot be
    /// clobbered. The returned user reflects exactly what was persisted.
    ///
    /// # Returns
    ///
    /// The updated user, or `None` if no user with that email exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the users collection cannot be persisted.
    pub async fn set_pet(
        store: &LocalStore,
        email: &str,
        pet: Pet,
    ) -> Result<Option<Self>, StoreError> {
        let email = Self::normalize_email(email);

        store
            .update(USERS, move |users: &mut Vec<User>| {
                let user = users.iter_mut().find(|u| u.email == email)?;
                user.pet = Some(pet);
                Some(user.clone())
            })
            .await
    }

    /// Builds and stores the user's pet from its previous value
    ///
    /// The closure receives the previously stored pet (if any) and returns
    /// the pet to persist; it runs under the store's update lock against
    /// the freshly re-read record, so merge decisions (appending to the
    /// existing photo album, keeping the old vet certificate) cannot race
    /// with a concurrent save.
    ///
    /// # Returns
    ///
    /// The updated user, or `None` if no user with that email exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the users collection cannot be persisted.
    pub async fn upsert_pet<F>(
        store: &LocalStore,
        email: &str,
        f: F,
    ) -> Result<Option<Self>, StoreError>
    where
        F: FnOnce(Option<Pet>) -> Pet + Send + 'static,
    {
        let email = Self::normalize_email(email);

        store
            .update(USERS, move |users: &mut Vec<User>| {
                let user = users.iter_mut().find(|u| u.email == email)?;
                user.pet = Some(f(user.pet.take()));
                Some(user.clone())
            })
            .await
    }

    /// Applies an in-place edit to the user's existing pet
    ///
    /// Used for the small post-save edits (photo comments, album appends)
    /// that must not rebuild the whole profile. The closure runs under the
    /// store's update lock against the freshly re-read user record.
    ///
    /// # Returns
    ///
    /// The updated user, or `None` if the user or their pet is missing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the users collection cannot be persisted.
    pub async fn modify_pet<F>(
        store: &LocalStore,
        email: &str,
        f: F,
    ) -> Result<Option<Self>, StoreError>
    where
        F: FnOnce(&mut Pet) + Send + 'static,
    {
        let email = Self::normalize_email(email);

        store
            .update(USERS, move |users: &mut Vec<User>| {
                let user = users.iter_mut().find(|u| u.email == email)?;
                let pet = user.pet.as_mut()?;
                f(pet);
                Some(user.clone())
            })
            .await
    }
}
