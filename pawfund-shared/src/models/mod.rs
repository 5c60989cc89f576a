/// Data models for PawFund
///
/// This module contains all persisted entity types and their per-entity
/// store operations.
///
/// # Models
///
/// - `user`: registered accounts, each owning an optional pet profile
/// - `pet`: the canonical pet profile (photos, vet certificate, age)
/// - `seeker`: breed/age search preferences and the matching rule
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
/// let user = User::insert(
///     &store,
///     CreateUser {
///         email: "owner@example.com".to_string(),
///         password: "hunter2".to_string(),
///         fund: 4.0,
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod pet;
pub mod seeker;
pub mod user;
