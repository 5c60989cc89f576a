/// Local persistence layer for PawFund
///
/// This module provides the local key-value store that backs all PawFund
/// collections. Data lives as plain JSON documents in a single directory,
/// one file per collection.
///
/// # Collections
///
/// - `users`: all registered accounts, each with an optional pet profile
/// - `seekers`: registered search preferences
/// - `session`: the current-user pointer (scalar)
///
/// Callers never touch whole collections directly: the per-entity
/// operations on the model types (`User::insert`, `SeekerPreference::list`,
/// ...) are the public persistence contract. Decode failures are recovered
/// inside the store by substituting the collection's empty default.
///
/// # Example
///
/// ```no_run
/// use pawfund_shared::store::{LocalStore, USERS};
/// use pawfund_shared::models::user::User;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = LocalStore::open("./data")?;
/// let users: Vec<User> = store.load(USERS).await;
/// println!("{} registered accounts", users.len());
/// # Ok(())
/// # }
/// ```

pub mod local;

pub use local::{LocalStore, StoreError};

/// Collection key for registered accounts
pub const USERS: &str = "users";

/// Collection key for seeker preferences
pub const SEEKERS: &str = "seekers";

/// Collection key for the current-user session pointer
pub const SESSION: &str = "session";
