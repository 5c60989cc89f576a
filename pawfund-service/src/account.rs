/// Account and session management
///
/// This module provides user registration, authentication and the
/// session lifecycle. The session is an explicit context object with a
/// clear init (login) and teardown (logout) lifecycle; the pointer it
/// wraps is persisted in the store so a restart keeps the visitor
/// logged in, but no code reaches for ambient global state.
///
/// # Session state machine
///
/// ```text
/// LoggedOut → LoggedIn   on successful register/authenticate
/// LoggedIn  → LoggedOut  on logout
/// ```
///
/// Both transitions are cyclic; there is no terminal state. Failures
/// never move the machine: a rejected registration or login leaves the
/// previous session and all stored data untouched.
///
/// # Example
///
/// ```no_run
/// use pawfund_service::account::{AccountService, RegisterRequest};
/// use pawfund_service::config::AccountConfig;
/// use pawfund_shared::store::LocalStore;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(LocalStore::open("./data")?);
/// let accounts = AccountService::new(store, &AccountConfig { starting_fund: 4.0 });
///
/// let user = accounts
///     .register(RegisterRequest {
///         email: "owner@example.com".to_string(),
///         password: "hunter2".to_string(),
///         confirm_password: "hunter2".to_string(),
///     })
///     .await?;
/// assert_eq!(user.fund, 4.0);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

use crate::error::{ServiceError, ServiceResult};
use pawfund_shared::models::user::{CreateUser, User};
use pawfund_shared::store::{LocalStore, StoreError, SESSION};

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// Password confirmation; must match `password` verbatim
    pub confirm_password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password, compared verbatim against the stored one
    pub password: String,
}

/// The persisted session pointer
///
/// A scalar document: the normalized email of the currently logged-in
/// user, or nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionPointer {
    current_user: Option<String>,
}

/// Explicit session context
///
/// Owns the current-user pointer and its lifecycle. Everything that
/// needs to know "who is logged in" asks this object instead of some
/// process-wide global.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<LocalStore>,
}

impl SessionContext {
    /// Creates a session context over the given store
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    /// Establishes a session for the given (already normalized) email
    pub(crate) async fn establish(&self, email: &str) -> Result<(), StoreError> {
        self.store
            .save(
                SESSION,
                &SessionPointer {
                    current_user: Some(email.to_string()),
                },
            )
            .await
    }

    /// Clears the session pointer
    pub(crate) async fn clear(&self) -> Result<(), StoreError> {
        self.store.save(SESSION, &SessionPointer::default()).await
    }

    /// Returns the email the pointer currently designates, if any
    pub async fn current_email(&self) -> Option<String> {
        let pointer: SessionPointer = self.store.load(SESSION).await;
        pointer.current_user
    }
}

/// Account service: registration, authentication, session resolution
#[derive(Clone)]
pub struct AccountService {
    store: Arc<LocalStore>,
    session: SessionContext,
    starting_fund: f64,
}

impl AccountService {
    /// Creates the account service over a store
    pub fn new(store: Arc<LocalStore>, config: &crate::config::AccountConfig) -> Self {
        let session = SessionContext::new(store.clone());
        Self {
            store,
            session,
            starting_fund: config.starting_fund,
        }
    }

    /// Returns the session context shared with the other services
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Registers a new account and establishes its session
    ///
    /// On success the caller proceeds to its dashboard; the new account
    /// starts with the configured sponsorship fund and no pet.
    ///
    /// # Errors
    ///
    /// - `Validation` if a field is empty/invalid or the passwords differ
    /// - `DuplicateAccount` if the email is already registered
    ///   (case-insensitive, trimmed)
    /// - `Store` if persistence fails
    pub async fn register(&self, req: RegisterRequest) -> ServiceResult<User> {
        req.validate()?;

        if req.password != req.confirm_password {
            return Err(ServiceError::validation(
                "confirm_password",
                "Passwords do not match",
            ));
        }

        let email = User::normalize_email(&req.email);
        let created = User::insert(
            &self.store,
            CreateUser {
                email: email.clone(),
                password: req.password,
                fund: self.starting_fund,
            },
        )
        .await?;

        let user = created.ok_or(ServiceError::DuplicateAccount(email))?;
        self.session.establish(&user.email).await?;

        Ok(user)
    }

    /// Authenticates an existing account and establishes its session
    ///
    /// The stored password is compared verbatim: this is a local demo
    /// service with no real authentication.
    ///
    /// # Errors
    ///
    /// - `Validation` if the request is malformed
    /// - `InvalidCredentials` on unknown email or password mismatch
    /// - `Store` if the session pointer cannot be persisted
    pub async fn authenticate(&self, req: LoginRequest) -> ServiceResult<User> {
        req.validate()?;

        let user = User::find_by_email(&self.store, &req.email)
            .await
            .ok_or(ServiceError::InvalidCredentials)?;

        if user.password != req.password {
            return Err(ServiceError::InvalidCredentials);
        }

        self.session.establish(&user.email).await?;
        info!(email = %user.email, "Session established");

        Ok(user)
    }

    /// Clears the session pointer
    ///
    /// # Errors
    ///
    /// Returns `Store` if the cleared pointer cannot be persisted.
    pub async fn logout(&self) -> ServiceResult<()> {
        self.session.clear().await?;
        info!("Session cleared");
        Ok(())
    }

    /// Resolves the session pointer to a stored user
    ///
    /// An absent pointer or a pointer whose referent no longer exists
    /// both mean "not logged in"; the caller is expected to redirect to
    /// its login page.
    pub async fn current_user(&self) -> Option<User> {
        let email = self.session.current_email().await?;
        let user = User::find_by_email(&self.store, &email).await;
        if user.is_none() {
            debug!(email = %email, "Session pointer references a missing account");
        }
        user
    }
}
