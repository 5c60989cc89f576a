//! # PawFund Service Library
//!
//! Service layer of the PawFund demo: registration and login over a
//! local JSON store, the pet profile workflow with asynchronous file
//! ingestion, and the public adoptable listing with seeker matching.
//!
//! Everything runs in-process against files on disk. There is no
//! network surface and no real authentication; this crate exists so a
//! presentation layer (or a test) can drive the whole sponsorship flow
//! through typed service calls.
//!
//! ## Modules
//!
//! - [`account`]: registration, login, the explicit session context
//! - [`app`]: configuration plus store plus services, assembled
//! - [`config`]: environment-driven configuration
//! - [`error`]: the unified service error type
//! - [`ingest`]: all-of file ingestion barrier producing data URIs
//! - [`listing`]: public browsing and seeker matching
//! - [`profile`]: pet profile capture, album appends, photo comments
//! - [`telemetry`]: tracing subscriber setup

pub mod account;
pub mod app;
pub mod config;
pub mod error;
pub mod ingest;
pub mod listing;
pub mod profile;
pub mod telemetry;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
