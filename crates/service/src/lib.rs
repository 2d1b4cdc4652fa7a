//! Bookstore business logic, independent of the web framework.
//! - `catalog`: seeded book records and read-only lookups.
//! - `users`: registration, login, and identity resolution for gated operations.
//! - `reviews`: one-review-per-user upsert/delete rules.
//! - `store`: the owned [`store::Bookstore`] that ties them together.

pub mod catalog;
pub mod errors;
pub mod reviews;
pub mod store;
pub mod users;

pub use catalog::{Book, Catalog, Review};
pub use errors::ServiceError;
pub use reviews::ReviewOutcome;
pub use store::Bookstore;
pub use users::{Identity, User, UserDirectory};
