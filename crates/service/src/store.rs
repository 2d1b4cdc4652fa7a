use crate::catalog::{Catalog, Review};
use crate::errors::ServiceError;
use crate::reviews::{self, ReviewOutcome};
use crate::users::{Identity, User, UserDirectory};

/// Owned process state: the catalog and the user directory.
#[derive(Debug, Clone, Default)]
pub struct Bookstore {
    catalog: Catalog,
    users: UserDirectory,
}

impl Bookstore {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog, users: UserDirectory::new() }
    }

    pub fn seeded() -> Self {
        Self::new(Catalog::seeded())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<(), ServiceError> {
        self.users.register(username, password)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<&User, ServiceError> {
        self.users.authenticate(username, password)
    }

    pub fn resolve_identity(&self, claimed: Option<&str>) -> Result<Identity, ServiceError> {
        self.users.resolve_identity(claimed)
    }

    pub fn upsert_review(&mut self, identity: &Identity, isbn: &str, text: &str) -> Result<ReviewOutcome, ServiceError> {
        reviews::upsert_review(&mut self.catalog, identity, isbn, text)
    }

    pub fn delete_review(&mut self, identity: &Identity, isbn: &str) -> Result<Review, ServiceError> {
        reviews::delete_review(&mut self.catalog, identity, isbn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_scenario_on_seeded_store() {
        let mut store = Bookstore::seeded();
        assert_eq!(store.catalog().get_reviews("123456").unwrap().len(), 2);

        store.register("john", "pw").unwrap();
        let john = store.resolve_identity(Some("john")).unwrap();
        store.upsert_review(&john, "123456", "loved it").unwrap();

        let reviews = store.catalog().get_reviews("123456").unwrap();
        assert_eq!(reviews.len(), 3);
        assert_eq!(reviews.last(), Some(&Review::owned("john", "loved it")));
    }

    #[test]
    fn unknown_user_cannot_obtain_identity() {
        let store = Bookstore::seeded();
        assert_eq!(store.resolve_identity(Some("ghost")), Err(ServiceError::Unauthorized));
        assert_eq!(store.catalog().get_reviews("123456").unwrap().len(), 2);
    }

    #[test]
    fn stores_are_isolated() {
        let mut a = Bookstore::seeded();
        let b = Bookstore::seeded();
        a.register("alice", "pw").unwrap();
        assert_eq!(a.users().len(), 1);
        assert!(b.users().is_empty());
        assert!(b.authenticate("alice", "pw").is_err());
    }
}
