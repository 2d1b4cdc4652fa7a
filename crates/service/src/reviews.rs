//! One-review-per-user rules over a book's review list.
//!
//! Only owned reviews take part in matching, and only the first entry owned by
//! a user is ever touched.

use tracing::info;

use crate::catalog::{Catalog, Review};
use crate::errors::ServiceError;
use crate::users::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Added,
    Modified,
}

impl ReviewOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewOutcome::Added => "added",
            ReviewOutcome::Modified => "modified",
        }
    }
}

/// Replace the user's review text in place, or append a new owned review.
pub fn upsert_review(
    catalog: &mut Catalog,
    identity: &Identity,
    isbn: &str,
    text: &str,
) -> Result<ReviewOutcome, ServiceError> {
    let book = catalog.find_by_isbn_mut(isbn)?;
    let username = identity.username();

    let existing = book.reviews.iter_mut().find_map(|r| match r {
        Review::Owned { username: owner, review } if *owner == username => Some(review),
        _ => None,
    });
    let outcome = match existing {
        Some(review) => {
            *review = text.to_string();
            ReviewOutcome::Modified
        }
        None => {
            book.reviews.push(Review::owned(username, text));
            ReviewOutcome::Added
        }
    };
    info!(%isbn, %username, outcome = outcome.as_str(), "review_upserted");
    Ok(outcome)
}

/// Remove the user's review, keeping the order of the remaining entries.
pub fn delete_review(catalog: &mut Catalog, identity: &Identity, isbn: &str) -> Result<Review, ServiceError> {
    let book = catalog.find_by_isbn_mut(isbn)?;
    let username = identity.username();
    let idx = book
        .reviews
        .iter()
        .position(|r| r.is_owned_by(username))
        .ok_or(ServiceError::ReviewNotFound)?;
    let removed = book.reviews.remove(idx);
    info!(%isbn, %username, "review_deleted");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Book;
    use crate::users::UserDirectory;
    use serde_json::json;

    fn setup(users: &[&str]) -> (Catalog, UserDirectory) {
        let mut dir = UserDirectory::new();
        for u in users {
            dir.register(u, "pw").unwrap();
        }
        (Catalog::seeded(), dir)
    }

    fn owned_by<'a>(catalog: &'a Catalog, isbn: &str, user: &str) -> Vec<&'a Review> {
        catalog.get_reviews(isbn).unwrap().iter().filter(|r| r.is_owned_by(user)).collect()
    }

    #[test]
    fn upsert_twice_keeps_a_single_review() {
        let (mut c, dir) = setup(&["alice"]);
        let alice = dir.resolve_identity(Some("alice")).unwrap();

        assert_eq!(upsert_review(&mut c, &alice, "456", "x").unwrap(), ReviewOutcome::Added);
        assert_eq!(upsert_review(&mut c, &alice, "456", "x").unwrap(), ReviewOutcome::Modified);

        let mine = owned_by(&c, "456", "alice");
        assert_eq!(mine, vec![&Review::owned("alice", "x")]);
    }

    #[test]
    fn modify_preserves_position() {
        let (mut c, dir) = setup(&["alice", "bob", "carol"]);
        let ids: Vec<Identity> = ["alice", "bob", "carol"]
            .iter()
            .map(|u| dir.resolve_identity(Some(*u)).unwrap())
            .collect();
        for id in &ids {
            upsert_review(&mut c, id, "123456", "first").unwrap();
        }

        upsert_review(&mut c, &ids[1], "123456", "changed").unwrap();

        let reviews = c.get_reviews("123456").unwrap();
        assert_eq!(reviews.len(), 5);
        assert_eq!(reviews[2], Review::owned("alice", "first"));
        assert_eq!(reviews[3], Review::owned("bob", "changed"));
        assert_eq!(reviews[4], Review::owned("carol", "first"));
    }

    #[test]
    fn upsert_on_missing_book_is_not_found() {
        let (mut c, dir) = setup(&["alice"]);
        let alice = dir.resolve_identity(Some("alice")).unwrap();
        assert_eq!(upsert_review(&mut c, &alice, "nope", "x"), Err(ServiceError::BookNotFound));
    }

    #[test]
    fn delete_removes_one_and_keeps_order() {
        let (mut c, dir) = setup(&["alice", "bob"]);
        let alice = dir.resolve_identity(Some("alice")).unwrap();
        let bob = dir.resolve_identity(Some("bob")).unwrap();
        upsert_review(&mut c, &bob, "34", "A").unwrap();
        upsert_review(&mut c, &alice, "34", "B").unwrap();
        c.find_by_isbn_mut("34").unwrap().reviews.push(Review::Placeholder(json!("C")));

        let removed = delete_review(&mut c, &alice, "34").unwrap();
        assert_eq!(removed, Review::owned("alice", "B"));
        assert_eq!(
            c.get_reviews("34").unwrap(),
            &[Review::owned("bob", "A"), Review::Placeholder(json!("C"))]
        );
    }

    #[test]
    fn delete_distinguishes_missing_book_and_missing_review() {
        let (mut c, dir) = setup(&["alice"]);
        let alice = dir.resolve_identity(Some("alice")).unwrap();
        assert_eq!(delete_review(&mut c, &alice, "nope"), Err(ServiceError::BookNotFound));
        assert_eq!(delete_review(&mut c, &alice, "123456"), Err(ServiceError::ReviewNotFound));
        assert_eq!(c.get_reviews("123456").unwrap().len(), 2);
    }

    #[test]
    fn only_first_duplicate_is_touched() {
        let mut dir = UserDirectory::new();
        dir.register("alice", "pw").unwrap();
        let alice = dir.resolve_identity(Some("alice")).unwrap();
        let mut c = Catalog::from_books(vec![Book::new("1", "T", "A").with_reviews(vec![
            Review::owned("alice", "one"),
            Review::owned("alice", "two"),
        ])])
        .unwrap();

        upsert_review(&mut c, &alice, "1", "edited").unwrap();
        assert_eq!(
            c.get_reviews("1").unwrap(),
            &[Review::owned("alice", "edited"), Review::owned("alice", "two")]
        );

        delete_review(&mut c, &alice, "1").unwrap();
        assert_eq!(c.get_reviews("1").unwrap(), &[Review::owned("alice", "two")]);
    }

    #[test]
    fn placeholders_are_never_touched() {
        let (mut c, dir) = setup(&["alice"]);
        let alice = dir.resolve_identity(Some("alice")).unwrap();
        upsert_review(&mut c, &alice, "123456", "mine").unwrap();
        delete_review(&mut c, &alice, "123456").unwrap();
        assert_eq!(
            c.get_reviews("123456").unwrap(),
            &[Review::Placeholder(json!("best book of the year")), Review::Placeholder(json!({}))]
        );
    }
}
