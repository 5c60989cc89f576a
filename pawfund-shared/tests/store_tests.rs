/// Integration tests for the local store and model operations
///
/// These tests exercise the store against a real (temporary) data
/// directory: decode-failure recovery, round-trip idempotence, and the
/// per-entity user/seeker operations layered on top.
///
/// Run with: cargo test -p pawfund-shared --test store_tests

use pawfund_shared::models::pet::Pet;
use pawfund_shared::models::seeker::SeekerPreference;
use pawfund_shared::models::user::{CreateUser, User};
use pawfund_shared::store::{LocalStore, SEEKERS, USERS};

fn temp_store() -> (tempfile::TempDir, LocalStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalStore::open(dir.path()).expect("open store");
    (dir, store)
}

fn create_request(email: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password: "hunter2".to_string(),
        fund: 4.0,
    }
}

#[tokio::test]
async fn test_fresh_store_has_empty_collections() {
    let (_dir, store) = temp_store();

    assert!(User::list(&store).await.is_empty());
    assert!(SeekerPreference::list(&store).await.is_empty());
}

#[tokio::test]
async fn test_corrupt_users_document_recovers_to_empty() {
    let (_dir, store) = temp_store();

    User::insert(&store, create_request("owner@example.com"))
        .await
        .expect("insert");

    // Corrupt the document on disk behind the store's back
    std::fs::write(store.document_path(USERS), b"][ definitely not json").expect("corrupt");

    // Load recovers with the empty default instead of failing
    let users = User::list(&store).await;
    assert!(users.is_empty());

    // And the store keeps working afterwards
    let created = User::insert(&store, create_request("owner@example.com"))
        .await
        .expect("insert");
    assert!(created.is_some());
}

#[tokio::test]
async fn test_users_save_of_load_is_noop() {
    let (_dir, store) = temp_store();

    User::insert(&store, create_request("a@example.com"))
        .await
        .expect("insert");
    User::insert(&store, create_request("b@example.com"))
        .await
        .expect("insert");

    let before = std::fs::read_to_string(store.document_path(USERS)).expect("read");

    let loaded: Vec<User> = store.load(USERS).await;
    store.save(USERS, &loaded).await.expect("save");

    let after = std::fs::read_to_string(store.document_path(USERS)).expect("read");
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_user_order_is_registration_order() {
    let (_dir, store) = temp_store();

    for email in ["first@example.com", "second@example.com", "third@example.com"] {
        User::insert(&store, create_request(email))
            .await
            .expect("insert")
            .expect("created");
    }

    let emails: Vec<String> = User::list(&store).await.into_iter().map(|u| u.email).collect();
    assert_eq!(
        emails,
        vec!["first@example.com", "second@example.com", "third@example.com"]
    );
}

#[tokio::test]
async fn test_pet_profile_survives_reload() {
    let (dir, store) = temp_store();

    User::insert(&store, create_request("owner@example.com"))
        .await
        .expect("insert");

    let mut pet = Pet::new("Rex", "Labrador");
    pet.description = "Very good boy".to_string();
    User::set_pet(&store, "owner@example.com", pet.clone())
        .await
        .expect("update")
        .expect("user exists");

    // Reopen the store over the same directory, as a fresh process would
    drop(store);
    let reopened = LocalStore::open(dir.path()).expect("reopen");
    let user = User::find_by_email(&reopened, "owner@example.com")
        .await
        .expect("user exists");
    assert_eq!(user.pet, Some(pet));
}

#[tokio::test]
async fn test_seekers_collection_is_independent_of_users() {
    let (_dir, store) = temp_store();

    SeekerPreference::new("seek@example.com", Some("Labr"), Some(3))
        .insert(&store)
        .await
        .expect("insert");

    assert!(User::list(&store).await.is_empty());
    let seekers: Vec<SeekerPreference> = store.load(SEEKERS).await;
    assert_eq!(seekers.len(), 1);
    assert_eq!(seekers[0].breed.as_deref(), Some("labr"));
}
