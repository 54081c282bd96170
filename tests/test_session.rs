//! Tests for the shared session store

use lantern::app::User;
use lantern::session::{SessionError, SessionStore};
use std::collections::HashSet;

fn gugu() -> User {
    User::new("gugu", "password", "hkkang@woowahan.com")
}

#[test]
fn test_create_issues_unique_tokens() {
    let store = SessionStore::new();
    let tokens: HashSet<String> = (0..100).map(|_| store.create()).collect();

    assert_eq!(tokens.len(), 100);
    assert_eq!(store.len(), 100);
    assert!(tokens.iter().all(|t| !t.is_empty() && store.contains(t)));
}

#[test]
fn test_attribute_round_trip() {
    let store = SessionStore::new();
    let token = store.create();

    store.set_attribute(&token, "user", gugu()).unwrap();
    let user = store.attribute::<User>(&token, "user").unwrap();

    assert_eq!(user.account, "gugu");
}

#[test]
fn test_unknown_token() {
    let store = SessionStore::new();

    assert_eq!(
        store.attribute::<User>("no-such-token", "user").unwrap_err(),
        SessionError::UnknownSession
    );
    assert_eq!(
        store.set_attribute("no-such-token", "user", gugu()).unwrap_err(),
        SessionError::UnknownSession
    );
}

#[test]
fn test_missing_attribute() {
    let store = SessionStore::new();
    let token = store.create();

    assert_eq!(
        store.attribute::<User>(&token, "user").unwrap_err(),
        SessionError::MissingAttribute("user".to_string())
    );
}

#[test]
fn test_wrong_attribute_type_counts_as_missing() {
    let store = SessionStore::new();
    let token = store.create();
    store.set_attribute(&token, "user", "not a user".to_string()).unwrap();

    assert!(matches!(
        store.attribute::<User>(&token, "user"),
        Err(SessionError::MissingAttribute(_))
    ));
    assert_eq!(*store.attribute::<String>(&token, "user").unwrap(), "not a user");
}

#[test]
fn test_remove_attribute() {
    let store = SessionStore::new();
    let token = store.create();
    store.set_attribute(&token, "user", gugu()).unwrap();

    assert!(store.remove_attribute(&token, "user").unwrap());
    assert!(!store.remove_attribute(&token, "user").unwrap());
    assert!(store.contains(&token));
}

#[test]
fn test_clones_share_sessions() {
    let store = SessionStore::new();
    let other = store.clone();
    let token = store.create();
    store.set_attribute(&token, "user", gugu()).unwrap();

    assert!(other.contains(&token));
    assert_eq!(other.attribute::<User>(&token, "user").unwrap().email, "hkkang@woowahan.com");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sessions_stay_independent() {
    let store = SessionStore::new();

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                let token = store.create();
                let account = format!("user-{}", i);
                store
                    .set_attribute(&token, "user", User::new(account.clone(), "pw", "x@y.z"))
                    .unwrap();
                (token, account)
            })
        })
        .collect();

    for task in tasks {
        let (token, account) = task.await.unwrap();
        assert_eq!(store.attribute::<User>(&token, "user").unwrap().account, account);
    }
    assert_eq!(store.len(), 32);
}
