// SPDX-License-Identifier: MPL-2.0

//! Entity store and access layer behavior.

use confab::store::{
    CallRow, CallStore, ChatDb, MessageRow, MessageStore, OnConflict, StoreError, UserRow,
    UserStore,
};

fn mem_db() -> ChatDb {
    ChatDb::open_in_memory().expect("open in-memory db")
}

fn user(id: i64, name: &str) -> UserRow {
    UserRow {
        id,
        name: name.to_string(),
    }
}

fn message(user_id: i64, sender_id: &str, content: &str, timestamp: i64) -> MessageRow {
    MessageRow {
        id: None,
        user_id,
        sender_id: sender_id.to_string(),
        content: content.to_string(),
        file_uri: None,
        timestamp,
        is_sent: false,
    }
}

#[test]
fn query_all_returns_exactly_the_inserted_users() {
    let db = mem_db();
    let users = UserStore::new(&db);
    users.insert(&user(1, "Alice"), OnConflict::Fail).unwrap();
    users.insert(&user(2, "Bob"), OnConflict::Fail).unwrap();

    let mut all = users.all().unwrap();
    all.sort_by_key(|u| u.id);
    assert_eq!(all, vec![user(1, "Alice"), user(2, "Bob")]);
}

#[test]
fn by_id_distinguishes_present_from_missing() {
    let db = mem_db();
    let users = UserStore::new(&db);
    users.insert(&user(1, "Alice"), OnConflict::Fail).unwrap();

    assert_eq!(users.by_id(1).unwrap(), Some(user(1, "Alice")));
    assert_eq!(users.by_id(42).unwrap(), None);
}

#[test]
fn duplicate_user_id_fails_under_fail_policy() {
    let db = mem_db();
    let users = UserStore::new(&db);
    users.insert(&user(1, "Alice"), OnConflict::Fail).unwrap();

    let err = users.insert(&user(1, "Mallory"), OnConflict::Fail).unwrap_err();
    assert!(matches!(err, StoreError::Conflict("users")));

    // the original row is untouched
    assert_eq!(users.by_id(1).unwrap(), Some(user(1, "Alice")));
}

#[test]
fn duplicate_user_id_is_ignored_under_ignore_policy() {
    let db = mem_db();
    let users = UserStore::new(&db);
    users.insert(&user(1, "Alice"), OnConflict::Ignore).unwrap();
    users.insert(&user(1, "Mallory"), OnConflict::Ignore).unwrap();

    let all = users.all().unwrap();
    assert_eq!(all, vec![user(1, "Alice")]);
}

#[test]
fn messages_for_user_includes_inserted_message() {
    let db = mem_db();
    let messages = MessageStore::new(&db);
    messages
        .insert(&message(1, "1", "hello", 1000), OnConflict::Fail)
        .unwrap();
    messages
        .insert(&message(2, "2", "other thread", 2000), OnConflict::Fail)
        .unwrap();

    let thread = messages.for_user(1).unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].content, "hello");
}

#[test]
fn message_insert_tolerates_missing_user() {
    // No user 5 exists; the store does not enforce referential integrity.
    let db = mem_db();
    let messages = MessageStore::new(&db);
    messages
        .insert(&message(5, "5", "hi", 1000), OnConflict::Fail)
        .unwrap();

    let thread = messages.for_user(5).unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].content, "hi");
    assert_eq!(UserStore::new(&db).by_id(5).unwrap(), None);
}

#[test]
fn message_ids_are_assigned_by_the_store() {
    let db = mem_db();
    let messages = MessageStore::new(&db);
    messages
        .insert(&message(1, "1", "first", 1000), OnConflict::Fail)
        .unwrap();
    messages
        .insert(&message(1, "2", "second", 2000), OnConflict::Fail)
        .unwrap();

    let thread = messages.for_user(1).unwrap();
    let ids: Vec<_> = thread.iter().map(|m| m.id.expect("assigned id")).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn explicit_duplicate_message_id_fails() {
    let db = mem_db();
    let messages = MessageStore::new(&db);
    let mut row = message(1, "1", "first", 1000);
    row.id = Some(7);
    messages.insert(&row, OnConflict::Fail).unwrap();

    let err = messages.insert(&row, OnConflict::Fail).unwrap_err();
    assert!(matches!(err, StoreError::Conflict("messages")));
}

#[test]
fn call_log_keeps_insertion_independent_rows() {
    let db = mem_db();
    let calls = CallStore::new(&db);
    let first = CallRow {
        id: 1,
        user_id: 1,
        timestamp: 5000,
        is_outgoing: true,
        is_video: false,
    };
    let second = CallRow {
        id: 2,
        user_id: 2,
        timestamp: 1000,
        is_outgoing: false,
        is_video: true,
    };
    calls.insert(&first, OnConflict::Fail).unwrap();
    calls.insert(&second, OnConflict::Fail).unwrap();

    let all = calls.all().unwrap();
    assert_eq!(all, vec![first, second]);
}

#[tokio::test]
async fn live_query_delivers_writes_without_requery() {
    let db = mem_db();
    let users = UserStore::new(&db);
    let mut live = users.watch_all();

    // first emission is the current (empty) result set
    let initial = live.next().await.unwrap().unwrap();
    assert!(initial.is_empty());

    users.insert(&user(7, "Grace"), OnConflict::Fail).unwrap();
    let updated = live.next().await.unwrap().unwrap();
    assert_eq!(updated, vec![user(7, "Grace")]);
}

#[tokio::test]
async fn live_query_coalesces_to_the_latest_snapshot() {
    let db = mem_db();
    let users = UserStore::new(&db);
    let mut live = users.watch_all();
    live.next().await.unwrap().unwrap();

    // several writes between polls collapse into one fresh snapshot
    users.insert(&user(1, "Alice"), OnConflict::Fail).unwrap();
    users.insert(&user(2, "Bob"), OnConflict::Fail).unwrap();
    let snapshot = live.next().await.unwrap().unwrap();
    assert_eq!(snapshot.len(), 2);
}

#[test]
fn live_query_get_reflects_writes_immediately() {
    let db = mem_db();
    let users = UserStore::new(&db);
    let live = users.watch_all();

    users.insert(&user(1, "Alice"), OnConflict::Fail).unwrap();
    assert_eq!(live.get().unwrap(), vec![user(1, "Alice")]);
}

#[test]
fn store_is_durable_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.db");

    {
        let db = ChatDb::open(&path).unwrap();
        UserStore::new(&db)
            .insert(&user(1, "Alice"), OnConflict::Fail)
            .unwrap();
        MessageStore::new(&db)
            .insert(&message(1, "1", "persisted", 1000), OnConflict::Fail)
            .unwrap();
    }

    let db = ChatDb::open(&path).unwrap();
    assert_eq!(UserStore::new(&db).all().unwrap(), vec![user(1, "Alice")]);
    let thread = MessageStore::new(&db).for_user(1).unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].content, "persisted");
}

#[test]
fn reopening_an_existing_store_is_not_a_migration_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.db");
    ChatDb::open(&path).unwrap();
    // schema DDL is idempotent; version stays at 1
    ChatDb::open(&path).unwrap();
}
