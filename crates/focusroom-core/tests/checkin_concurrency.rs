//! Integration tests for concurrent check-in creation.
//!
//! Each worker opens its own connection to the same database file, the way two
//! app instances would, and races for the last check-in of the day.

use std::sync::{Arc, Barrier};
use std::thread;

use focusroom_core::checkin::{can_check_in, create_checkin};
use focusroom_core::{AsyncTracker, CoreError, Database, Tracker, UserId};
use focusroom_core::storage::PresetsConfig;

fn seed_two_checkins(path: &std::path::Path, user: &UserId) {
    let db = Database::open_path(path).unwrap();
    create_checkin(&db, user).unwrap();
    create_checkin(&db, user).unwrap();
    let allowance = can_check_in(&db, user).unwrap();
    assert_eq!((allowance.used, allowance.limit), (2, 3));
}

#[test]
fn test_last_slot_is_taken_once_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("focusroom.db");
    let user = UserId::new("racer");
    seed_two_checkins(&path, &user);

    let barrier = Arc::new(Barrier::new(2));
    let workers: Vec<_> = (0..2)
        .map(|_| {
            let db = Database::open_path(&path).unwrap();
            let barrier = barrier.clone();
            let user = user.clone();
            thread::spawn(move || {
                barrier.wait();
                create_checkin(&db, &user)
            })
        })
        .collect();

    let results: Vec<_> = workers.into_iter().map(|w| w.join().unwrap()).collect();
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "results: {results:?}");
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(
            matches!(err, CoreError::LimitExceeded { .. } | CoreError::Busy),
            "unexpected error: {err:?}"
        );
    }

    let db = Database::open_path(&path).unwrap();
    assert_eq!(can_check_in(&db, &user).unwrap().used, 3);
}

#[test]
fn test_many_callers_never_exceed_quota() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("focusroom.db");
    let user = UserId::new("crowd");
    Database::open_path(&path).unwrap();

    let barrier = Arc::new(Barrier::new(8));
    let workers: Vec<_> = (0..8)
        .map(|_| {
            let db = Database::open_path(&path).unwrap();
            let barrier = barrier.clone();
            let user = user.clone();
            thread::spawn(move || {
                barrier.wait();
                create_checkin(&db, &user)
            })
        })
        .collect();

    let successes = workers
        .into_iter()
        .map(|w| w.join().unwrap())
        .filter(|r| r.is_ok())
        .count();
    assert!((1..=3).contains(&successes), "successes: {successes}");

    let db = Database::open_path(&path).unwrap();
    let allowance = can_check_in(&db, &user).unwrap();
    assert_eq!(allowance.used as usize, successes);
    assert!(allowance.used <= allowance.limit);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_double_click() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("focusroom.db");
    let user = UserId::new("clicker");
    seed_two_checkins(&path, &user);

    let tab = |path: &std::path::Path| {
        let db = Arc::new(Database::open_path(path).unwrap());
        AsyncTracker::new(Tracker::new(db, PresetsConfig::default(), Some(user.clone())))
    };
    let first = tab(&path);
    let second = tab(&path);

    let (a, b) = tokio::join!(first.create_checkin(), second.create_checkin());
    assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
    assert_eq!(first.can_check_in().await.unwrap().used, 3);
}
