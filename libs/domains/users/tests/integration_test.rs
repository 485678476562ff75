//! Integration tests for the users domain
//!
//! These run against real PostgreSQL via testcontainers to check:
//! - The unique login constraint backs up the service checks
//! - LIKE filtering is literal and case-sensitive
//! - Seeded ids keep the id sequence ahead of them
//! - Oversized page windows and id lists stay within Postgres limits
//!
//! Run with `cargo test -p domain_users -- --ignored` (needs Docker).

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase};

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_and_find() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_find");

    let login = builder.login("alice");
    let created = repo
        .create(NewUser::new(login.clone(), builder.digest("alice")))
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.login, login);

    let by_login = repo.find_by_login(&login).await.unwrap().unwrap();
    assert_eq!(by_login.id, created.id);
    assert_eq!(by_login.credential_digest, builder.digest("alice"));

    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.login, login);

    assert!(repo.find_by_login(&login.to_uppercase()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_unique_login_constraint() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());

    repo.create(NewUser::new("alice", "d1")).await.unwrap();
    let bob = repo.create(NewUser::new("bob", "d2")).await.unwrap();

    let duplicate = repo.create(NewUser::new("alice", "d3")).await;
    assert!(matches!(duplicate, Err(UserError::LoginTaken(_))));

    let rename = repo
        .update_fields(
            bob.id,
            UserChanges {
                login: Some("alice".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(rename, Err(UserError::LoginTaken(_))));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_fields_and_delete() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());

    let user = repo.create(NewUser::new("carol", "d1")).await.unwrap();

    let changed = repo
        .update_fields(
            user.id,
            UserChanges {
                login: Some("caroline".to_string()),
                credential_digest: Some("d2".to_string()),
            },
        )
        .await
        .unwrap();
    assert!(changed);

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.login, "caroline");
    assert_eq!(stored.credential_digest, "d2");
    assert_eq!(stored.created_at, user.created_at);

    assert!(!repo.update_fields(user.id + 1000, UserChanges::default()).await.unwrap());

    repo.delete(user.id).await.unwrap();
    repo.delete(user.id).await.unwrap();
    assert!(repo.find_by_id(user.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_ids_beyond_store_range_are_absent() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());

    let huge = u64::MAX;
    assert!(repo.find_by_id(huge).await.unwrap().is_none());
    assert!(repo.find_by_ids(vec![huge]).await.unwrap().is_empty());
    assert!(!repo.update_fields(huge, UserChanges::default()).await.unwrap());
    repo.delete(huge).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_filter_is_literal_and_ordered() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());

    for login in ["zed", "100%_sure", "1000_sure", "alice", "Alice", "malice"] {
        repo.create(NewUser::new(login, "d")).await.unwrap();
    }

    let all = UserFilter::default();
    assert_eq!(repo.count_matching(&all).await.unwrap(), 6);

    let lice = UserFilter::from_raw("lice");
    assert_eq!(repo.count_matching(&lice).await.unwrap(), 3);

    // '%' and '_' match themselves only
    let percent = UserFilter::from_raw("0%_");
    let page = repo.list_page(&percent, 0, 10).await.unwrap();
    let logins: Vec<&str> = page.iter().map(|u| u.login.as_str()).collect();
    assert_eq!(logins, vec!["100%_sure"]);

    let page = repo.list_page(&lice, 1, 2).await.unwrap();
    assert_eq!(page.len(), 2);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_with_id_bumps_sequence() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());

    let admin = repo
        .create_with_id(50, NewUser::new("admin", "d"))
        .await
        .unwrap();
    assert_eq!(admin.id, 50);

    let next = repo.create(NewUser::new("bob", "d")).await.unwrap();
    assert!(next.id > 50);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_with_taken_id_is_not_a_login_conflict() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());

    repo.create_with_id(7, NewUser::new("admin", "d")).await.unwrap();

    let again = repo.create_with_id(7, NewUser::new("root", "d")).await;
    assert!(matches!(again, Err(UserError::Database(_))));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_unbounded_page_window() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());

    for login in ["carol", "alice", "bob"] {
        repo.create(NewUser::new(login, "d")).await.unwrap();
    }

    let all = UserFilter::default();
    let page = repo.list_page(&all, 0, u64::MAX).await.unwrap();
    let logins: Vec<&str> = page.iter().map(|u| u.login.as_str()).collect();
    assert_eq!(logins, vec!["alice", "bob", "carol"]);

    assert!(repo.list_page(&all, u64::MAX, u64::MAX).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_find_by_ids_beyond_parameter_cap() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());

    let alice = repo.create(NewUser::new("alice", "d")).await.unwrap();
    let bob = repo.create(NewUser::new("bob", "d")).await.unwrap();

    let mut ids: Vec<u64> = (1_000_000..1_070_000).collect();
    ids.extend([bob.id, alice.id, alice.id]);

    let found = repo.find_by_ids(ids).await.unwrap();
    let found_ids: Vec<u64> = found.iter().map(|u| u.id).collect();
    assert_eq!(found_ids, vec![alice.id, bob.id]);
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore] // Requires Docker
async fn test_service_end_to_end() {
    let db = TestDatabase::new().await;
    let service = DirectoryService::new(PgUserRepository::new(db.connection()));
    let codec = Sha512Codec;

    let digest = codec.digest("secret");
    let registered = service.register("alice", &digest).await.unwrap();
    assert!(registered.success);

    assert_eq!(
        service.verify("alice", &digest).await.unwrap(),
        AuthOutcome::accepted(registered.id)
    );
    assert!(!service.register("alice", &digest).await.unwrap().success);

    let new_digest = codec.digest("better secret");
    assert!(
        service
            .change_password(registered.id, &digest, &new_digest)
            .await
            .unwrap()
    );
    assert!(
        service
            .change_login(registered.id, &new_digest, "alicia", "")
            .await
            .unwrap()
    );

    let users = service.get_users(&[registered.id]).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].login, "alicia");

    let page = service.list_users(0, 10, "lic").await.unwrap();
    assert_eq!(page.total, 1);

    assert!(service.delete_user(registered.id).await.unwrap());
    assert_eq!(service.list_users(0, 10, "").await.unwrap(), UserPage::default());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_concurrent_registrations_single_winner() {
    let db = TestDatabase::new().await;
    let service = DirectoryService::new(PgUserRepository::new(db.connection()));

    let attempts = (0..8).map(|i| {
        let service = service.clone();
        tokio::spawn(async move { service.register("racer", &format!("d{}", i)).await })
    });

    let mut winners = 0;
    for handle in attempts {
        if handle.await.unwrap().unwrap().success {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_seed_idempotent() {
    let db = TestDatabase::new().await;
    let service = DirectoryService::new(PgUserRepository::new(db.connection()));

    let first = service.seed(1, "admin", "d").await.unwrap();
    assert!(matches!(first, SeedOutcome::Created(_)));
    assert_eq!(
        service.seed(1, "admin", "d").await.unwrap(),
        SeedOutcome::AlreadyPresent
    );

    let next = service.register("bob", "d").await.unwrap();
    assert!(next.id > 1);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_long_digests_are_stored_verbatim() {
    let db = TestDatabase::new().await;
    let service = DirectoryService::new(PgUserRepository::new(db.connection()));

    let long = "a".repeat(300);
    let registered = service.register("bob", &long).await.unwrap();
    assert!(registered.success);
    assert_eq!(
        service.verify("bob", &long).await.unwrap(),
        AuthOutcome::accepted(registered.id)
    );

    let longer = "b".repeat(4096);
    assert!(
        service
            .change_password(registered.id, &long, &longer)
            .await
            .unwrap()
    );
    assert!(service.verify("bob", &longer).await.unwrap().success);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_list_users_to_end_of_range() {
    let db = TestDatabase::new().await;
    let service = DirectoryService::new(PgUserRepository::new(db.connection()));

    service.register("alice", "d").await.unwrap();
    service.register("bob", "d").await.unwrap();

    let page = service.list_users(0, u64::MAX, "").await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.list.len(), 2);
}
