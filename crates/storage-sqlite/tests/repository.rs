//! Repository tests against a real SQLite database.

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;
use wagerbook_core::bets::{BetRepositoryTrait, NewBet, Outcome};
use wagerbook_core::errors::{DatabaseError, Error};
use wagerbook_core::users::{User, UserRepositoryTrait};
use wagerbook_storage_sqlite::bets::BetRepository;
use wagerbook_storage_sqlite::users::UserRepository;
use wagerbook_storage_sqlite::{create_pool, db, init, run_migrations};

struct TestDb {
    bet_repository: BetRepository,
    user_repository: UserRepository,
    _tmp: TempDir,
}

async fn setup() -> TestDb {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = init(tmp.path().join("test.db").to_str().unwrap()).unwrap();
    let pool = create_pool(&db_path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = db::spawn_writer((*pool).clone());

    TestDb {
        bet_repository: BetRepository::new(pool.clone(), writer.clone()),
        user_repository: UserRepository::new(pool, writer),
        _tmp: tmp,
    }
}

fn user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        username: name.to_string(),
        password_hash: "$argon2id$test".to_string(),
        created_at: chrono::Utc::now().naive_utc(),
    }
}

fn new_bet(date: (i32, u32, u32), invested: &str, paid: &str) -> NewBet {
    NewBet {
        bet_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        sport: Some("NFL".to_string()),
        amount_invested: Decimal::from_str(invested).unwrap(),
        num_picks: 2,
        outcome: Outcome::Win,
        amount_paid: Decimal::from_str(paid).unwrap(),
    }
}

#[tokio::test]
async fn bet_round_trip_preserves_decimals() {
    let db = setup().await;
    db.user_repository
        .create_user(user("u1", "alice"))
        .await
        .unwrap();

    let created = db
        .bet_repository
        .create_bet("u1", new_bet((2024, 1, 5), "10.55", "25.10"))
        .await
        .unwrap();

    assert_eq!(created.profit, Decimal::from_str("14.55").unwrap());

    let listed = db.bet_repository.list_by_owner("u1").unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
    assert_eq!(listed[0].amount_invested, Decimal::from_str("10.55").unwrap());

    let fetched = db.bet_repository.get_bet(&created.id).unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_orders_by_bet_date() {
    let db = setup().await;
    db.user_repository
        .create_user(user("u1", "alice"))
        .await
        .unwrap();

    db.bet_repository
        .create_bet("u1", new_bet((2024, 3, 1), "1", "2"))
        .await
        .unwrap();
    db.bet_repository
        .create_bet("u1", new_bet((2024, 1, 1), "1", "2"))
        .await
        .unwrap();

    let listed = db.bet_repository.list_by_owner("u1").unwrap();
    assert_eq!(
        listed[0].bet_date,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    );
}

#[tokio::test]
async fn delete_is_scoped_and_reports_row_count() {
    let db = setup().await;
    db.user_repository
        .create_user(user("u1", "alice"))
        .await
        .unwrap();
    db.user_repository
        .create_user(user("u2", "bob"))
        .await
        .unwrap();

    let bet = db
        .bet_repository
        .create_bet("u1", new_bet((2024, 1, 5), "10", "25"))
        .await
        .unwrap();

    // Wrong owner deletes nothing
    assert_eq!(db.bet_repository.delete_bet("u2", &bet.id).await.unwrap(), 0);
    // Right owner deletes the row, a second attempt is a no-op
    assert_eq!(db.bet_repository.delete_bet("u1", &bet.id).await.unwrap(), 1);
    assert_eq!(db.bet_repository.delete_bet("u1", &bet.id).await.unwrap(), 0);
}

#[tokio::test]
async fn replace_all_only_touches_the_owner() {
    let db = setup().await;
    db.user_repository
        .create_user(user("u1", "alice"))
        .await
        .unwrap();
    db.user_repository
        .create_user(user("u2", "bob"))
        .await
        .unwrap();

    db.bet_repository
        .create_bet("u1", new_bet((2020, 1, 1), "1", "2"))
        .await
        .unwrap();
    db.bet_repository
        .create_bet("u2", new_bet((2020, 1, 1), "3", "4"))
        .await
        .unwrap();

    let replaced = db
        .bet_repository
        .replace_all(
            "u1",
            vec![
                new_bet((2024, 1, 5), "10", "25"),
                new_bet((2024, 2, 1), "5", "5"),
            ],
        )
        .await
        .unwrap();
    assert_eq!(replaced.len(), 2);

    assert_eq!(db.bet_repository.list_by_owner("u1").unwrap().len(), 2);
    // The other owner's collection is untouched
    assert_eq!(db.bet_repository.list_by_owner("u2").unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_username_is_a_unique_violation() {
    let db = setup().await;

    db.user_repository
        .create_user(user("u1", "alice"))
        .await
        .unwrap();
    let err = db
        .user_repository
        .create_user(user("u2", "alice"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Database(DatabaseError::UniqueViolation(_))
    ));

    let found = db.user_repository.find_by_username("alice").unwrap();
    assert_eq!(found.unwrap().id, "u1");
    assert!(db.user_repository.find_by_username("bob").unwrap().is_none());
}
