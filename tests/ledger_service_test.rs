mod common;

use caturro_rewards::entities::{account_entity as accounts, ledger_entry_entity as entries};
use caturro_rewards::models::{PageWindow, PointsAdjustRequest, PointsHistoryQuery};
use caturro_rewards::services::{LedgerService, Movement};
use caturro_rewards::AppError;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

#[tokio::test]
async fn test_new_account_has_zero_balance() {
    let db = common::setup_test_db().await;
    let account = common::create_account(&db, "1001").await;
    let ledger = LedgerService::new(db.clone());

    assert_eq!(ledger.balance(account.id).await.unwrap(), 0);
    assert!(
        ledger
            .history(account.id, PageWindow::first(None, 50))
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_credit_then_overdraw_is_rejected() {
    let db = common::setup_test_db().await;
    let account = common::create_account(&db, "1002").await;
    let ledger = LedgerService::new(db.clone());

    ledger.credit(account.id, 100, "Coffee purchase").await.unwrap();

    let result = ledger.debit(account.id, 150, "Muffin").await;
    match result {
        Err(AppError::InsufficientBalance { balance, requested }) => {
            assert_eq!(balance, 100);
            assert_eq!(requested, 150);
        }
        other => panic!("expected InsufficientBalance, got {other:?}"),
    }
    assert_eq!(ledger.balance(account.id).await.unwrap(), 100);

    let entry = ledger.debit(account.id, 100, "Muffin").await.unwrap();
    assert_eq!(entry.delta, -100);
    assert_eq!(entry.balance_after, 0);
    assert_eq!(ledger.balance(account.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_running_balance_matches_ledger_sum() {
    let db = common::setup_test_db().await;
    let account = common::create_account(&db, "1003").await;
    let ledger = LedgerService::new(db.clone());

    ledger.credit(account.id, 40, "a").await.unwrap();
    ledger.credit(account.id, 25, "b").await.unwrap();
    ledger.debit(account.id, 30, "c").await.unwrap();
    assert!(ledger.debit(account.id, 100, "d").await.is_err());
    ledger.credit(account.id, 5, "e").await.unwrap();

    let list = entries::Entity::find()
        .filter(entries::Column::AccountId.eq(account.id))
        .order_by_asc(entries::Column::Id)
        .all(&db)
        .await
        .unwrap();
    assert_eq!(list.len(), 4);

    // 每条流水的 balance_after 等于截至该条的 delta 之和，且从不为负
    let mut running = 0;
    for entry in &list {
        running += entry.delta;
        assert_eq!(entry.balance_after, running);
        assert!(entry.balance_after >= 0);
    }
    assert_eq!(running, 40);
    assert_eq!(ledger.balance(account.id).await.unwrap(), running);

    let cached = accounts::Entity::find_by_id(account.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cached.points_balance, running);
}

#[tokio::test]
async fn test_non_positive_amounts_are_rejected() {
    let db = common::setup_test_db().await;
    let account = common::create_account(&db, "1004").await;
    let ledger = LedgerService::new(db.clone());

    for amount in [0, -5] {
        assert!(matches!(
            ledger.credit(account.id, amount, "").await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            ledger.debit(account.id, amount, "").await,
            Err(AppError::ValidationError(_))
        ));
    }
    assert_eq!(ledger.balance(account.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_account_is_not_found() {
    let db = common::setup_test_db().await;
    let ledger = LedgerService::new(db.clone());

    assert!(matches!(ledger.balance(999).await, Err(AppError::NotFound(_))));
    assert!(matches!(
        ledger.credit(999, 10, "").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        ledger.debit(999, 10, "").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_adjust_by_national_id() {
    let db = common::setup_test_db().await;
    let account = common::create_account(&db, "1005").await;
    let ledger = LedgerService::new(db.clone());

    let credited = ledger
        .adjust(
            Movement::Credit,
            &PointsAdjustRequest {
                account_ref: " 1005 ".to_string(),
                amount: 70,
                description: Some("Loyalty stamp".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(credited.account_id, account.id);
    assert_eq!(credited.balance, 70);
    assert_eq!(credited.entry.description, "Loyalty stamp");

    let debited = ledger
        .adjust(
            Movement::Debit,
            &PointsAdjustRequest {
                account_ref: "1005".to_string(),
                amount: 20,
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(debited.balance, 50);
    assert_eq!(debited.entry.delta, -20);

    let missing = ledger
        .adjust(
            Movement::Credit,
            &PointsAdjustRequest {
                account_ref: "nobody".to_string(),
                amount: 1,
                description: None,
            },
        )
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_points_overview_lists_newest_first() {
    let db = common::setup_test_db().await;
    let account = common::create_account(&db, "1006").await;
    let ledger = LedgerService::new(db.clone());

    for amount in 1..=5 {
        ledger.credit(account.id, amount, "").await.unwrap();
    }

    let overview = ledger
        .points_overview(
            account.id,
            &PointsHistoryQuery {
                limit: Some(2),
                offset: Some(1),
            },
        )
        .await
        .unwrap();

    assert_eq!(overview.national_id, "1006");
    assert_eq!(overview.balance, 15);
    let deltas: Vec<i64> = overview.history.iter().map(|e| e.delta).collect();
    assert_eq!(deltas, vec![4, 3]);
}

#[tokio::test]
async fn test_history_offset_beyond_bigint_is_clamped() {
    let db = common::setup_test_db().await;
    let account = common::create_account(&db, "1007").await;
    let ledger = LedgerService::new(db.clone());
    ledger.credit(account.id, 10, "").await.unwrap();

    let overview = ledger
        .points_overview(
            account.id,
            &PointsHistoryQuery {
                limit: None,
                offset: Some(u64::MAX),
            },
        )
        .await
        .unwrap();
    assert_eq!(overview.balance, 10);
    assert!(overview.history.is_empty());
}

#[tokio::test]
async fn test_credit_overflow_is_a_validation_error() {
    let db = common::setup_test_db().await;
    let account = common::create_account(&db, "1008").await;
    let ledger = LedgerService::new(db.clone());

    let entry = ledger.credit(account.id, i64::MAX, "jackpot").await.unwrap();
    assert_eq!(entry.balance_after, i64::MAX);

    let result = ledger.credit(account.id, 1, "one more").await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));

    assert_eq!(ledger.balance(account.id).await.unwrap(), i64::MAX);
    let cached = accounts::Entity::find_by_id(account.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cached.points_balance, i64::MAX);
}

#[tokio::test]
async fn test_concurrent_debits_never_overdraw() {
    let db = common::setup_test_db().await;
    let account = common::create_account(&db, "1009").await;
    let ledger = LedgerService::new(db.clone());
    ledger.credit(account.id, 100, "").await.unwrap();

    let (first, second) = tokio::join!(
        ledger.debit(account.id, 60, "espresso"),
        ledger.debit(account.id, 60, "espresso")
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|r| matches!(r, Err(AppError::InsufficientBalance { balance: 40, requested: 60 })))
            .count(),
        1
    );
    assert_eq!(ledger.balance(account.id).await.unwrap(), 40);
}
