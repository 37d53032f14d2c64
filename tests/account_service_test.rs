mod common;

use caturro_rewards::entities::account_entity as accounts;
use caturro_rewards::models::LoginRequest;
use caturro_rewards::AppError;
use sea_orm::EntityTrait;

#[tokio::test]
async fn test_register_and_login() {
    let db = common::setup_test_db().await;
    let service = common::account_service(&db);

    let mut request = common::register_request(" 4001 ");
    request.full_name = " Ana Torres ".to_string();
    let created = service.register(request).await.unwrap();

    assert_eq!(created.national_id, "4001");
    assert_eq!(created.full_name, "Ana Torres");
    assert_eq!(created.points, 0);
    assert!(created.last_draw_at.is_none());

    let logged_in = service
        .login(LoginRequest {
            national_id: "4001".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(logged_in.id, created.id);
}

#[tokio::test]
async fn test_password_is_stored_hashed() {
    let db = common::setup_test_db().await;
    let created = common::create_account(&db, "4002").await;

    let stored = accounts::Entity::find_by_id(created.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_hash, "secret123");
    assert!(stored.password_hash.starts_with("$2"));
}

#[tokio::test]
async fn test_duplicate_national_id_conflicts() {
    let db = common::setup_test_db().await;
    let service = common::account_service(&db);

    service.register(common::register_request("4003")).await.unwrap();
    let result = service.register(common::register_request("4003")).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let db = common::setup_test_db().await;
    let service = common::account_service(&db);
    common::create_account(&db, "4004").await;

    let wrong_password = service
        .login(LoginRequest {
            national_id: "4004".to_string(),
            password: "not-it".to_string(),
        })
        .await;
    assert!(matches!(wrong_password, Err(AppError::AuthError(_))));

    let unknown = service
        .login(LoginRequest {
            national_id: "missing".to_string(),
            password: "secret123".to_string(),
        })
        .await;
    assert!(matches!(unknown, Err(AppError::AuthError(_))));
}

#[tokio::test]
async fn test_register_validates_input() {
    let db = common::setup_test_db().await;
    let service = common::account_service(&db);

    let mut short_password = common::register_request("4005");
    short_password.password = "123".to_string();
    assert!(matches!(
        service.register(short_password).await,
        Err(AppError::ValidationError(_))
    ));

    let mut blank_name = common::register_request("4006");
    blank_name.full_name = "   ".to_string();
    assert!(matches!(
        service.register(blank_name).await,
        Err(AppError::ValidationError(_))
    ));

    assert!(service.list_accounts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_accounts_newest_first() {
    let db = common::setup_test_db().await;
    let service = common::account_service(&db);
    let first = common::create_account(&db, "4007").await;
    let second = common::create_account(&db, "4008").await;

    let ids: Vec<i64> = service
        .list_accounts()
        .await
        .unwrap()
        .iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);

    assert!(matches!(
        service.get_account(9999).await,
        Err(AppError::NotFound(_))
    ));
}
