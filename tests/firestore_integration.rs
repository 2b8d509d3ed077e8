// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (FIRESTORE_EMULATOR_HOST set). Each test uses unique document IDs
//! for isolation.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use city_companion::models::{
    Expense, ExpenseCategory, Route, User, UserPreferences,
};
use tower::ServiceExt;

mod common;
use common::test_db;

fn test_user(id: &str) -> User {
    let now = chrono::Utc::now().to_rfc3339();
    User {
        id: id.to_string(),
        name: "Test User".to_string(),
        email: format!("{}@example.com", id),
        password_hash: "$argon2id$test".to_string(),
        street_cred: 0,
        visited_places: Vec::new(),
        preferences: UserPreferences::default(),
        created_at: now.clone(),
        updated_at: now,
    }
}

#[tokio::test]
async fn test_user_upsert_and_get() {
    require_emulator!();

    let db = test_db().await;
    let id = uuid::Uuid::new_v4().to_string();

    assert!(db.get_user(&id).await.unwrap().is_none());

    let user = test_user(&id);
    db.upsert_user(&user).await.unwrap();

    let fetched = db.get_user(&id).await.unwrap().expect("user should exist");
    assert_eq!(fetched.email, user.email);
    assert_eq!(fetched.street_cred, 0);
}

#[tokio::test]
async fn test_find_user_by_email() {
    require_emulator!();

    let db = test_db().await;
    let id = uuid::Uuid::new_v4().to_string();
    let user = test_user(&id);
    db.upsert_user(&user).await.unwrap();

    let found = db
        .find_user_by_email(&user.email)
        .await
        .unwrap()
        .expect("user should be found by email");
    assert_eq!(found.id, id);

    let missing = db
        .find_user_by_email("nobody@example.com")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_visit_place_awards_points_once() {
    require_emulator!();

    let db = test_db().await;
    let id = uuid::Uuid::new_v4().to_string();
    db.upsert_user(&test_user(&id)).await.unwrap();

    let now = chrono::Utc::now().to_rfc3339();
    let after_first = db.visit_place_atomic(&id, "3", &now).await.unwrap();
    assert_eq!(after_first.street_cred, 10);
    assert_eq!(after_first.visited_places, vec!["3".to_string()]);

    // Second visit to the same place is an idempotent no-op
    let after_second = db.visit_place_atomic(&id, "3", &now).await.unwrap();
    assert_eq!(after_second.street_cred, 10);
    assert_eq!(after_second.visited_places.len(), 1);

    // A different place awards again
    let after_third = db.visit_place_atomic(&id, "7", &now).await.unwrap();
    assert_eq!(after_third.street_cred, 20);
}

#[tokio::test]
async fn test_recompute_street_cred() {
    require_emulator!();

    let db = test_db().await;
    let id = uuid::Uuid::new_v4().to_string();
    db.upsert_user(&test_user(&id)).await.unwrap();

    let now = chrono::Utc::now().to_rfc3339();
    db.visit_place_atomic(&id, "1", &now).await.unwrap();
    db.visit_place_atomic(&id, "2", &now).await.unwrap();

    // 2 visits and 3 routes: 2*10 + 3*25
    let user = db.recompute_street_cred_atomic(&id, 3, &now).await.unwrap();
    assert_eq!(user.street_cred, 95);
}

#[tokio::test]
async fn test_create_route_with_missing_place_persists_nothing() {
    require_emulator!();

    let db = test_db().await;
    let user_id = uuid::Uuid::new_v4().to_string();
    db.upsert_user(&test_user(&user_id)).await.unwrap();

    // Give the user some existing Street Cred to detect drift
    let now = chrono::Utc::now().to_rfc3339();
    db.visit_place_atomic(&user_id, "1", &now).await.unwrap();

    let (app, state) = common::create_app_with_db(db.clone());
    let token = common::create_test_jwt(&user_id, &state.config.jwt_signing_key);

    // Neither place exists in the (unseeded) catalog
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/routes")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(
                    serde_json::json!({
                        "name": "Ghost tour",
                        "place_ids": [904871, 904872]
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The failed creation must leave no route behind and no point drift
    assert_eq!(db.count_routes_for_user(&user_id).await.unwrap(), 0);
    let user = db.get_user(&user_id).await.unwrap().unwrap();
    assert_eq!(user.street_cred, 10);
}

#[tokio::test]
async fn test_route_crud() {
    require_emulator!();

    let db = test_db().await;
    let user_id = uuid::Uuid::new_v4().to_string();

    let route = Route {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user_id.clone(),
        name: "Morning loop".to_string(),
        place_ids: vec![1, 2, 3],
        total_walking_time: 45,
        total_driving_time: 20,
        narrative: "A pleasant loop.".to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    db.insert_route(&route).await.unwrap();

    let fetched = db
        .get_route(&route.id)
        .await
        .unwrap()
        .expect("route should exist");
    assert_eq!(fetched.place_ids, vec![1, 2, 3]);

    let listed = db.list_routes_for_user(&user_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(db.count_routes_for_user(&user_id).await.unwrap(), 1);

    db.delete_route(&route.id).await.unwrap();
    assert!(db.get_route(&route.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_expense_crud() {
    require_emulator!();

    let db = test_db().await;
    let user_id = uuid::Uuid::new_v4().to_string();

    let expense = Expense {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user_id.clone(),
        amount: 12.5,
        category: ExpenseCategory::Food,
        description: "lunch".to_string(),
        place_id: None,
        place_name: None,
        notes: None,
        date: chrono::Utc::now().to_rfc3339(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    db.insert_expense(&expense).await.unwrap();

    let listed = db.list_expenses_for_user(&user_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].amount, 12.5);

    db.delete_expense(&expense.id).await.unwrap();
    assert!(db.get_expense(&expense.id).await.unwrap().is_none());
}
