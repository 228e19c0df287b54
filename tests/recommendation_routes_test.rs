// ABOUTME: HTTP integration tests for the recommendation and allergy routes
// ABOUTME: Drives the full router over an in-memory store and repository fakes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! HTTP integration tests for recommendation routes
//!
//! Covers status mapping (200, 206, 400, 404, 500), eligibility rules as seen
//! from the API, recording of returned recipes, and the history listing.

mod common;
mod helpers;

use common::{
    create_ingredients, create_test_database, create_test_recipe, create_test_resources,
    create_test_user, test_server_config, OMNIVORE, PLANT_BASED,
};
use helpers::axum_test::AxumTestRequest;
use helpers::fakes::{recipe, FakeHistory, FakeProfiles, FakeRecipes};
use pantry_chef_core::models::UserProfile;
use pantry_chef_server::{
    config::environment::ServerConfig,
    database::{repositories::RecommendationRepository, Database},
    resources::{ServerResources, ServerResourcesBuilder},
    server,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Pantry body with every ingredient expiring in `days`
fn pantry_body(user_id: i64, ingredient_ids: &[i64], days: i64) -> Value {
    let expiration = (chrono::Utc::now() + chrono::Duration::days(days)).to_rfc3339();
    json!({
        "userId": user_id,
        "ingredients": ingredient_ids
            .iter()
            .map(|id| json!({ "ingredientId": id, "expirationDate": expiration }))
            .collect::<Vec<_>>(),
    })
}

fn recipe_names(body: &Value) -> Vec<String> {
    body["recipes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_owned())
        .collect()
}

struct Catalog {
    database: Database,
    resources: Arc<ServerResources>,
    user_id: i64,
    egg: i64,
    milk: i64,
    flour: i64,
    peanut: i64,
}

/// Omnivore user at tier 1 with a small catalog
async fn setup_catalog() -> Catalog {
    let database = create_test_database().await.unwrap();
    let ids = create_ingredients(&database, &["egg", "milk", "flour", "peanut", "saffron"])
        .await
        .unwrap();
    let (egg, milk, flour, peanut, saffron) = (ids[0], ids[1], ids[2], ids[3], ids[4]);

    create_test_recipe(&database, "Scrambled Eggs", OMNIVORE, 0, &[egg, milk])
        .await
        .unwrap();
    create_test_recipe(&database, "Pancakes", OMNIVORE, 1, &[egg, milk, flour])
        .await
        .unwrap();
    create_test_recipe(&database, "Peanut Cookies", OMNIVORE, 0, &[flour, peanut, egg])
        .await
        .unwrap();
    create_test_recipe(&database, "Saffron Bread", OMNIVORE, 1, &[flour, saffron])
        .await
        .unwrap();

    let user_id = create_test_user(&database, "cook@example.com", OMNIVORE, 1)
        .await
        .unwrap();
    let resources = create_test_resources(database.clone(), test_server_config());

    Catalog {
        database,
        resources,
        user_id,
        egg,
        milk,
        flour,
        peanut,
    }
}

// ============================================================================
// POST /api/recommendations - Success
// ============================================================================

#[tokio::test]
async fn test_recommend_returns_ranked_recipes() {
    let catalog = setup_catalog().await;
    let body = pantry_body(catalog.user_id, &[catalog.egg, catalog.milk, catalog.flour], 1);

    let response = AxumTestRequest::post("/api/recommendations")
        .json(&body)
        .send(server::router(&catalog.resources))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    let recipes = body["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 3);

    let scores: Vec<f64> = recipes
        .iter()
        .map(|r| r["totalScore"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    assert!(scores.iter().all(|score| (0.0..=1.0).contains(score)));

    let first = &recipes[0];
    assert!(first["recipeId"].is_i64());
    assert!(first["ingredientsText"].is_string());
    assert!(first["minutes"].is_i64());
    assert!(first["calories"].is_number());
}

#[tokio::test]
async fn test_recommend_accepts_plain_dates() {
    let catalog = setup_catalog().await;
    let body = json!({
        "userId": catalog.user_id,
        "ingredients": [{ "ingredientId": catalog.egg, "expirationDate": "2099-01-01" }],
    });

    let response = AxumTestRequest::post("/api/recommendations")
        .json(&body)
        .send(server::router(&catalog.resources))
        .await;

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_recommend_excludes_allergens() {
    let catalog = setup_catalog().await;
    catalog
        .database
        .add_user_allergy(catalog.user_id, catalog.peanut)
        .await
        .unwrap();
    let body = pantry_body(catalog.user_id, &[catalog.egg, catalog.flour], 2);

    let response = AxumTestRequest::post("/api/recommendations")
        .json(&body)
        .send(server::router(&catalog.resources))
        .await;

    assert_eq!(response.status(), 200);
    let names = recipe_names(&response.json());
    assert!(!names.contains(&"Peanut Cookies".to_owned()));
    assert!(!names.is_empty());
}

#[tokio::test]
async fn test_recommend_respects_experience_tier() {
    let catalog = setup_catalog().await;
    let novice = create_test_user(&catalog.database, "novice@example.com", OMNIVORE, 0)
        .await
        .unwrap();
    let body = pantry_body(novice, &[catalog.egg, catalog.milk, catalog.flour], 2);

    let response = AxumTestRequest::post("/api/recommendations")
        .json(&body)
        .send(server::router(&catalog.resources))
        .await;

    assert_eq!(response.status(), 200);
    let mut names = recipe_names(&response.json());
    names.sort();
    assert_eq!(names, vec!["Peanut Cookies", "Scrambled Eggs"]);
}

#[tokio::test]
async fn test_recommend_restrictive_lifestyle_filters_by_name() {
    let database = create_test_database().await.unwrap();
    let ids = create_ingredients(&database, &["rice", "chicken", "tomato"])
        .await
        .unwrap();
    create_test_recipe(&database, "Chicken Rice Bowl", OMNIVORE, 0, &[ids[0], ids[1]])
        .await
        .unwrap();
    create_test_recipe(&database, "Tomato Rice", OMNIVORE, 0, &[ids[0], ids[2]])
        .await
        .unwrap();
    let user_id = create_test_user(&database, "plants@example.com", PLANT_BASED, 0)
        .await
        .unwrap();
    let resources = create_test_resources(database, test_server_config());

    let response = AxumTestRequest::post("/api/recommendations")
        .json(&pantry_body(user_id, &ids, 3))
        .send(server::router(&resources))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(recipe_names(&response.json()), vec!["Tomato Rice"]);
}

#[tokio::test]
async fn test_recommend_never_repeats_recorded_recipes() {
    let catalog = setup_catalog().await;
    let body = pantry_body(catalog.user_id, &[catalog.egg, catalog.milk, catalog.flour], 1);

    let first = AxumTestRequest::post("/api/recommendations")
        .json(&body)
        .send(server::router(&catalog.resources))
        .await;
    assert_eq!(first.status(), 200);
    let first_names = recipe_names(&first.json());
    catalog.resources.recorder.flush().await;

    let second = AxumTestRequest::post("/api/recommendations")
        .json(&body)
        .send(server::router(&catalog.resources))
        .await;
    assert_eq!(second.status(), 200);
    let second_names = recipe_names(&second.json());

    assert!(second_names.iter().all(|name| !first_names.contains(name)));
    assert_eq!(first_names.len() + second_names.len(), 4);
    assert_eq!(catalog.resources.recorder.stats().written, 4);
}

#[tokio::test]
async fn test_recommend_with_no_candidates_is_empty_success() {
    let catalog = setup_catalog().await;
    let body = pantry_body(catalog.user_id, &[catalog.egg], 1);
    let router = server::router(&catalog.resources);

    for _ in 0..2 {
        AxumTestRequest::post("/api/recommendations")
            .json(&body)
            .send(router.clone())
            .await;
        catalog.resources.recorder.flush().await;
    }

    let response = AxumTestRequest::post("/api/recommendations")
        .json(&body)
        .send(router)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["recipes"], json!([]));
}

// ============================================================================
// POST /api/recommendations - Errors
// ============================================================================

#[tokio::test]
async fn test_recommend_missing_user_id() {
    let catalog = setup_catalog().await;

    let response = AxumTestRequest::post("/api/recommendations")
        .header("x-request-id", "req_missing_user")
        .json(&json!({ "ingredients": [{ "ingredientId": 1, "expirationDate": "2099-01-01" }] }))
        .send(server::router(&catalog.resources))
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(
        response.header("x-request-id").as_deref(),
        Some("req_missing_user")
    );
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
    assert!(body["error"]["message"].as_str().unwrap().contains("userId"));
    assert_eq!(body["error"]["request_id"], "req_missing_user");
}

#[tokio::test]
async fn test_recommend_empty_ingredients_rejected_before_lookup() {
    let catalog = setup_catalog().await;

    let response = AxumTestRequest::post("/api/recommendations")
        .json(&json!({ "userId": 999_999, "ingredients": [] }))
        .send(server::router(&catalog.resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_recommend_missing_ingredient_fields() {
    let catalog = setup_catalog().await;

    let response = AxumTestRequest::post("/api/recommendations")
        .json(&json!({ "userId": catalog.user_id, "ingredients": [{ "ingredientId": catalog.egg }] }))
        .send(server::router(&catalog.resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("ingredients[0].expirationDate"));
}

#[tokio::test]
async fn test_recommend_invalid_date() {
    let catalog = setup_catalog().await;

    let response = AxumTestRequest::post("/api/recommendations")
        .json(&json!({
            "userId": catalog.user_id,
            "ingredients": [{ "ingredientId": catalog.egg, "expirationDate": "soon" }],
        }))
        .send(server::router(&catalog.resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");
}

#[tokio::test]
async fn test_recommend_malformed_json() {
    let catalog = setup_catalog().await;

    let response = AxumTestRequest::post("/api/recommendations")
        .raw_json("{\"userId\": ")
        .send(server::router(&catalog.resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");
}

#[tokio::test]
async fn test_recommend_unknown_user() {
    let catalog = setup_catalog().await;

    let response = AxumTestRequest::post("/api/recommendations")
        .json(&pantry_body(424_242, &[catalog.egg], 1))
        .send(server::router(&catalog.resources))
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_recommend_store_failure_is_internal_error() {
    let database = create_test_database().await.unwrap();
    let profiles = FakeProfiles::default().with_user(UserProfile {
        id: 1,
        lifestyle_id: OMNIVORE,
        experience_level_id: 2,
    });
    let recipes = FakeRecipes::default()
        .with_recipe(recipe(1, "Toast", OMNIVORE, 0), &[1])
        .failing_on(1);
    let resources = ServerResourcesBuilder::new()
        .with_database(database)
        .with_config(Arc::new(test_server_config()))
        .with_profile_repository(Arc::new(profiles))
        .with_recipe_repository(Arc::new(recipes))
        .with_history_repository(Arc::new(FakeHistory::default()))
        .build_arc()
        .unwrap();

    let response = AxumTestRequest::post("/api/recommendations")
        .json(&pantry_body(1, &[1], 1))
        .send(server::router(&resources))
        .await;

    assert_eq!(response.status(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "DATABASE_ERROR");
}

// ============================================================================
// POST /api/recommendations - Deadline
// ============================================================================

/// Three recipes behind 11-second ingredient lookups, recorded into `history`
async fn slow_lookup_resources(
    config: ServerConfig,
    history: Arc<FakeHistory>,
) -> Arc<ServerResources> {
    let database = create_test_database().await.unwrap();
    let history_repository: Arc<dyn RecommendationRepository> = history;
    let profiles = FakeProfiles::default().with_user(UserProfile {
        id: 1,
        lifestyle_id: OMNIVORE,
        experience_level_id: 2,
    });
    let recipes = FakeRecipes::default()
        .with_recipe(recipe(1, "A", OMNIVORE, 0), &[10, 11, 12, 13, 14, 15])
        .with_recipe(recipe(2, "B", OMNIVORE, 0), &[10, 11, 12, 13])
        .with_recipe(recipe(3, "C", OMNIVORE, 0), &[10, 16])
        .with_lookup_delay(Duration::from_secs(11));
    ServerResourcesBuilder::new()
        .with_database(database)
        .with_config(Arc::new(config))
        .with_profile_repository(Arc::new(profiles))
        .with_recipe_repository(Arc::new(recipes))
        .with_history_repository(history_repository)
        .build_arc()
        .unwrap()
}

#[tokio::test]
async fn test_recommend_deadline_yields_partial_content() {
    let history = Arc::new(FakeHistory::default());
    let resources = slow_lookup_resources(test_server_config(), history.clone()).await;

    // Only the fakes run from here on; the store is untouched while time is paused
    tokio::time::pause();
    let response = AxumTestRequest::post("/api/recommendations")
        .json(&pantry_body(1, &[10, 11], 1))
        .send(server::router(&resources))
        .await;

    assert_eq!(response.status(), 206);
    assert_eq!(recipe_names(&response.json()), vec!["B"]);

    resources.recorder.flush().await;
    assert_eq!(history.recipe_ids_for(1), vec![2]);
}

#[tokio::test]
async fn test_partial_content_arrives_before_request_timeout() {
    let base = test_server_config();
    let too_short = ServerConfig {
        request_timeout: Duration::from_secs(10),
        ..test_server_config()
    };
    assert!(too_short.validate().is_err());

    // Smallest timeout that still validates
    let config = ServerConfig {
        request_timeout: base.recommendation.deadline + Duration::from_secs(1),
        ..base
    };
    config.validate().unwrap();
    let resources = slow_lookup_resources(config, Arc::new(FakeHistory::default())).await;

    tokio::time::pause();
    let response = AxumTestRequest::post("/api/recommendations")
        .json(&pantry_body(1, &[10, 11], 1))
        .send(server::router(&resources))
        .await;

    assert_eq!(response.status(), 206);
    assert_eq!(recipe_names(&response.json()), vec!["B"]);
}

// ============================================================================
// Request body limit
// ============================================================================

#[tokio::test]
async fn test_oversized_body_rejected() {
    let catalog = setup_catalog().await;
    let padding = "x".repeat(2 * 1024 * 1024);
    let body = format!("{{\"userId\": 1, \"padding\": \"{padding}\"}}");

    let response = AxumTestRequest::post("/api/recommendations")
        .raw_json(&body)
        .header("content-length", &body.len().to_string())
        .send(server::router(&catalog.resources))
        .await;

    assert_eq!(response.status(), 413);
}

// ============================================================================
// GET /api/users/:user_id/recommendations
// ============================================================================

#[tokio::test]
async fn test_history_lists_recorded_recipes() {
    let catalog = setup_catalog().await;
    let router = server::router(&catalog.resources);

    let empty = AxumTestRequest::get(&format!("/api/users/{}/recommendations", catalog.user_id))
        .send(router.clone())
        .await;
    assert_eq!(empty.status(), 200);
    let empty: Value = empty.json();
    assert_eq!(empty["total"], 0);

    let recommend = AxumTestRequest::post("/api/recommendations")
        .json(&pantry_body(catalog.user_id, &[catalog.egg, catalog.milk], 1))
        .send(router.clone())
        .await;
    let returned = recipe_names(&recommend.json());
    catalog.resources.recorder.flush().await;

    let response = AxumTestRequest::get(&format!("/api/users/{}/recommendations", catalog.user_id))
        .send(router)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["total"], returned.len());
    let mut listed = recipe_names(&body);
    let mut expected = returned;
    listed.sort();
    expected.sort();
    assert_eq!(listed, expected);
    assert!(body["recipes"][0]["recommendedAt"].is_string());
}

#[tokio::test]
async fn test_history_unknown_user() {
    let catalog = setup_catalog().await;

    let response = AxumTestRequest::get("/api/users/777777/recommendations")
        .send(server::router(&catalog.resources))
        .await;

    assert_eq!(response.status(), 404);
}

// ============================================================================
// /api/users/:user_id/allergies
// ============================================================================

#[tokio::test]
async fn test_registered_allergy_excludes_recipe() {
    let catalog = setup_catalog().await;
    let router = server::router(&catalog.resources);
    let uri = format!("/api/users/{}/allergies", catalog.user_id);

    let created = AxumTestRequest::post(&uri)
        .json(&json!({ "ingredientId": catalog.peanut }))
        .send(router.clone())
        .await;
    assert_eq!(created.status(), 201);
    let created: Value = created.json();
    assert_eq!(created["ingredientIds"], json!([catalog.peanut]));

    let repeated = AxumTestRequest::post(&uri)
        .json(&json!({ "ingredient_id": catalog.peanut }))
        .send(router.clone())
        .await;
    assert_eq!(repeated.status(), 201);

    let listed = AxumTestRequest::get(&uri).send(router.clone()).await;
    assert_eq!(listed.status(), 200);
    let listed: Value = listed.json();
    assert_eq!(listed["userId"], catalog.user_id);
    assert_eq!(listed["ingredientIds"], json!([catalog.peanut]));

    let response = AxumTestRequest::post("/api/recommendations")
        .json(&pantry_body(catalog.user_id, &[catalog.egg, catalog.flour], 2))
        .send(router)
        .await;
    assert_eq!(response.status(), 200);
    let names = recipe_names(&response.json());
    assert!(!names.is_empty());
    assert!(!names.contains(&"Peanut Cookies".to_owned()));
}

#[tokio::test]
async fn test_allergy_registration_errors() {
    let catalog = setup_catalog().await;
    let router = server::router(&catalog.resources);
    let uri = format!("/api/users/{}/allergies", catalog.user_id);

    let missing = AxumTestRequest::post(&uri)
        .json(&json!({}))
        .header("x-request-id", "req_allergy")
        .send(router.clone())
        .await;
    assert_eq!(missing.status(), 400);
    let missing: Value = missing.json();
    assert_eq!(missing["error"]["code"], "MISSING_REQUIRED_FIELD");
    assert_eq!(missing["error"]["request_id"], "req_allergy");

    let unknown_ingredient = AxumTestRequest::post(&uri)
        .json(&json!({ "ingredientId": 99_999 }))
        .send(router.clone())
        .await;
    assert_eq!(unknown_ingredient.status(), 404);

    let unknown_user = AxumTestRequest::post("/api/users/777777/allergies")
        .json(&json!({ "ingredientId": catalog.peanut }))
        .send(router.clone())
        .await;
    assert_eq!(unknown_user.status(), 404);
    let unknown_user: Value = unknown_user.json();
    assert_eq!(unknown_user["error"]["code"], "RESOURCE_NOT_FOUND");

    let malformed = AxumTestRequest::post(&uri)
        .raw_json("{\"ingredientId\": ")
        .send(router)
        .await;
    assert_eq!(malformed.status(), 400);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_and_ready() {
    let catalog = setup_catalog().await;
    let router = server::router(&catalog.resources);

    let health = AxumTestRequest::get("/health").send(router.clone()).await;
    assert_eq!(health.status(), 200);
    let health: Value = health.json();
    assert_eq!(health["status"], "healthy");

    let ready = AxumTestRequest::get("/ready").send(router).await;
    assert_eq!(ready.status(), 200);
    let ready: Value = ready.json();
    assert_eq!(ready["status"], "ready");
}

#[tokio::test]
async fn test_generated_request_id_is_returned() {
    let catalog = setup_catalog().await;

    let response = AxumTestRequest::get("/health")
        .send(server::router(&catalog.resources))
        .await;

    let request_id = response.header("x-request-id").unwrap();
    assert!(request_id.starts_with("req_"));
}
