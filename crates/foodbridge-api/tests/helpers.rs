//! Shared helpers for API integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use foodbridge_api::{AppState, build_router};
use foodbridge_auth::JwtEncoder;
use foodbridge_core::config::{AppConfig, StoreBackend};
use foodbridge_core::types::id::UserId;
use foodbridge_database::{MemoryStore, Stores, UserDirectory};
use foodbridge_entity::user::{User, UserRole};

/// A seeded user and a bearer token for them.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: UserId,
    pub token: String,
}

/// Router over an in-memory store, plus the means to mint users.
pub struct TestServer {
    pub router: Router,
    pub store: MemoryStore,
    encoder: JwtEncoder,
}

impl TestServer {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.backend = StoreBackend::Memory;
        config.auth.jwt_secret = "api-test-secret".to_string();

        let store = MemoryStore::new();
        let encoder = JwtEncoder::new(&config.auth);
        let state = AppState::new(config, Stores::memory(store.clone()));

        Self {
            router: build_router(state),
            store,
            encoder,
        }
    }

    pub async fn user(&self, role: UserRole) -> TestUser {
        let id = UserId::new();
        self.store
            .upsert(&User {
                id,
                email: format!("{id}@example.test"),
                full_name: format!("Test {role}"),
                role,
                is_active: true,
                created_at: Utc::now(),
            })
            .await
            .expect("seed user");
        let (token, _) = self
            .encoder
            .generate_access_token(id, role)
            .expect("mint token");
        TestUser { id, token }
    }

    /// Send a request and return the status and decoded JSON body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user: Option<&TestUser>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header("authorization", format!("Bearer {}", user.token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, user: &TestUser) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(user), None).await
    }

    pub async fn post(&self, uri: &str, user: &TestUser, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(user), Some(body)).await
    }

    pub async fn patch_status(
        &self,
        uri: &str,
        user: &TestUser,
        status: &str,
    ) -> (StatusCode, Value) {
        self.send(
            Method::PATCH,
            uri,
            Some(user),
            Some(json!({ "status": status })),
        )
        .await
    }

    /// Create a donation as `donor` and return its ID.
    pub async fn create_donation(&self, donor: &TestUser) -> String {
        let (status, body) = self
            .post("/api/donations", donor, donation_body("Vegetable crates"))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

pub fn donation_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Mixed seasonal vegetables",
        "quantity_total": 40.0,
        "quantity_unit": "kg",
        "expiry_time": (Utc::now() + Duration::hours(12)).to_rfc3339(),
        "pickup_location": "Warehouse 4, Dock Rd",
        "food_items": [
            {
                "name": "Carrots",
                "category": "produce",
                "quantity": 40.0,
                "quantity_unit": "kg",
                "dietary_info": ["vegan"],
                "allergens": []
            }
        ]
    })
}

pub fn assignment_body(donation_id: &str, volunteer: &TestUser) -> Value {
    json!({
        "donation_id": donation_id,
        "volunteer_id": volunteer.id,
        "pickup_time": (Utc::now() + Duration::hours(2)).to_rfc3339(),
        "pickup_address": "Warehouse 4, Dock Rd",
        "dropoff_address": "Community Kitchen, 9 Hill St"
    })
}
