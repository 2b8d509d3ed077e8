// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profiles, preferences, Street Cred)
//! - Places (seeded catalog, read-only here)
//! - Routes (user itineraries)
//! - Expenses (per-user expense log)
//!
//! Street Cred and visited-places mutations run inside Firestore
//! transactions so concurrent visit/route-creation requests cannot
//! lose updates.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Expense, Place, Route, User};
use crate::services::gamification;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by document ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by email (unique).
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.for_all([q.field("email").eq(email)]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.into_iter().next())
    }

    /// Create or update a user.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Mark a place as visited and award Street Cred, atomically.
    ///
    /// Runs inside a Firestore transaction so a concurrent visit or route
    /// creation cannot lose the update. Idempotent: visiting an already
    /// visited place changes nothing and returns the current user state.
    pub async fn visit_place_atomic(
        &self,
        user_id: &str,
        place_id: &str,
        now: &str,
    ) -> Result<User, AppError> {
        let mut transaction = self
            .get_client()?
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        // Read the current user state; the write below commits through
        // the transaction
        let user: Option<User> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to read user in transaction: {}", e)))?;

        let mut user =
            user.ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        // Idempotent duplicate: no write needed
        if user.visited_places.iter().any(|id| id == place_id) {
            tracing::debug!(user_id, place_id, "Place already visited (idempotent skip)");
            let _ = transaction.rollback().await;
            return Ok(user);
        }

        user.visited_places.push(place_id.to_string());
        user.street_cred += gamification::POINTS_PER_VISIT;
        user.updated_at = now.to_string();

        self.get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(&user)
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(format!("Failed to add user to transaction: {}", e)))?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            user_id,
            place_id,
            street_cred = user.street_cred,
            "Place visit recorded"
        );

        Ok(user)
    }

    /// Recompute a user's Street Cred from scratch after route creation.
    ///
    /// Recomputing (rather than incrementing by 25) keeps the stored value
    /// consistent even if the visited-place count changed out of band.
    pub async fn recompute_street_cred_atomic(
        &self,
        user_id: &str,
        routes_created: u32,
        now: &str,
    ) -> Result<User, AppError> {
        let mut transaction = self
            .get_client()?
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        let user: Option<User> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to read user in transaction: {}", e)))?;

        let mut user =
            user.ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        user.street_cred =
            gamification::street_cred(user.visited_places.len() as u32, routes_created);
        user.updated_at = now.to_string();

        self.get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(&user)
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(format!("Failed to add user to transaction: {}", e)))?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            user_id,
            routes_created,
            street_cred = user.street_cred,
            "Street Cred recomputed"
        );

        Ok(user)
    }

    // ─── Place Operations ────────────────────────────────────────

    /// Get a place by catalog ID.
    pub async fn get_place(&self, place_id: u32) -> Result<Option<Place>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PLACES)
            .obj()
            .one(&place_id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List places, optionally filtered by category and maximum price level.
    ///
    /// Tag filtering happens in the handler; the catalog is small.
    pub async fn list_places(
        &self,
        category: Option<&str>,
        max_price_level: Option<u8>,
    ) -> Result<Vec<Place>, AppError> {
        let query = self.get_client()?.fluent().select().from(collections::PLACES);

        let query = match (category, max_price_level) {
            (Some(category), Some(price)) => {
                let category = category.to_string();
                query.filter(move |q| {
                    q.for_all([
                        q.field("category").eq(category.clone()),
                        q.field("price_level").less_than_or_equal(price as u32),
                    ])
                })
            }
            (Some(category), None) => {
                let category = category.to_string();
                query.filter(move |q| q.field("category").eq(category.clone()))
            }
            (None, Some(price)) => query
                .filter(move |q| q.field("price_level").less_than_or_equal(price as u32)),
            (None, None) => query,
        };

        query
            .order_by([("id", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Route Operations ────────────────────────────────────────

    /// Get a route by document ID.
    pub async fn get_route(&self, route_id: &str) -> Result<Option<Route>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ROUTES)
            .obj()
            .one(route_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a route.
    pub async fn insert_route(&self, route: &Route) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ROUTES)
            .document_id(&route.id)
            .object(route)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List a user's routes, newest first.
    pub async fn list_routes_for_user(&self, user_id: &str) -> Result<Vec<Route>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ROUTES)
            .filter(|q| q.for_all([q.field("user_id").eq(user_id)]))
            .order_by([("created_at", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count a user's routes (small per-user cardinality).
    pub async fn count_routes_for_user(&self, user_id: &str) -> Result<u32, AppError> {
        let routes: Vec<Route> = self.list_routes_for_user(user_id).await?;
        Ok(routes.len() as u32)
    }

    /// Delete a route.
    pub async fn delete_route(&self, route_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::ROUTES)
            .document_id(route_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Expense Operations ──────────────────────────────────────

    /// Get an expense by document ID.
    pub async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::EXPENSES)
            .obj()
            .one(expense_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store an expense.
    pub async fn insert_expense(&self, expense: &Expense) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::EXPENSES)
            .document_id(&expense.id)
            .object(expense)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List a user's expenses, newest date first.
    pub async fn list_expenses_for_user(&self, user_id: &str) -> Result<Vec<Expense>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::EXPENSES)
            .filter(|q| q.for_all([q.field("user_id").eq(user_id)]))
            .order_by([("date", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an expense.
    pub async fn delete_expense(&self, expense_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::EXPENSES)
            .document_id(expense_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
