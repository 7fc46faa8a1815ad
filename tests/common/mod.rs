#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

use plantfloor_api::{
    config::AppConfig,
    db,
    entities::{
        employee, product, stock, storage, warehouse,
        work_order::{self, WorkOrderStatusType},
    },
    logging::discard_logger,
    AppState,
};

/// Helper harness for spinning up the application against an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Construct a test application, letting the caller adjust the configuration first.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // A single connection keeps every query on the same in-memory database.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.cors_allow_any_origin = true;
        adjust(&mut cfg);

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = plantfloor_api::build_router(state.clone(), discard_logger());

        Self { router, state }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.state.db
    }

    /// Send a request against the router with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn seed_product(&self, name: &str) -> product::Model {
        product::ActiveModel {
            product_name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed product")
    }

    pub async fn seed_warehouse(&self, name: &str) -> warehouse::Model {
        warehouse::ActiveModel {
            warehouse_name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed warehouse")
    }

    pub async fn seed_employee(&self, name: &str) -> employee::Model {
        employee::ActiveModel {
            employee_name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed employee")
    }

    pub async fn seed_stock(&self, product_code: i32, quantity: i32) -> stock::Model {
        stock::ActiveModel {
            product_code: Set(product_code),
            quantity: Set(quantity),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed stock")
    }

    /// Inserts a storage record directly, bypassing the stock quantity check.
    pub async fn seed_storage(
        &self,
        stock_code: i32,
        warehouse_code: i32,
        initial: i32,
        destroyed: i32,
        created_at: NaiveDateTime,
    ) -> storage::Model {
        storage::ActiveModel {
            stock_code: Set(stock_code),
            warehouse_code: Set(warehouse_code),
            initial_quantity: Set(initial),
            destroy_quantity: Set(destroyed),
            created_at: Set(created_at),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed storage")
    }

    pub async fn seed_work_order(
        &self,
        product_code: i32,
        employee_code: i32,
        ordered_quantity: i32,
    ) -> work_order::Model {
        let date = day(2024, 3, 1);
        work_order::ActiveModel {
            work_order_date: Set(date),
            work_written_date: Set(date),
            ordered_quantity: Set(ordered_quantity),
            completed_status: Set(WorkOrderStatusType::Ordered),
            product_code: Set(product_code),
            employee_code: Set(employee_code),
            line_code: Set(Some(2)),
            line_name: Set(Some("Line 2".to_string())),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed work order")
    }
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn at(year: i32, month: u32, d: u32, hour: u32) -> NaiveDateTime {
    day(year, month, d)
        .and_hms_opt(hour, 0, 0)
        .expect("valid time")
}

pub async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is json")
}
