//! Cycle-level behavior of the dashboard aggregator, driven against an
//! in-process stub of the upstream farm API.

use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use models::models::{
    crop::CropData,
    dashboard::{DashboardPatch, DashboardView},
    farm::FarmCoordinates,
    task::{TaskData, TaskPriority, TaskStatus},
    weather::WeatherData,
};
use serde_json::{Value, json};
use services::services::{dashboard::DashboardService, feed_client::FarmApiClient};
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct StubState {
    hits: Arc<Mutex<HashMap<&'static str, usize>>>,
    budget_fails: bool,
    slow_farm: Option<(String, Duration)>,
}

impl StubState {
    async fn record(&self, feed: &'static str) {
        *self.hits.lock().await.entry(feed).or_insert(0) += 1;
    }

    async fn hit_count(&self, feed: &'static str) -> usize {
        self.hits.lock().await.get(feed).copied().unwrap_or(0)
    }
}

async fn current_weather(State(stub): State<StubState>) -> Json<Value> {
    stub.record("weather-current").await;
    Json(json!({
        "temperature_c": 21.5,
        "humidity_percent": 58.0,
        "wind_speed_kph": 11.0,
        "precipitation_mm": 0.0,
        "conditions": "clear",
        "observed_at": "2026-08-24T10:00:00Z",
        "forecast": [{
            "date": "2026-08-25",
            "high_c": 24.0,
            "low_c": 14.0,
            "precipitation_probability": 0.1,
            "conditions": "sunny"
        }]
    }))
}

async fn weather_alerts(
    State(stub): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    stub.record("weather-alerts").await;
    assert!(params.contains_key("latitude"), "latitude param missing");
    assert!(params.contains_key("longitude"), "longitude param missing");
    Json(json!({
        "alerts": [{
            "id": "heat-1",
            "severity": "warning",
            "headline": "heat advisory",
            "message": "temperatures above 38C expected",
            "starts_at": null,
            "ends_at": null
        }]
    }))
}

async fn tasks(
    State(stub): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    stub.record("tasks").await;
    let farm_id = params.get("farmId").cloned().unwrap_or_default();
    if let Some((slow_farm, delay)) = &stub.slow_farm {
        if *slow_farm == farm_id {
            tokio::time::sleep(*delay).await;
        }
    }
    Json(json!({
        "tasks": [{
            "id": "8f2b1f3e-6f5a-4f0e-8a6d-000000000001",
            "title": format!("task for {farm_id}"),
            "description": null,
            "status": "pending",
            "priority": "medium",
            "due_date": null,
            "created_at": "2026-08-24T08:00:00Z"
        }]
    }))
}

async fn recommendations(
    State(stub): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    stub.record("recommendations").await;
    assert_eq!(
        params.get("maxRecommendations").map(String::as_str),
        Some("5"),
        "recommendation cap not forwarded"
    );
    Json(json!({
        "recommendations": [{
            "id": "8f2b1f3e-6f5a-4f0e-8a6d-000000000002",
            "title": "apply nitrogen",
            "description": null,
            "category": "fertilization",
            "priority": 1,
            "created_at": null
        }]
    }))
}

async fn disease_pest(State(stub): State<StubState>) -> Json<Value> {
    stub.record("disease-pest").await;
    Json(json!({
        "harvestAlerts": [{
            "id": "8f2b1f3e-6f5a-4f0e-8a6d-000000000003",
            "crop_name": "corn",
            "severity": "advisory",
            "message": "leaf rust detected in the north field",
            "detected_at": null
        }]
    }))
}

async fn queue_status(State(stub): State<StubState>) -> Json<Value> {
    stub.record("queue").await;
    Json(json!({
        "pending": 3,
        "processing": 1,
        "completed": 42,
        "failed": 0,
        "last_processed_at": null
    }))
}

async fn budget(State(stub): State<StubState>) -> Response {
    stub.record("budget").await;
    if stub.budget_fails {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "budget service unavailable"})),
        )
            .into_response();
    }
    Json(json!({
        "total_budget": 50000.0,
        "total_spent": 31250.5,
        "remaining": 18749.5,
        "currency": "USD",
        "categories": [{"name": "seed", "allocated": 12000.0, "spent": 11800.0}]
    }))
    .into_response()
}

async fn regional(State(stub): State<StubState>) -> Json<Value> {
    stub.record("regional").await;
    Json(json!({
        "region": "central valley",
        "farm_count": 12,
        "average_yield_tons_per_hectare": 8.2,
        "average_ndvi": 0.71,
        "percentile_rank": 64.0
    }))
}

async fn spawn_stub(stub: StubState) -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let app = Router::new()
        .route("/api/weather/current", get(current_weather))
        .route("/api/weather/alerts", get(weather_alerts))
        .route("/api/tasks", get(tasks))
        .route("/api/nba/recommendations", get(recommendations))
        .route("/api/crop-health/disease-pest-analysis", get(disease_pest))
        .route("/api/satellite/queue", get(queue_status))
        .route("/api/financial/budget", get(budget))
        .route("/api/farms/regional-comparison", get(regional))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });
    (addr, handle)
}

fn dashboard_for(addr: SocketAddr) -> Arc<DashboardService> {
    let client = FarmApiClient::new(format!("http://{addr}"), Duration::from_secs(5))
        .expect("farm api client");
    Arc::new(DashboardService::new(client, 5))
}

const COORDS: FarmCoordinates = FarmCoordinates {
    latitude: 36.74,
    longitude: -119.77,
};

#[tokio::test]
async fn successful_cycle_populates_every_slice() {
    let (addr, _stub) = spawn_stub(StubState::default()).await;
    let dashboard = dashboard_for(addr);

    dashboard
        .initialize("farm-1", Some(COORDS), Vec::new())
        .await;

    let view = dashboard.view().await;
    assert!(!view.loading);
    assert!(view.error.is_none());
    assert!(view.last_updated.is_some());

    let weather = view.weather.expect("weather slice");
    assert_eq!(
        weather.current.expect("current conditions").temperature_c,
        21.5
    );
    assert_eq!(weather.alerts.len(), 1);
    assert_eq!(weather.forecast.len(), 1);

    assert_eq!(view.tasks.len(), 1);
    assert_eq!(view.tasks[0].title, "task for farm-1");
    assert_eq!(view.recommendations.len(), 1);
    assert_eq!(view.harvest_alerts.len(), 1);
    assert_eq!(view.queue_status.expect("queue status").completed, 42);
    assert_eq!(view.budget_data.expect("budget").total_budget, 50000.0);
    assert_eq!(
        view.regional_data.expect("regional").region.as_deref(),
        Some("central valley")
    );
}

#[tokio::test]
async fn seeded_crops_survive_fetch_cycles() {
    let (addr, _stub) = spawn_stub(StubState::default()).await;
    let dashboard = dashboard_for(addr);

    let crop = CropData {
        id: uuid::Uuid::new_v4(),
        name: "corn".to_string(),
        variety: Some("dent".to_string()),
        planted_area_hectares: Some(40.0),
        growth_stage: None,
        health_score: None,
    };
    dashboard
        .initialize("farm-1", Some(COORDS), vec![crop.clone()])
        .await;
    dashboard.refetch().await;

    assert_eq!(dashboard.crops().await, vec![crop]);
}

#[tokio::test]
async fn soft_failure_falls_back_to_feed_default() {
    let stub = StubState {
        budget_fails: true,
        ..StubState::default()
    };
    let (addr, _stub) = spawn_stub(stub).await;
    let dashboard = dashboard_for(addr);

    dashboard
        .initialize("farm-1", Some(COORDS), Vec::new())
        .await;

    let view = dashboard.view().await;
    assert!(view.budget_data.is_none(), "failed feed must default");
    assert!(view.error.is_none(), "soft failure must not surface");
    assert!(!view.loading);
    // The other feeds still landed.
    assert_eq!(view.tasks.len(), 1);
    assert!(view.weather.is_some());
    assert!(view.queue_status.is_some());
}

/// Reserve an address nothing listens on, so every request to it fails at
/// the transport level.
async fn dead_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("reserve port");
    let addr = listener.local_addr().expect("dead addr");
    drop(listener);
    addr
}

#[tokio::test]
async fn hard_failure_keeps_stale_view() {
    let dashboard = dashboard_for(dead_addr().await);

    dashboard
        .initialize("farm-1", Some(COORDS), Vec::new())
        .await;
    // Simulate data delivered by an earlier successful cycle.
    let tasks = vec![
        TaskData {
            id: uuid::Uuid::new_v4(),
            title: "check irrigation lines".to_string(),
            description: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::High,
            due_date: None,
            created_at: Utc::now(),
        },
        TaskData {
            id: uuid::Uuid::new_v4(),
            title: "repair fence".to_string(),
            description: None,
            status: TaskStatus::InProgress,
            priority: TaskPriority::Low,
            due_date: None,
            created_at: Utc::now(),
        },
    ];
    dashboard
        .apply_patch(DashboardPatch::Tasks(tasks.clone()))
        .await;
    let before = dashboard.view().await;

    dashboard.refetch().await;

    let after = dashboard.view().await;
    assert!(after.error.is_some(), "hard failure must surface");
    assert!(
        !after.error.as_deref().unwrap_or_default().is_empty(),
        "error message must not be empty"
    );
    assert!(!after.loading);
    assert_eq!(after.tasks, tasks, "stale data must be preserved");
    assert_eq!(after.weather, before.weather);
    assert_eq!(after.budget_data, before.budget_data);
    assert_eq!(
        after.last_updated, before.last_updated,
        "failed cycle must not advance last_updated"
    );
}

#[tokio::test]
async fn missing_coordinates_skip_gated_feeds_without_requests() {
    let stub = StubState::default();
    let (addr, _stub) = spawn_stub(stub.clone()).await;
    let dashboard = dashboard_for(addr);

    dashboard.initialize("farm-1", None, Vec::new()).await;

    assert_eq!(stub.hit_count("weather-current").await, 0);
    assert_eq!(stub.hit_count("weather-alerts").await, 0);
    assert_eq!(stub.hit_count("regional").await, 0);
    assert_eq!(stub.hit_count("tasks").await, 1);
    assert_eq!(stub.hit_count("recommendations").await, 1);
    assert_eq!(stub.hit_count("disease-pest").await, 1);
    assert_eq!(stub.hit_count("queue").await, 1);
    assert_eq!(stub.hit_count("budget").await, 1);

    let view = dashboard.view().await;
    assert_eq!(view.weather, Some(WeatherData::default()));
    assert!(view.regional_data.is_none());
    assert_eq!(view.tasks.len(), 1);
}

#[tokio::test]
async fn empty_farm_id_issues_no_requests() {
    let stub = StubState::default();
    let (addr, _stub) = spawn_stub(stub.clone()).await;
    let dashboard = dashboard_for(addr);

    dashboard.initialize("", None, Vec::new()).await;
    dashboard.refetch().await;

    assert!(stub.hits.lock().await.is_empty(), "no feed may be called");
    assert_eq!(dashboard.view().await, DashboardView::initial(Vec::new()));
}

#[tokio::test]
async fn back_to_back_refetches_are_idempotent() {
    let (addr, _stub) = spawn_stub(StubState::default()).await;
    let dashboard = dashboard_for(addr);

    dashboard
        .initialize("farm-1", Some(COORDS), Vec::new())
        .await;
    let mut first = dashboard.view().await;

    dashboard.refetch().await;
    let mut second = dashboard.view().await;

    first.last_updated = None;
    second.last_updated = None;
    assert_eq!(first, second);
}

#[tokio::test]
async fn refresh_service_repolls_on_its_interval() {
    let stub = StubState::default();
    let (addr, _stub) = spawn_stub(stub.clone()).await;
    let dashboard = dashboard_for(addr);

    dashboard
        .initialize("farm-1", Some(COORDS), Vec::new())
        .await;
    assert_eq!(stub.hit_count("tasks").await, 1);

    let handle = services::services::refresh::DashboardRefreshService::spawn(
        dashboard.clone(),
        Duration::from_millis(50),
    );
    tokio::time::sleep(Duration::from_millis(180)).await;
    handle.abort();

    let polls = stub.hit_count("tasks").await;
    assert!(polls >= 3, "expected periodic refetches, saw {polls}");

    // Aborted loop must stop polling. Let any request already on the wire
    // land before taking the baseline.
    tokio::time::sleep(Duration::from_millis(60)).await;
    let after_abort = stub.hit_count("tasks").await;
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(stub.hit_count("tasks").await, after_abort);
}

#[tokio::test]
async fn superseded_cycle_is_discarded() {
    let stub = StubState {
        slow_farm: Some(("slow-farm".to_string(), Duration::from_millis(300))),
        ..StubState::default()
    };
    let (addr, _stub) = spawn_stub(stub).await;
    let dashboard = dashboard_for(addr);

    let slow_dashboard = dashboard.clone();
    let slow_cycle = tokio::spawn(async move {
        slow_dashboard
            .initialize("slow-farm", Some(COORDS), Vec::new())
            .await;
    });

    // Let the slow cycle get in flight, then switch farms underneath it.
    tokio::time::sleep(Duration::from_millis(50)).await;
    dashboard.set_farm_context("fast-farm", Some(COORDS)).await;
    slow_cycle.await.expect("slow cycle");

    let view = dashboard.view().await;
    assert_eq!(
        view.tasks[0].title, "task for fast-farm",
        "the most recently issued cycle must win"
    );
    assert!(view.error.is_none());
}
