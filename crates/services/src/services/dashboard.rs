//! Dashboard data aggregation service.
//!
//! Fans out one request per feed, waits for all of them to settle, and
//! applies the results to a single shared view in one atomic write. A feed
//! returning a non-success status degrades to its default; only a
//! transport-level failure fails the cycle, and a failed cycle keeps
//! whatever data earlier cycles delivered.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use models::models::{
    crop::CropData,
    crop_health::HarvestAlert,
    dashboard::{DashboardPatch, DashboardView},
    farm::{FarmContext, FarmCoordinates},
    financial::BudgetData,
    recommendation::RecommendationData,
    regional::RegionalData,
    satellite::QueueStatus,
    task::TaskData,
    weather::{WeatherAlertsResponse, WeatherData},
};
use tokio::sync::{Notify, RwLock};
use tracing::{debug, info, warn};

use super::feed_client::{FarmApiClient, FeedError};

/// Payload of one completed fetch cycle, applied to the view as a unit.
struct CycleResult {
    weather: WeatherData,
    tasks: Vec<TaskData>,
    recommendations: Vec<RecommendationData>,
    harvest_alerts: Vec<HarvestAlert>,
    queue_status: Option<QueueStatus>,
    budget_data: Option<BudgetData>,
    regional_data: Option<RegionalData>,
}

/// Aggregates the dashboard feeds into one shared view.
///
/// The view is owned exclusively by this service; consumers read
/// projections and mutate only through its methods.
pub struct DashboardService {
    client: FarmApiClient,
    view: RwLock<DashboardView>,
    context: RwLock<FarmContext>,
    /// Cycle generation; a cycle applies its results only if no newer
    /// cycle has been issued meanwhile, so the most recently issued cycle
    /// always wins.
    generation: AtomicU64,
    /// Signalled on farm-context changes so the refresh loop rebaselines
    /// its timer.
    context_changed: Notify,
    max_recommendations: u32,
}

impl DashboardService {
    pub fn new(client: FarmApiClient, max_recommendations: u32) -> Self {
        Self {
            client,
            view: RwLock::new(DashboardView::initial(Vec::new())),
            context: RwLock::new(FarmContext::default()),
            generation: AtomicU64::new(0),
            context_changed: Notify::new(),
            max_recommendations,
        }
    }

    /// Reset the view for a (re)mounted farm context and run the first
    /// fetch cycle.
    pub async fn initialize(
        &self,
        farm_id: impl Into<String>,
        coordinates: Option<FarmCoordinates>,
        seed_crops: Vec<CropData>,
    ) {
        let context = FarmContext::new(farm_id, coordinates);
        info!(farm_id = %context.farm_id, "initializing dashboard");
        {
            let mut ctx = self.context.write().await;
            *ctx = context;
        }
        {
            let mut view = self.view.write().await;
            *view = DashboardView::initial(seed_crops);
        }
        // Supersede any cycle still in flight for the previous context.
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.context_changed.notify_waiters();
        self.fetch_all().await;
    }

    /// Switch to a different farm or updated coordinates. Existing data
    /// stays on screen until the new cycle applies; the superseded cycle's
    /// results are discarded.
    pub async fn set_farm_context(
        &self,
        farm_id: impl Into<String>,
        coordinates: Option<FarmCoordinates>,
    ) {
        let context = FarmContext::new(farm_id, coordinates);
        info!(farm_id = %context.farm_id, "switching farm context");
        {
            let mut ctx = self.context.write().await;
            *ctx = context;
        }
        self.context_changed.notify_waiters();
        self.fetch_all().await;
    }

    /// Manual refresh requested by a consumer.
    pub async fn refetch(&self) {
        self.fetch_all().await;
    }

    /// Run one fetch cycle. No-op when no farm is selected.
    pub async fn fetch_all(&self) {
        let context = self.context.read().await.clone();
        if !context.has_farm() {
            debug!("dashboard fetch skipped: no farm selected");
            return;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut view = self.view.write().await;
            view.loading = true;
            view.error = None;
        }

        match self.run_cycle(&context).await {
            Ok(result) => self.apply_cycle(generation, result).await,
            Err(error) => self.apply_cycle_error(generation, error).await,
        }
    }

    /// Issue every feed request concurrently and wait for all of them.
    /// Soft failures have already been folded into defaults by the client;
    /// the first hard failure rejects the whole cycle.
    async fn run_cycle(&self, context: &FarmContext) -> Result<CycleResult, FeedError> {
        let farm_id = context.farm_id.as_str();
        let coordinates = context.coordinates;

        // Coordinate-gated feeds resolve to their defaults without a
        // network call when the farm has no coordinates.
        let current_weather = async {
            match coordinates {
                Some(_) => self.client.current_weather().await,
                None => Ok(None),
            }
        };
        let weather_alerts = async {
            match coordinates {
                Some(coords) => self.client.weather_alerts(coords).await,
                None => Ok(WeatherAlertsResponse::default()),
            }
        };
        let regional_comparison = async {
            match coordinates {
                Some(coords) => self.client.regional_comparison(coords).await,
                None => Ok(None),
            }
        };

        let (current, alerts, tasks, recommendations, analysis, queue_status, budget, regional) =
            tokio::try_join!(
                current_weather,
                weather_alerts,
                self.client.tasks(farm_id),
                self.client
                    .recommendations(farm_id, self.max_recommendations),
                self.client.disease_pest_analysis(farm_id),
                self.client.queue_status(),
                self.client.budget(farm_id),
                regional_comparison,
            )?;

        let (conditions, forecast) = match current {
            Some(payload) => (Some(payload.conditions), payload.forecast),
            None => (None, Vec::new()),
        };

        Ok(CycleResult {
            weather: WeatherData {
                current: conditions,
                alerts: alerts.alerts,
                forecast,
            },
            tasks: tasks.tasks,
            recommendations: recommendations.recommendations,
            harvest_alerts: analysis.harvest_alerts,
            queue_status,
            budget_data: budget,
            regional_data: regional,
        })
    }

    /// Apply a successful cycle in one atomic write. Crops are seeded by
    /// the caller and never touched here.
    async fn apply_cycle(&self, generation: u64, result: CycleResult) {
        let mut view = self.view.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding results from superseded fetch cycle");
            return;
        }

        view.weather = Some(result.weather);
        view.tasks = result.tasks;
        view.recommendations = result.recommendations;
        view.harvest_alerts = result.harvest_alerts;
        view.queue_status = result.queue_status;
        view.budget_data = result.budget_data;
        view.regional_data = result.regional_data;
        view.loading = false;
        view.error = None;
        view.last_updated = Some(Utc::now());

        debug!(
            tasks = view.tasks.len(),
            recommendations = view.recommendations.len(),
            harvest_alerts = view.harvest_alerts.len(),
            "dashboard fetch cycle applied"
        );
    }

    /// A hard failure surfaces as the view's `error`; previously fetched
    /// data stays in place.
    async fn apply_cycle_error(&self, generation: u64, error: FeedError) {
        let mut view = self.view.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding error from superseded fetch cycle");
            return;
        }

        warn!(error = %error, "dashboard fetch cycle failed, keeping previous data");
        view.loading = false;
        view.error = Some(error.to_string());
    }

    /// Overwrite a single view field on behalf of a consumer that already
    /// refreshed the underlying resource itself.
    pub async fn apply_patch(&self, patch: DashboardPatch) {
        debug!(field = patch.field_name(), "applying dashboard patch");
        let mut view = self.view.write().await;
        match patch {
            DashboardPatch::Weather(weather) => view.weather = weather,
            DashboardPatch::Crops(crops) => view.crops = crops,
            DashboardPatch::Tasks(tasks) => view.tasks = tasks,
            DashboardPatch::Recommendations(recommendations) => {
                view.recommendations = recommendations
            }
            DashboardPatch::HarvestAlerts(harvest_alerts) => view.harvest_alerts = harvest_alerts,
            DashboardPatch::QueueStatus(queue_status) => view.queue_status = queue_status,
            DashboardPatch::BudgetData(budget_data) => view.budget_data = budget_data,
            DashboardPatch::RegionalData(regional_data) => view.regional_data = regional_data,
        }
        view.last_updated = Some(Utc::now());
    }

    /// Snapshot of the whole view.
    pub async fn view(&self) -> DashboardView {
        self.view.read().await.clone()
    }

    pub async fn farm_context(&self) -> FarmContext {
        self.context.read().await.clone()
    }

    pub async fn weather(&self) -> Option<WeatherData> {
        self.view.read().await.weather.clone()
    }

    pub async fn crops(&self) -> Vec<CropData> {
        self.view.read().await.crops.clone()
    }

    pub async fn tasks(&self) -> Vec<TaskData> {
        self.view.read().await.tasks.clone()
    }

    pub async fn recommendations(&self) -> Vec<RecommendationData> {
        self.view.read().await.recommendations.clone()
    }

    pub async fn harvest_alerts(&self) -> Vec<HarvestAlert> {
        self.view.read().await.harvest_alerts.clone()
    }

    pub async fn queue_status(&self) -> Option<QueueStatus> {
        self.view.read().await.queue_status.clone()
    }

    pub async fn budget_data(&self) -> Option<BudgetData> {
        self.view.read().await.budget_data.clone()
    }

    pub async fn regional_data(&self) -> Option<RegionalData> {
        self.view.read().await.regional_data.clone()
    }

    /// Notifier the refresh loop listens on for timer rebaselining.
    pub fn context_changed(&self) -> &Notify {
        &self.context_changed
    }
}
