#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

use chrono::Utc;
use weekend_traveller_api::config::{AppConfig, LlmConfig};
use weekend_traveller_api::db::sqlite::create_analytics_pool;
use weekend_traveller_api::models::media::{MediaAsset, MediaKind, MediaSource, ProviderQuery};
use weekend_traveller_api::models::trip::{
    NewSearchHistory, NewTrip, SearchHistoryRecord, TripRecord, UpdateTripRequest,
};
use weekend_traveller_api::routes;
use weekend_traveller_api::services::analytics_service::AnalyticsService;
use weekend_traveller_api::services::llm::{
    CompletionRequest, GenerationError, OpenAiClient, StructuredCompletion,
};
use weekend_traveller_api::services::media::{MediaCascade, MediaProvider, ProviderError};
use weekend_traveller_api::services::trip_service::{StoreError, TripRepository};
use weekend_traveller_api::state::AppState;

pub struct TestApp {
    pub state: AppState,
}

impl TestApp {
    /// No LLM key and no media providers.
    pub async fn new() -> Self {
        let llm = Arc::new(OpenAiClient::new(&LlmConfig::default()));
        Self::with(AppConfig::default(), llm, MediaCascade::new(vec![], vec![])).await
    }

    pub async fn with(
        config: AppConfig,
        llm: Arc<dyn StructuredCompletion>,
        media: MediaCascade,
    ) -> Self {
        let pool = create_analytics_pool("sqlite::memory:")
            .await
            .expect("in-memory analytics database");
        let trips = Arc::new(InMemoryTripRepository::default());

        Self {
            state: AppState::new(config, trips, llm, media, AnalyticsService::new(pool)),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(self.state.clone()))
            .configure(routes::configure)
    }
}

#[derive(Default)]
pub struct InMemoryTripRepository {
    trips: RwLock<Vec<TripRecord>>,
    history: RwLock<Vec<SearchHistoryRecord>>,
    next_id: AtomicUsize,
}

impl InMemoryTripRepository {
    fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl TripRepository for InMemoryTripRepository {
    async fn save_trip(&self, trip: NewTrip) -> Result<String, StoreError> {
        let id = self.next_id("trip");
        let now = Utc::now();
        self.trips.write().await.push(TripRecord {
            id: id.clone(),
            destination: trip.destination,
            origin: trip.origin,
            days: trip.days,
            trip_plan: trip.trip_plan,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn get_trip(&self, id: &str) -> Result<Option<TripRecord>, StoreError> {
        Ok(self.trips.read().await.iter().find(|t| t.id == id).cloned())
    }

    async fn list_trips(&self, limit: i64, skip: u64) -> Result<Vec<TripRecord>, StoreError> {
        Ok(self
            .trips
            .read()
            .await
            .iter()
            .rev()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_trips(&self) -> Result<u64, StoreError> {
        Ok(self.trips.read().await.len() as u64)
    }

    async fn update_trip(&self, id: &str, update: UpdateTripRequest) -> Result<bool, StoreError> {
        let mut trips = self.trips.write().await;
        let Some(trip) = trips.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };

        if let Some(plan) = update.trip_plan {
            trip.destination = plan.destination.clone();
            trip.trip_plan = plan;
        }
        if let Some(origin) = update.origin {
            trip.origin = origin;
        }
        if let Some(days) = update.days {
            trip.days = days;
        }
        trip.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete_trip(&self, id: &str) -> Result<bool, StoreError> {
        let mut trips = self.trips.write().await;
        let before = trips.len();
        trips.retain(|t| t.id != id);
        Ok(trips.len() < before)
    }

    async fn save_search_history(&self, entry: NewSearchHistory) -> Result<String, StoreError> {
        let id = self.next_id("history");
        self.history.write().await.push(SearchHistoryRecord {
            id: id.clone(),
            query: entry.query,
            origin: entry.origin,
            days: entry.days,
            timestamp: Utc::now(),
        });
        Ok(id)
    }

    async fn search_history(&self, limit: i64) -> Result<Vec<SearchHistoryRecord>, StoreError> {
        Ok(self
            .history
            .read()
            .await
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Returns the same JSON for every request.
pub struct ScriptedLlm {
    response: serde_json::Value,
    pub calls: AtomicUsize,
}

impl ScriptedLlm {
    pub fn new(response: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl StructuredCompletion for ScriptedLlm {
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<serde_json::Value, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// Media provider with canned results that remembers every query text.
pub struct RecordingProvider {
    source: MediaSource,
    kinds: Vec<MediaKind>,
    results: Vec<MediaAsset>,
    queries: Mutex<Vec<String>>,
}

impl RecordingProvider {
    pub fn empty(source: MediaSource) -> Arc<Self> {
        Self::returning(source, vec![])
    }

    pub fn returning(source: MediaSource, results: Vec<MediaAsset>) -> Arc<Self> {
        Arc::new(Self {
            source,
            kinds: vec![MediaKind::Photo, MediaKind::Video],
            results,
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaProvider for RecordingProvider {
    fn source(&self) -> MediaSource {
        self.source
    }

    fn supports(&self, kind: MediaKind) -> bool {
        self.kinds.contains(&kind)
    }

    async fn fetch(&self, query: &ProviderQuery) -> Result<Vec<MediaAsset>, ProviderError> {
        self.queries.lock().unwrap().push(query.text.clone());
        Ok(self.results.clone())
    }
}

pub fn cascade(providers: &[&Arc<RecordingProvider>]) -> MediaCascade {
    let chain: Vec<Arc<dyn MediaProvider>> = providers
        .iter()
        .map(|provider| Arc::clone(provider) as Arc<dyn MediaProvider>)
        .collect();
    MediaCascade::new(chain.clone(), chain)
}

pub fn sightseeing(time: &str, activity: &str) -> serde_json::Value {
    json!({
        "time": time,
        "activity": activity,
        "description": format!("{} is one of the highlights of the trip.", activity),
        "coordinates": {"lat": 26.9855, "lng": 75.8513},
        "image_url": null,
        "media_credit": null,
        "nearby_attractions": ["Panna Meena ka Kund"]
    })
}

/// A two day plan with two activities per day.
pub fn trip_plan_json(destination: &str, activities: [&str; 4]) -> serde_json::Value {
    json!({
        "destination": destination,
        "best_time_to_visit": "October to March",
        "estimated_budget": "INR 15,000 - 20,000",
        "route_info": {"distance": "280 km", "duration": "5 hours", "map_url": null},
        "itinerary": [
            {
                "day": 1,
                "activities": [
                    sightseeing("09:00 AM", activities[0]),
                    sightseeing("02:00 PM", activities[1])
                ]
            },
            {
                "day": 2,
                "activities": [
                    sightseeing("10:00 AM", activities[2]),
                    sightseeing("04:00 PM", activities[3])
                ]
            }
        ],
        "hotels": null,
        "destination_info": {
            "city_name": destination,
            "description": "The Pink City.",
            "top_attractions": null,
            "hotels": null,
            "image_url": null,
            "media_credit": null
        },
        "origin_info": null,
        "hero_image": null,
        "hero_video": null,
        "media_credit": null,
        "coordinates": {"lat": 26.9124, "lng": 75.7873},
        "origin_coordinates": {"lat": 28.6139, "lng": 77.2090}
    })
}

pub fn jaipur_plan() -> serde_json::Value {
    trip_plan_json(
        "Jaipur",
        ["Visit Amber Fort", "Explore Hawa Mahal", "Fort", "Walk around Johari Bazaar"],
    )
}
