use mongodb::Client;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::analytics_service::AnalyticsService;
use crate::services::llm::{OpenAiClient, StructuredCompletion};
use crate::services::media::MediaCascade;
use crate::services::trip_generation_service::TripGenerationService;
use crate::services::trip_service::{MongoTripRepository, TripRepository};

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub trips: Arc<dyn TripRepository>,
    pub media: Arc<MediaCascade>,
    pub generator: Arc<TripGenerationService>,
    pub analytics: AnalyticsService,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        trips: Arc<dyn TripRepository>,
        llm: Arc<dyn StructuredCompletion>,
        media: MediaCascade,
        analytics: AnalyticsService,
    ) -> Self {
        let media = Arc::new(media);
        let generator = Arc::new(TripGenerationService::new(
            llm,
            media.clone(),
            config.travel_region.clone(),
        ));

        Self {
            config: Arc::new(config),
            trips,
            media,
            generator,
            analytics,
        }
    }

    /// Production wiring: MongoDB trips, OpenAI plans, live media providers.
    pub fn build(config: AppConfig, mongo: Arc<Client>, analytics_pool: SqlitePool) -> Self {
        let trips = Arc::new(MongoTripRepository::new(mongo, &config.mongodb_db_name));
        let llm = Arc::new(OpenAiClient::new(&config.llm));
        let media = MediaCascade::from_config(&config.media);
        let analytics = AnalyticsService::new(analytics_pool);

        Self::new(config, trips, llm, media, analytics)
    }
}
