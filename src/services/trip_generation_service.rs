use log::{error, info, warn};
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::models::media::MediaAsset;
use crate::models::recommendation::RecommendationResponse;
use crate::models::search::SearchRequest;
use crate::models::trip::TripPlan;
use crate::services::llm::{complete_as, GenerationError, StructuredCompletion};
use crate::services::media::{credit_line, MediaCascade, DEFAULT_MEDIA_COUNT};

pub const ACTIVITY_FALLBACK_IMAGE: &str =
    "https://images.pexels.com/photos/2387873/pexels-photo-2387873.jpeg?auto=compress&cs=tinysrgb&w=400";
pub const HERO_FALLBACK_IMAGE: &str =
    "https://images.pexels.com/photos/346885/pexels-photo-346885.jpeg";

// A cleaned activity name must be longer than this to be searched on its own.
const MIN_STANDALONE_QUERY_LEN: usize = 5;

const TRIP_SYSTEM_PROMPT: &str = "You are a travel assistant. Generate a structured trip plan.";
const RECOMMENDATION_SYSTEM_PROMPT: &str = "You are a local travel expert.";

static ACTIVITY_VERB_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:Visit|Explore|Tour|See|Walk around)\b\s*)+")
        .expect("activity prefix pattern is valid")
});

#[derive(Debug)]
pub enum EnrichmentError {
    NoResults { query: String },
}

impl fmt::Display for EnrichmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrichmentError::NoResults { query } => write!(f, "No media found for '{}'", query),
        }
    }
}

impl std::error::Error for EnrichmentError {}

/// Strips leading verbs such as "Visit" or "Walk around" so the search hits
/// the place itself.
pub fn clean_activity_name(activity: &str) -> String {
    ACTIVITY_VERB_PREFIX
        .replace(activity.trim(), "")
        .trim()
        .to_string()
}

pub fn activity_query(destination: &str, cleaned_activity: &str) -> String {
    format!("{} {}", destination.trim(), cleaned_activity)
        .trim()
        .to_string()
}

fn first_asset(assets: Vec<MediaAsset>, query: &str) -> Result<MediaAsset, EnrichmentError> {
    assets
        .into_iter()
        .next()
        .ok_or_else(|| EnrichmentError::NoResults {
            query: query.to_string(),
        })
}

fn build_trip_prompt(request: &SearchRequest) -> String {
    let origin = request.origin.as_deref().unwrap_or("Delhi");
    let days = request.days.unwrap_or(2);
    let budget = request.budget.as_deref().unwrap_or("Moderate");
    let travel_mode = request.travel_mode.as_deref().unwrap_or("flight");
    let destination_hint = request
        .destination
        .as_deref()
        .map(|destination| format!("- Preferred destination: {}\n", destination))
        .unwrap_or_default();

    format!(
        r#"You are an expert travel planner. The traveller wrote:
"{query}"

Work out what they want: a named destination, a mood such as "romantic" or "adventure", or a region.
- Origin: {origin} (use this unless the request names another)
- Days: {days} (use this unless the request names another)
{destination_hint}
If the request names a destination, plan for it. If it is vague, pick the best matching destination near the origin.

Budget: {budget}
Travel mode: {travel_mode}

Return a realistic day-by-day itinerary with specific activities and timings, the best time to visit, an estimated budget and route information.

Requirements:
1. Every sightseeing activity has a description of at least 400 characters with historical, cultural and practical context.
2. Every activity lists 2-3 nearby_attractions within walking distance.
3. hotels lists 3-4 hotels at the destination with name, description, price_range (Budget/Mid-Range/Luxury) and coordinates.
4. destination_info describes the destination city in at least 400 characters and lists 3-4 top_attractions with descriptions and coordinates.
5. Give lat/lng coordinates for the destination, the origin (origin_coordinates), every activity, every hotel and every attraction.
6. Leave image_url, media_credit, hero_image and hero_video empty."#,
        query = request.query,
    )
}

fn build_recommendation_prompt(lat: f64, lng: f64) -> String {
    format!(
        r#"The user is at GPS coordinates {lat}, {lng}.
Suggest 5 weekend getaway destinations nearby (within a 300km drive or a short flight).
For each one give the name and a punchy description of at most 4 words, such as "Misty Hills & Tea".
Leave image_url and media_credit empty."#
    )
}

pub struct TripGenerationService {
    llm: Arc<dyn StructuredCompletion>,
    media: Arc<MediaCascade>,
    region: String,
}

impl TripGenerationService {
    pub fn new(
        llm: Arc<dyn StructuredCompletion>,
        media: Arc<MediaCascade>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            media,
            region: region.into(),
        }
    }

    /// Asks the LLM for a plan and decorates it with photos and videos.
    ///
    /// Only the LLM step can fail. Media lookups that come back empty are
    /// logged and replaced with fallbacks.
    pub async fn generate(&self, request: &SearchRequest) -> Result<TripPlan, GenerationError> {
        info!("Generating plan for '{}'", request.query);

        let prompt = build_trip_prompt(request);
        let mut plan: TripPlan = complete_as(self.llm.as_ref(), TRIP_SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|err| {
                error!("Trip generation failed: {}", err);
                err
            })?;

        self.enrich(&mut plan).await;
        Ok(plan)
    }

    pub async fn enrich(&self, plan: &mut TripPlan) {
        let destination = plan.destination.clone();

        match self.hero_image(&destination).await {
            Ok(image) => {
                plan.media_credit = Some(credit_line(&image));
                plan.hero_image = Some(image.url);
            }
            Err(err) => {
                warn!("Hero image lookup failed: {}", err);
                plan.hero_image = Some(HERO_FALLBACK_IMAGE.to_string());
            }
        }

        match self.hero_video(&destination).await {
            Ok(video) => plan.hero_video = Some(video.url),
            Err(err) => warn!("Hero video lookup failed: {}", err),
        }

        for activity in plan.activities_mut() {
            match self.activity_image(&destination, &activity.activity).await {
                Ok(image) => {
                    activity.image_url = Some(image.url);
                    activity.media_credit = Some(format!("Photo by {}", image.credit));
                }
                Err(err) => {
                    warn!(
                        "Failed to fetch image for activity '{}': {}",
                        activity.activity, err
                    );
                }
            }

            if activity.image_url.as_deref().map_or(true, str::is_empty) {
                activity.image_url = Some(ACTIVITY_FALLBACK_IMAGE.to_string());
            }
        }

        if let Some(info) = plan.destination_info.as_mut() {
            match self.destination_info_image(&destination).await {
                Ok(image) => {
                    info.image_url = Some(image.url);
                    info.media_credit = Some(format!("Photo by {}", image.credit));
                }
                Err(err) => warn!("Failed to fetch image for destination info: {}", err),
            }
        }
    }

    async fn hero_image(&self, destination: &str) -> Result<MediaAsset, EnrichmentError> {
        let images = self
            .media
            .resolve_images(destination, DEFAULT_MEDIA_COUNT)
            .await;
        first_asset(images, destination)
    }

    async fn hero_video(&self, destination: &str) -> Result<MediaAsset, EnrichmentError> {
        let videos = self
            .media
            .resolve_videos(destination, DEFAULT_MEDIA_COUNT)
            .await;
        first_asset(videos, destination)
    }

    /// "{destination} {activity}" first, then the activity alone when its
    /// name is specific enough.
    pub async fn activity_image(
        &self,
        destination: &str,
        activity: &str,
    ) -> Result<MediaAsset, EnrichmentError> {
        let cleaned = clean_activity_name(activity);
        let query = activity_query(destination, &cleaned);

        let images = self.media.search_images(&query, DEFAULT_MEDIA_COUNT).await;
        if !images.is_empty() {
            return first_asset(images, &query);
        }

        if cleaned.chars().count() <= MIN_STANDALONE_QUERY_LEN {
            return Err(EnrichmentError::NoResults { query });
        }

        let images = self
            .media
            .search_images(&cleaned, DEFAULT_MEDIA_COUNT)
            .await;
        first_asset(images, &cleaned)
    }

    async fn destination_info_image(
        &self,
        destination: &str,
    ) -> Result<MediaAsset, EnrichmentError> {
        let query = format!("{} {} travel landmarks", destination, self.region);
        let images = self.media.resolve_images(&query, 1).await;
        first_asset(images, &query)
    }

    /// Nearby getaway ideas. Any LLM failure yields an empty list.
    pub async fn recommendations(&self, lat: f64, lng: f64) -> RecommendationResponse {
        let prompt = build_recommendation_prompt(lat, lng);
        let mut response: RecommendationResponse =
            match complete_as(self.llm.as_ref(), RECOMMENDATION_SYSTEM_PROMPT, &prompt).await {
                Ok(response) => response,
                Err(err) => {
                    error!("Error getting recommendations: {}", err);
                    return RecommendationResponse::default();
                }
            };

        for destination in response.destinations.iter_mut() {
            let query = format!("{} {} travel", destination.name, self.region);
            let images = self.media.resolve_images(&query, 1).await;
            match first_asset(images, &query) {
                Ok(image) => {
                    destination.image_url = Some(image.url);
                    destination.media_credit = Some(format!("Photo by {}", image.credit));
                }
                Err(err) => warn!("Failed to fetch image for {}: {}", destination.name, err),
            }
        }

        response
    }
}
