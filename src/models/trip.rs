use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, JsonSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema)]
pub struct Sightseeing {
    pub time: String,
    pub activity: String,
    pub description: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub media_credit: Option<String>,
    #[serde(default)]
    pub nearby_attractions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema)]
pub struct DayPlan {
    pub day: u32,
    pub activities: Vec<Sightseeing>,
}

#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema)]
pub struct RouteInfo {
    pub distance: String,
    pub duration: String,
    #[serde(default)]
    pub map_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema)]
pub struct Hotel {
    pub name: String,
    pub description: String,
    pub price_range: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema)]
pub struct Attraction {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

/// Narrative about a city: used for both the destination and the origin.
#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema)]
pub struct PlaceInfo {
    pub city_name: String,
    pub description: String,
    #[serde(default)]
    pub top_attractions: Option<Vec<Attraction>>,
    #[serde(default)]
    pub hotels: Option<Vec<Hotel>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub media_credit: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema)]
pub struct TripPlan {
    pub destination: String,
    pub best_time_to_visit: String,
    pub estimated_budget: String,
    pub route_info: RouteInfo,
    pub itinerary: Vec<DayPlan>,
    #[serde(default)]
    pub hotels: Option<Vec<Hotel>>,
    #[serde(default)]
    pub destination_info: Option<PlaceInfo>,
    #[serde(default)]
    pub origin_info: Option<PlaceInfo>,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub hero_video: Option<String>,
    /// Attribution for `hero_image`.
    #[serde(default)]
    pub media_credit: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub origin_coordinates: Option<Coordinates>,
}

impl TripPlan {
    pub fn activities_mut(&mut self) -> impl Iterator<Item = &mut Sightseeing> {
        self.itinerary
            .iter_mut()
            .flat_map(|day| day.activities.iter_mut())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SaveTripRequest {
    pub trip_plan: TripPlan,
    pub origin: String,
    pub days: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SaveTripResponse {
    pub trip_id: String,
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct UpdateTripRequest {
    pub trip_plan: Option<TripPlan>,
    pub origin: Option<String>,
    pub days: Option<u32>,
}

/// A trip ready to be written; timestamps are assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub destination: String,
    pub origin: String,
    pub days: u32,
    pub trip_plan: TripPlan,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub destination: String,
    pub origin: String,
    pub days: u32,
    pub trip_plan: TripPlan,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSearchHistory {
    pub query: String,
    pub origin: Option<String>,
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchHistoryRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub query: String,
    pub origin: Option<String>,
    pub days: Option<u32>,
    pub timestamp: DateTime<Utc>,
}
