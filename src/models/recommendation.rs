use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema)]
pub struct Recommendation {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub media_credit: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, JsonSchema)]
pub struct RecommendationResponse {
    pub destinations: Vec<Recommendation>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct RecommendationQuery {
    pub lat: f64,
    pub lng: f64,
}
