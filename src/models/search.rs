use serde::{Deserialize, Serialize};

fn default_origin() -> Option<String> {
    Some("Delhi".to_string())
}

fn default_days() -> Option<u32> {
    Some(2)
}

fn default_travel_mode() -> Option<String> {
    Some("flight".to_string())
}

/// Free-text trip search submitted by the landing page.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_origin")]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default = "default_days")]
    pub days: Option<u32>,
    /// flight, drive or train
    #[serde(default = "default_travel_mode")]
    pub travel_mode: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            origin: default_origin(),
            destination: None,
            budget: None,
            days: default_days(),
            travel_mode: default_travel_mode(),
        }
    }
}
