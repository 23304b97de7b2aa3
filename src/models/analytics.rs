use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PageView {
    pub url: String,
    #[serde(default)]
    pub referrer: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EventTrack {
    pub event_name: String,
    #[serde(default)]
    pub event_data: Option<serde_json::Map<String, serde_json::Value>>,
    pub url: String,
}

/// Page view enriched with what the server knows about the client.
#[derive(Debug, Clone)]
pub struct PageViewRecord {
    pub url: String,
    pub referrer: Option<String>,
    pub user_agent: String,
    pub ip_address: Option<String>,
    pub country: String,
}

#[derive(Debug, Clone)]
pub struct EventRecord {
    pub event_name: String,
    pub event_data: Option<String>,
    pub url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct SearchRecord {
    pub query: String,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub user_agent: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NamedCount {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NamedValue {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HourlyTraffic {
    pub hour: String,
    pub visits: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_searches: i64,
    pub active_users: i64,
    pub top_keywords: Vec<NamedCount>,
    pub device_stats: Vec<NamedValue>,
    pub os_stats: Vec<NamedValue>,
    pub traffic_data: Vec<HourlyTraffic>,
    pub top_events: Vec<NamedCount>,
}
