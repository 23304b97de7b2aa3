use log::warn;
use sqlx::{Row, SqlitePool};
use std::fmt;

use crate::models::analytics::{
    DashboardStats, EventRecord, HourlyTraffic, NamedCount, NamedValue, PageViewRecord,
    SearchRecord,
};

#[derive(Debug)]
pub enum AnalyticsError {
    Database(sqlx::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for AnalyticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyticsError::Database(err) => write!(f, "Analytics database error: {}", err),
            AnalyticsError::Serialization(err) => write!(f, "Analytics serialization error: {}", err),
        }
    }
}

impl std::error::Error for AnalyticsError {}

impl From<sqlx::Error> for AnalyticsError {
    fn from(err: sqlx::Error) -> Self {
        AnalyticsError::Database(err)
    }
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        AnalyticsError::Serialization(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Mobile,
    Desktop,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "Mobile",
            DeviceType::Desktop => "Desktop",
        }
    }
}

/// Rough device and OS split from a user agent string. The checks run in a
/// fixed order, so an Android phone reports "Linux" and an iPhone "MacOS".
pub fn classify_user_agent(user_agent: &str) -> (DeviceType, &'static str) {
    let device = if ["Mobile", "Android", "iPhone"]
        .iter()
        .any(|marker| user_agent.contains(marker))
    {
        DeviceType::Mobile
    } else {
        DeviceType::Desktop
    };

    let os = if user_agent.contains("Windows") {
        "Windows"
    } else if user_agent.contains("Mac") {
        "MacOS"
    } else if user_agent.contains("Linux") {
        "Linux"
    } else if user_agent.contains("Android") {
        "Android"
    } else if user_agent.contains("iOS") || user_agent.contains("iPhone") {
        "iOS"
    } else {
        "Unknown"
    };

    (device, os)
}

#[derive(Clone)]
pub struct AnalyticsService {
    pool: SqlitePool,
}

impl AnalyticsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn log_page_view(&self, view: PageViewRecord) -> Result<(), AnalyticsError> {
        let (device, os) = classify_user_agent(&view.user_agent);

        sqlx::query(
            "INSERT INTO page_views (url, referrer, user_agent, ip_address, country, device_type, os)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&view.url)
        .bind(&view.referrer)
        .bind(&view.user_agent)
        .bind(&view.ip_address)
        .bind(&view.country)
        .bind(device.as_str())
        .bind(os)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn log_search(&self, search: SearchRecord) -> Result<(), AnalyticsError> {
        sqlx::query(
            "INSERT INTO searches (query, origin, destination, user_agent) VALUES (?, ?, ?, ?)",
        )
        .bind(&search.query)
        .bind(&search.origin)
        .bind(&search.destination)
        .bind(&search.user_agent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn log_event(&self, event: EventRecord) -> Result<(), AnalyticsError> {
        sqlx::query("INSERT INTO events (event_name, event_data, url, user_agent) VALUES (?, ?, ?, ?)")
            .bind(&event.event_name)
            .bind(&event.event_data)
            .bind(&event.url)
            .bind(&event.user_agent)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, AnalyticsError> {
        let total_searches: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM searches")
            .fetch_one(&self.pool)
            .await?;

        let active_users: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT ip_address) FROM page_views
             WHERE timestamp >= datetime('now', '-30 minutes')",
        )
        .fetch_one(&self.pool)
        .await?;

        let top_keywords = sqlx::query(
            "SELECT destination, COUNT(*) AS count FROM searches
             WHERE destination IS NOT NULL
             GROUP BY destination ORDER BY count DESC LIMIT 5",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|row| NamedCount {
            name: row.get("destination"),
            count: row.get("count"),
        })
        .collect();

        let device_stats = self.breakdown("device_type").await?;
        let os_stats = self.breakdown("os").await?;

        let traffic_data = sqlx::query(
            "SELECT strftime('%H', timestamp) AS hour, COUNT(*) AS count FROM page_views
             WHERE timestamp >= datetime('now', '-1 day')
             GROUP BY hour ORDER BY hour",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|row| HourlyTraffic {
            hour: row.get("hour"),
            visits: row.get("count"),
        })
        .collect();

        let top_events = match self.top_events().await {
            Ok(events) => events,
            Err(err) => {
                warn!("Error fetching top events: {}", err);
                Vec::new()
            }
        };

        Ok(DashboardStats {
            total_searches,
            active_users,
            top_keywords,
            device_stats,
            os_stats,
            traffic_data,
            top_events,
        })
    }

    // `column` is one of our own column names, never user input.
    async fn breakdown(&self, column: &'static str) -> Result<Vec<NamedValue>, AnalyticsError> {
        let sql = format!(
            "SELECT COALESCE({column}, 'Unknown') AS name, COUNT(*) AS count
             FROM page_views GROUP BY name ORDER BY count DESC"
        );

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| NamedValue {
                name: row.get("name"),
                value: row.get("count"),
            })
            .collect())
    }

    async fn top_events(&self) -> Result<Vec<NamedCount>, AnalyticsError> {
        let rows = sqlx::query(
            "SELECT event_name, COUNT(*) AS count FROM events
             GROUP BY event_name ORDER BY count DESC LIMIT 5",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| NamedCount {
                name: row.get("event_name"),
                count: row.get("count"),
            })
            .collect())
    }

    pub async fn ping(&self) -> Result<(), AnalyticsError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Event payloads are stored as JSON text.
pub fn encode_event_data(
    data: Option<&serde_json::Map<String, serde_json::Value>>,
) -> Result<Option<String>, AnalyticsError> {
    match data {
        Some(data) if !data.is_empty() => Ok(Some(serde_json::to_string(data)?)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::create_analytics_pool;
    use serde_json::json;

    const IPHONE: &str =
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";
    const WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
    const ANDROID: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Mobile Safari/537.36";

    async fn service() -> AnalyticsService {
        let pool = create_analytics_pool("sqlite::memory:").await.unwrap();
        AnalyticsService::new(pool)
    }

    fn page_view(ip: &str, user_agent: &str) -> PageViewRecord {
        PageViewRecord {
            url: "https://weekendtravellers.com/".to_string(),
            referrer: None,
            user_agent: user_agent.to_string(),
            ip_address: Some(ip.to_string()),
            country: "Unknown".to_string(),
        }
    }

    #[test]
    fn test_classifies_user_agents() {
        assert_eq!(classify_user_agent(WINDOWS), (DeviceType::Desktop, "Windows"));
        assert_eq!(classify_user_agent(IPHONE), (DeviceType::Mobile, "MacOS"));
        assert_eq!(classify_user_agent(ANDROID), (DeviceType::Mobile, "Linux"));
        assert_eq!(classify_user_agent("curl/8.0"), (DeviceType::Desktop, "Unknown"));
    }

    #[test]
    fn test_event_data_encoding() {
        let data = json!({"destination": "Goa"});
        let encoded = encode_event_data(data.as_object()).unwrap();
        assert_eq!(encoded.as_deref(), Some(r#"{"destination":"Goa"}"#));

        assert_eq!(encode_event_data(None).unwrap(), None);
    }

    #[actix_rt::test]
    async fn test_empty_dashboard() {
        let analytics = service().await;

        let stats = analytics.dashboard_stats().await.unwrap();

        assert_eq!(stats.total_searches, 0);
        assert_eq!(stats.active_users, 0);
        assert!(stats.top_keywords.is_empty());
        assert!(stats.top_events.is_empty());
    }

    #[actix_rt::test]
    async fn test_dashboard_aggregates_logged_activity() {
        let analytics = service().await;

        analytics.log_page_view(page_view("10.0.0.1", WINDOWS)).await.unwrap();
        analytics.log_page_view(page_view("10.0.0.1", WINDOWS)).await.unwrap();
        analytics.log_page_view(page_view("10.0.0.2", IPHONE)).await.unwrap();

        for destination in ["Goa", "Goa", "Manali"] {
            analytics
                .log_search(SearchRecord {
                    query: format!("trip to {}", destination),
                    origin: Some("Delhi".to_string()),
                    destination: Some(destination.to_string()),
                    user_agent: WINDOWS.to_string(),
                })
                .await
                .unwrap();
        }

        analytics
            .log_event(EventRecord {
                event_name: "share_trip".to_string(),
                event_data: None,
                url: "https://weekendtravellers.com/trip".to_string(),
                user_agent: IPHONE.to_string(),
            })
            .await
            .unwrap();

        let stats = analytics.dashboard_stats().await.unwrap();

        assert_eq!(stats.total_searches, 3);
        assert_eq!(stats.active_users, 2);
        assert_eq!(
            stats.top_keywords[0],
            NamedCount {
                name: "Goa".to_string(),
                count: 2
            }
        );
        assert!(stats.device_stats.contains(&NamedValue {
            name: "Desktop".to_string(),
            value: 2
        }));
        assert!(stats.os_stats.contains(&NamedValue {
            name: "MacOS".to_string(),
            value: 1
        }));
        assert_eq!(stats.traffic_data.iter().map(|t| t.visits).sum::<i64>(), 3);
        assert_eq!(stats.top_events[0].name, "share_trip");
    }
}
