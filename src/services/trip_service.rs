use async_trait::async_trait;
use futures::TryStreamExt;
use log::debug;
use mongodb::{
    bson::{self, doc, oid::ObjectId, DateTime, Document},
    Client, Collection,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::models::trip::{
    NewSearchHistory, NewTrip, SearchHistoryRecord, TripPlan, TripRecord, UpdateTripRequest,
};

const TRIPS_COLLECTION: &str = "trips";
const SEARCH_HISTORY_COLLECTION: &str = "search_history";

#[derive(Debug)]
pub enum StoreError {
    Database(String),
    Serialization(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(err) => write!(f, "Database error: {}", err),
            StoreError::Serialization(err) => write!(f, "Serialization error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Saved trips and the search history. Ids are opaque strings; an id the
/// store cannot parse behaves like one that does not exist.
#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn save_trip(&self, trip: NewTrip) -> Result<String, StoreError>;

    async fn get_trip(&self, id: &str) -> Result<Option<TripRecord>, StoreError>;

    /// Newest first.
    async fn list_trips(&self, limit: i64, skip: u64) -> Result<Vec<TripRecord>, StoreError>;

    async fn count_trips(&self) -> Result<u64, StoreError>;

    /// Returns `false` when no trip has this id.
    async fn update_trip(&self, id: &str, update: UpdateTripRequest) -> Result<bool, StoreError>;

    async fn delete_trip(&self, id: &str) -> Result<bool, StoreError>;

    async fn save_search_history(&self, entry: NewSearchHistory) -> Result<String, StoreError>;

    /// Newest first.
    async fn search_history(&self, limit: i64) -> Result<Vec<SearchHistoryRecord>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct TripDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    destination: String,
    origin: String,
    days: u32,
    trip_plan: TripPlan,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<TripDocument> for TripRecord {
    fn from(document: TripDocument) -> Self {
        TripRecord {
            id: document.id.map(|id| id.to_hex()).unwrap_or_default(),
            destination: document.destination,
            origin: document.origin,
            days: document.days,
            trip_plan: document.trip_plan,
            created_at: document.created_at.to_chrono(),
            updated_at: document.updated_at.to_chrono(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SearchHistoryDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    query: String,
    origin: Option<String>,
    days: Option<u32>,
    timestamp: DateTime,
}

impl From<SearchHistoryDocument> for SearchHistoryRecord {
    fn from(document: SearchHistoryDocument) -> Self {
        SearchHistoryRecord {
            id: document.id.map(|id| id.to_hex()).unwrap_or_default(),
            query: document.query,
            origin: document.origin,
            days: document.days,
            timestamp: document.timestamp.to_chrono(),
        }
    }
}

fn inserted_id_string(id: &bson::Bson) -> String {
    id.as_object_id()
        .map(|id| id.to_hex())
        .unwrap_or_else(|| id.to_string())
}

#[derive(Clone)]
pub struct MongoTripRepository {
    client: Arc<Client>,
    db_name: String,
    trips: Collection<TripDocument>,
    history: Collection<SearchHistoryDocument>,
}

impl MongoTripRepository {
    pub fn new(client: Arc<Client>, db_name: &str) -> Self {
        let database = client.database(db_name);
        Self {
            trips: database.collection(TRIPS_COLLECTION),
            history: database.collection(SEARCH_HISTORY_COLLECTION),
            db_name: db_name.to_string(),
            client,
        }
    }
}

#[async_trait]
impl TripRepository for MongoTripRepository {
    async fn save_trip(&self, trip: NewTrip) -> Result<String, StoreError> {
        let now = DateTime::now();
        let document = TripDocument {
            id: None,
            destination: trip.destination,
            origin: trip.origin,
            days: trip.days,
            trip_plan: trip.trip_plan,
            created_at: now,
            updated_at: now,
        };

        let result = self.trips.insert_one(&document).await?;
        Ok(inserted_id_string(&result.inserted_id))
    }

    async fn get_trip(&self, id: &str) -> Result<Option<TripRecord>, StoreError> {
        let id = match ObjectId::parse_str(id) {
            Ok(id) => id,
            Err(_) => {
                debug!("Ignoring lookup for malformed trip id '{}'", id);
                return Ok(None);
            }
        };

        let document = self.trips.find_one(doc! { "_id": id }).await?;
        Ok(document.map(TripRecord::from))
    }

    async fn list_trips(&self, limit: i64, skip: u64) -> Result<Vec<TripRecord>, StoreError> {
        let cursor = self
            .trips
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .skip(skip)
            .limit(limit)
            .await?;

        let documents: Vec<TripDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(TripRecord::from).collect())
    }

    async fn count_trips(&self) -> Result<u64, StoreError> {
        Ok(self.trips.count_documents(doc! {}).await?)
    }

    async fn update_trip(&self, id: &str, update: UpdateTripRequest) -> Result<bool, StoreError> {
        let id = match ObjectId::parse_str(id) {
            Ok(id) => id,
            Err(_) => return Ok(false),
        };

        let mut set = Document::new();
        if let Some(trip_plan) = update.trip_plan {
            set.insert("destination", trip_plan.destination.clone());
            set.insert("trip_plan", bson::to_bson(&trip_plan)?);
        }
        if let Some(origin) = update.origin {
            set.insert("origin", origin);
        }
        if let Some(days) = update.days {
            set.insert("days", i64::from(days));
        }
        set.insert("updated_at", DateTime::now());

        let result = self
            .trips
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_trip(&self, id: &str) -> Result<bool, StoreError> {
        let id = match ObjectId::parse_str(id) {
            Ok(id) => id,
            Err(_) => return Ok(false),
        };

        let result = self.trips.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn save_search_history(&self, entry: NewSearchHistory) -> Result<String, StoreError> {
        let document = SearchHistoryDocument {
            id: None,
            query: entry.query,
            origin: entry.origin,
            days: entry.days,
            timestamp: DateTime::now(),
        };

        let result = self.history.insert_one(&document).await?;
        Ok(inserted_id_string(&result.inserted_id))
    }

    async fn search_history(&self, limit: i64) -> Result<Vec<SearchHistoryRecord>, StoreError> {
        let cursor = self
            .history
            .find(doc! {})
            .sort(doc! { "timestamp": -1 })
            .limit(limit)
            .await?;

        let documents: Vec<SearchHistoryDocument> = cursor.try_collect().await?;
        Ok(documents
            .into_iter()
            .map(SearchHistoryRecord::from)
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database(&self.db_name)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
