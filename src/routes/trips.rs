use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::json;

use super::detail;
use crate::models::trip::{
    NewSearchHistory, NewTrip, SaveTripRequest, SaveTripResponse, UpdateTripRequest,
};
use crate::state::AppState;

const DEFAULT_TRIP_LIMIT: i64 = 50;
const DEFAULT_HISTORY_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListTripsQuery {
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

fn check_limit(limit: i64) -> Result<i64, HttpResponse> {
    if (1..=MAX_LIMIT).contains(&limit) {
        Ok(limit)
    } else {
        Err(HttpResponse::BadRequest().json(detail(format!(
            "limit must be between 1 and {}",
            MAX_LIMIT
        ))))
    }
}

/*
    POST /trips
*/
pub async fn create_trip(
    state: web::Data<AppState>,
    input: web::Json<SaveTripRequest>,
) -> impl Responder {
    let request = input.into_inner();
    let destination = request.trip_plan.destination.clone();

    let trip = NewTrip {
        destination: destination.clone(),
        origin: request.origin.clone(),
        days: request.days,
        trip_plan: request.trip_plan,
    };

    let trip_id = match state.trips.save_trip(trip).await {
        Ok(id) => id,
        Err(err) => {
            error!("Failed to save trip: {}", err);
            return HttpResponse::InternalServerError().json(detail(err));
        }
    };

    let history = NewSearchHistory {
        query: destination,
        origin: Some(request.origin),
        days: Some(request.days),
    };
    if let Err(err) = state.trips.save_search_history(history).await {
        warn!("Trip {} saved but search history was not: {}", trip_id, err);
    }

    info!("Saved trip {}", trip_id);
    HttpResponse::Ok().json(SaveTripResponse {
        trip_id,
        message: "Trip saved successfully".to_string(),
    })
}

/*
    GET /trips?limit=&skip=
*/
pub async fn list_trips(
    state: web::Data<AppState>,
    query: web::Query<ListTripsQuery>,
) -> impl Responder {
    let limit = match check_limit(query.limit.unwrap_or(DEFAULT_TRIP_LIMIT)) {
        Ok(limit) => limit,
        Err(response) => return response,
    };
    let skip = match u64::try_from(query.skip.unwrap_or(0)) {
        Ok(skip) => skip,
        Err(_) => return HttpResponse::BadRequest().json(detail("skip must not be negative")),
    };

    let trips = match state.trips.list_trips(limit, skip).await {
        Ok(trips) => trips,
        Err(err) => {
            error!("Failed to list trips: {}", err);
            return HttpResponse::InternalServerError().json(detail(err));
        }
    };

    match state.trips.count_trips().await {
        Ok(total) => HttpResponse::Ok().json(json!({
            "trips": trips,
            "total": total,
            "limit": limit,
            "skip": skip,
        })),
        Err(err) => {
            error!("Failed to count trips: {}", err);
            HttpResponse::InternalServerError().json(detail(err))
        }
    }
}

/*
    GET /trips/{id}
*/
pub async fn get_by_id(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    match state.trips.get_trip(&path.into_inner()).await {
        Ok(Some(trip)) => HttpResponse::Ok().json(trip),
        Ok(None) => HttpResponse::NotFound().json(detail("Trip not found")),
        Err(err) => {
            error!("Failed to retrieve trip: {}", err);
            HttpResponse::InternalServerError().json(detail(err))
        }
    }
}

/*
    PUT /trips/{id}
*/
pub async fn update_trip(
    path: web::Path<String>,
    state: web::Data<AppState>,
    input: web::Json<UpdateTripRequest>,
) -> impl Responder {
    match state
        .trips
        .update_trip(&path.into_inner(), input.into_inner())
        .await
    {
        Ok(true) => HttpResponse::Ok().json(json!({ "message": "Trip updated successfully" })),
        Ok(false) => HttpResponse::NotFound().json(detail("Trip not found")),
        Err(err) => {
            error!("Failed to update trip: {}", err);
            HttpResponse::InternalServerError().json(detail(err))
        }
    }
}

/*
    DELETE /trips/{id}
*/
pub async fn delete_trip(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    match state.trips.delete_trip(&path.into_inner()).await {
        Ok(true) => HttpResponse::Ok().json(json!({ "message": "Trip deleted successfully" })),
        Ok(false) => HttpResponse::NotFound().json(detail("Trip not found")),
        Err(err) => {
            error!("Failed to delete trip: {}", err);
            HttpResponse::InternalServerError().json(detail(err))
        }
    }
}

/*
    GET /search-history?limit=
*/
pub async fn search_history(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    let limit = match check_limit(query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT)) {
        Ok(limit) => limit,
        Err(response) => return response,
    };

    match state.trips.search_history(limit).await {
        Ok(history) => HttpResponse::Ok().json(json!({ "history": history })),
        Err(err) => {
            error!("Failed to fetch search history: {}", err);
            HttpResponse::InternalServerError().json(detail(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_bounds() {
        assert_eq!(check_limit(1).ok(), Some(1));
        assert_eq!(check_limit(MAX_LIMIT).ok(), Some(MAX_LIMIT));
        assert!(check_limit(0).is_err());
        assert!(check_limit(MAX_LIMIT + 1).is_err());
    }
}
