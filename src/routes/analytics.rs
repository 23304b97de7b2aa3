use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{error, warn};
use serde_json::json;

use super::{detail, user_agent};
use crate::models::analytics::{EventRecord, EventTrack, PageView, PageViewRecord};
use crate::services::analytics_service::encode_event_data;
use crate::state::AppState;

const COUNTRY_HEADER: &str = "cf-ipcountry";

fn client_ip(req: &HttpRequest) -> Option<String> {
    let info = req.connection_info();
    let ip = info.realip_remote_addr().map(|addr| addr.to_string());
    ip
}

fn client_country(req: &HttpRequest) -> String {
    req.headers()
        .get(COUNTRY_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or("Unknown")
        .to_string()
}

/*
    POST /analytics/track
*/
pub async fn track_page_view(
    req: HttpRequest,
    state: web::Data<AppState>,
    input: web::Json<PageView>,
) -> impl Responder {
    let view = input.into_inner();
    let record = PageViewRecord {
        url: view.url,
        referrer: view.referrer,
        user_agent: user_agent(&req),
        ip_address: client_ip(&req),
        country: client_country(&req),
    };

    if let Err(err) = state.analytics.log_page_view(record).await {
        error!("Failed to log page view: {}", err);
    }

    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/*
    POST /analytics/event
*/
pub async fn track_event(
    req: HttpRequest,
    state: web::Data<AppState>,
    input: web::Json<EventTrack>,
) -> impl Responder {
    let event = input.into_inner();
    let event_data = encode_event_data(event.event_data.as_ref()).unwrap_or_else(|err| {
        warn!("Dropping event data for '{}': {}", event.event_name, err);
        None
    });

    let record = EventRecord {
        event_name: event.event_name,
        event_data,
        url: event.url,
        user_agent: user_agent(&req),
    };

    if let Err(err) = state.analytics.log_event(record).await {
        error!("Failed to log event: {}", err);
    }

    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/*
    GET /analytics/dashboard
*/
pub async fn dashboard(state: web::Data<AppState>) -> impl Responder {
    match state.analytics.dashboard_stats().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(err) => {
            error!("Failed to build dashboard: {}", err);
            HttpResponse::InternalServerError().json(detail(err))
        }
    }
}
