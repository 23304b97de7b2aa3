use actix_web::{web, HttpRequest};
use serde_json::json;

pub mod analytics;
pub mod health;
pub mod media;
pub mod recommendations;
pub mod search;
pub mod trips;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health_check))
        .route("/search", web::post().to(search::search))
        .route("/trips", web::post().to(trips::create_trip))
        .route("/trips", web::get().to(trips::list_trips))
        .route("/trips/{id}", web::get().to(trips::get_by_id))
        .route("/trips/{id}", web::put().to(trips::update_trip))
        .route("/trips/{id}", web::delete().to(trips::delete_trip))
        .route("/search-history", web::get().to(trips::search_history))
        .route(
            "/recommendations",
            web::get().to(recommendations::get_recommendations),
        )
        .route(
            "/background-videos",
            web::get().to(media::background_videos),
        )
        .service(
            web::scope("/analytics")
                .route("/track", web::post().to(analytics::track_page_view))
                .route("/event", web::post().to(analytics::track_event))
                .route("/dashboard", web::get().to(analytics::dashboard)),
        );
}

pub(crate) fn user_agent(req: &HttpRequest) -> String {
    req.headers()
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("Unknown")
        .to_string()
}

pub(crate) fn detail(message: impl std::fmt::Display) -> serde_json::Value {
    json!({ "detail": message.to_string() })
}
