use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    mode: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

impl ServiceStatus {
    fn ok(details: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            details: Some(details.into()),
        }
    }

    fn error(details: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            details: Some(details.into()),
        }
    }
}

/*
    /
*/
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the Weekend Traveller API"
    }))
}

/*
    /health
*/
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        mode: "actix-web".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let mongo_result = check_mongodb(&state).await;
    health
        .services
        .insert("mongodb".to_string(), mongo_result.clone());

    let analytics_result = check_analytics(&state).await;
    health
        .services
        .insert("analytics".to_string(), analytics_result.clone());

    let llm_result = check_llm(&state);
    health.services.insert("llm".to_string(), llm_result.clone());

    // Media always has the static fallback, so it never degrades the service.
    health
        .services
        .insert("media".to_string(), check_media(&state));

    if mongo_result.status != "ok" || analytics_result.status != "ok" || llm_result.status != "ok"
    {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

async fn check_mongodb(state: &AppState) -> ServiceStatus {
    match state.trips.ping().await {
        Ok(()) => ServiceStatus::ok("Connected successfully to MongoDB"),
        Err(e) => {
            log::error!("MongoDB health check failed: {}", e);
            ServiceStatus::error(format!("Failed to connect: {}", e))
        }
    }
}

async fn check_analytics(state: &AppState) -> ServiceStatus {
    match state.analytics.ping().await {
        Ok(()) => ServiceStatus::ok("Analytics database reachable"),
        Err(e) => {
            log::error!("Analytics health check failed: {}", e);
            ServiceStatus::error(format!("Failed to query: {}", e))
        }
    }
}

fn check_llm(state: &AppState) -> ServiceStatus {
    if state.config.llm.api_key.is_some() {
        ServiceStatus::ok(format!("OpenAI configured, model {}", state.config.llm.model))
    } else {
        ServiceStatus::error("OPENAI_API_KEY not configured")
    }
}

fn check_media(state: &AppState) -> ServiceStatus {
    let providers = state.config.media.configured_providers();
    if providers.is_empty() {
        return ServiceStatus::ok("No providers configured, serving static media");
    }

    let names: Vec<&str> = providers.iter().map(|source| source.as_str()).collect();
    ServiceStatus::ok(format!("Providers: {}", names.join(", ")))
}
