use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::warn;

use super::{detail, user_agent};
use crate::models::analytics::SearchRecord;
use crate::models::search::SearchRequest;
use crate::state::AppState;

/*
    /search
*/
pub async fn search(
    req: HttpRequest,
    state: web::Data<AppState>,
    input: web::Json<SearchRequest>,
) -> impl Responder {
    let request = input.into_inner();

    match state.generator.generate(&request).await {
        Ok(plan) => {
            let record = SearchRecord {
                query: request.query.clone(),
                origin: request.origin.clone(),
                destination: Some(plan.destination.clone()),
                user_agent: user_agent(&req),
            };
            let analytics = state.analytics.clone();
            actix_web::rt::spawn(async move {
                if let Err(err) = analytics.log_search(record).await {
                    warn!("Failed to record search: {}", err);
                }
            });

            HttpResponse::Ok().json(plan)
        }
        Err(err) => HttpResponse::InternalServerError().json(detail(err)),
    }
}
