use actix_web::{web, HttpResponse, Responder};

use crate::models::recommendation::RecommendationQuery;
use crate::state::AppState;

/*
    GET /recommendations?lat=&lng=
*/
pub async fn get_recommendations(
    state: web::Data<AppState>,
    query: web::Query<RecommendationQuery>,
) -> impl Responder {
    let response = state.generator.recommendations(query.lat, query.lng).await;
    HttpResponse::Ok().json(response)
}
