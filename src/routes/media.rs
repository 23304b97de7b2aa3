use actix_web::{web, HttpResponse, Responder};

use crate::state::AppState;

pub const BACKGROUND_VIDEO_QUERY: &str = "Travel wanderlust nature cinematic";
pub const BACKGROUND_VIDEO_COUNT: u32 = 40;

/*
    GET /background-videos
*/
pub async fn background_videos(state: web::Data<AppState>) -> impl Responder {
    let videos = state
        .media
        .resolve_videos(BACKGROUND_VIDEO_QUERY, BACKGROUND_VIDEO_COUNT)
        .await;
    HttpResponse::Ok().json(videos)
}
