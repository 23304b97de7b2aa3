pub mod analytics_service;
pub mod llm;
pub mod media;
pub mod trip_generation_service;
pub mod trip_service;
