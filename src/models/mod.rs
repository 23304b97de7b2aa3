pub mod analytics;
pub mod media;
pub mod recommendation;
pub mod search;
pub mod trip;
