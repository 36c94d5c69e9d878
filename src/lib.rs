pub mod annotations;
pub mod benchmark;
pub mod cache;
pub mod calibrate;
pub mod config;
pub mod database;
pub mod detector;
pub mod landmarks;
pub mod render;

// Re-export the types most callers touch
pub use cache::{load_or_detect, LandmarkCache};
pub use database::{process_database, ResultRecord};
pub use detector::{Detection, LandmarkDetector};
pub use landmarks::{Landmarks, Point, Rect};
