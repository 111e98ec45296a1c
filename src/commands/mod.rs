pub mod config;
pub mod courses;
pub mod render;
