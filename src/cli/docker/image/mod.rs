//! Image management for the Jekyll container.
//!
//! Handles engine discovery, building the image from the project's
//! Dockerfile, and removing it again.

mod availability;
mod builder;
mod config;
mod manager;

pub use availability::check_engine_available;
pub use config::{CONTAINER_ENV, CONTAINER_NAME, CONTAINER_PORT, SITE_PATH};
pub use manager::{
    BuildOutcome, build_from_project, ensure_image_built, image_exists, remove_image,
};
