//! Core types shared by every stage of the pipeline.

pub mod error;

pub use error::{ErrorContext, GoResourcesError, user_friendly_error};
