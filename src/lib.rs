// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod form;
pub mod fuzzy;
pub mod logging;
pub mod persistence;
pub mod report;
pub mod request;

pub use crate::core::engine::RentEngine;
pub use crate::error::{ArtifactError, InferenceError, InputError, PredictError, ReportError};
