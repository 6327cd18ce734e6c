// src/core/mod.rs
//! Inference core: locality encoding, record assembly, preprocessing and
//! the regression model, tied together by [`engine::RentEngine`].

pub mod assembler;
pub mod currency;
pub mod encoder;
pub mod engine;
pub mod model;
pub mod pipeline;
pub mod types;
