//! Shared fixtures: a small but realistic fitted pipeline and linear model
//! over the six form columns.

#![allow(dead_code)]

use rent_core::core::assembler::SCHEMA;
use rent_core::core::model::RegressionModel;
use rent_core::core::pipeline::{ColumnStep, ColumnTransform, PreprocessingPipeline};
use rent_core::core::types::{ColumnSpec, PropertyType, RawInput, Suburb};
use rent_core::persistence::{save_bundle, ArtifactBundle, ArtifactPaths, JsonExport};
use std::collections::HashMap;
use std::path::Path;

pub fn locality_codes() -> HashMap<String, f64> {
    HashMap::from([
        ("geeta colony".to_string(), 16_000.0),
        ("laxmi nagar".to_string(), 14_500.0),
        ("lajpat nagar".to_string(), 27_000.0),
        ("vasant kunj".to_string(), 38_000.0),
        ("dwarka".to_string(), 21_000.0),
    ])
}

fn step(column: &str, transform: ColumnTransform) -> ColumnStep {
    ColumnStep {
        column: column.to_string(),
        transform,
    }
}

pub fn pipeline() -> PreprocessingPipeline {
    let schema = SCHEMA
        .iter()
        .map(|(name, kind)| ColumnSpec::new(name, *kind))
        .collect();
    let steps = vec![
        step(
            "size_sq_ft",
            ColumnTransform::Standardize {
                mean: 1000.0,
                scale: 600.0,
            },
        ),
        step("bedrooms", ColumnTransform::Passthrough),
        step(
            "AP_dist_km",
            ColumnTransform::Standardize {
                mean: 15.0,
                scale: 8.0,
            },
        ),
        step("locality_encoded", ColumnTransform::Passthrough),
        step(
            "propertyType",
            ColumnTransform::OneHot {
                categories: PropertyType::ALL.iter().map(|p| p.label().to_string()).collect(),
            },
        ),
        step(
            "suburbName_clean",
            ColumnTransform::OneHot {
                categories: Suburb::ALL.iter().map(|s| s.label().to_string()).collect(),
            },
        ),
    ];
    PreprocessingPipeline::new(schema, steps).expect("fixture pipeline is valid")
}

/// 13 features: 4 numeric, 2 property types, 7 suburbs.
pub fn model() -> RegressionModel {
    RegressionModel::Linear {
        coefficients: vec![
            6_000.0, 1_500.0, -1_200.0, 0.5, // numeric
            0.0, 2_500.0, // property type
            -1_000.0, 0.0, -500.0, 4_000.0, 3_000.0, -800.0, 1_500.0, // suburbs
        ],
        intercept: 18_000.0,
    }
}

pub fn bundle() -> ArtifactBundle {
    ArtifactBundle::from_parts(locality_codes(), pipeline(), model()).expect("fixture bundle")
}

pub fn json_export() -> JsonExport {
    JsonExport {
        locality_codes: locality_codes(),
        pipeline: pipeline(),
        model: model(),
    }
}

/// Writes the fixture artifacts into `dir` and returns their paths.
pub fn write_artifacts(dir: &Path) -> ArtifactPaths {
    let paths = ArtifactPaths::in_dir(dir);
    save_bundle(&bundle(), &paths).expect("fixture artifacts written");
    paths
}

pub fn scenario_a() -> RawInput {
    RawInput {
        size_sq_ft: 500,
        bedrooms: 2,
        property_type: PropertyType::Apartment,
        locality_name: "geeta colony".to_string(),
        suburb: Suburb::East,
        ap_dist_km: 20.0,
    }
}
