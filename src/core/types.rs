// src/core/types.rs
use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_SIZE_SQ_FT: u32 = 100;
pub const MAX_SIZE_SQ_FT: u32 = 10_000;
pub const MIN_BEDROOMS: u8 = 1;
pub const MAX_BEDROOMS: u8 = 5;
pub const MIN_AP_DIST_KM: f64 = 0.0;
pub const MAX_AP_DIST_KM: f64 = 50.0;

/// Kind of dwelling, rendered with the exact labels the pipeline was fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    IndependentFloor,
}

impl PropertyType {
    pub const ALL: [PropertyType; 2] = [PropertyType::Apartment, PropertyType::IndependentFloor];

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::IndependentFloor => "independent floor",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PropertyType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InputError::UnknownCategory {
                field: "property type",
                value: wanted.to_string(),
            })
    }
}

/// The seven Delhi regions offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suburb {
    East,
    West,
    North,
    South,
    Central,
    NorthWest,
    SouthWest,
}

impl Suburb {
    pub const ALL: [Suburb; 7] = [
        Suburb::East,
        Suburb::West,
        Suburb::North,
        Suburb::South,
        Suburb::Central,
        Suburb::NorthWest,
        Suburb::SouthWest,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Suburb::East => "East Delhi",
            Suburb::West => "West Delhi",
            Suburb::North => "North Delhi",
            Suburb::South => "South Delhi",
            Suburb::Central => "Central Delhi",
            Suburb::NorthWest => "North West Delhi",
            Suburb::SouthWest => "South West Delhi",
        }
    }
}

impl fmt::Display for Suburb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Suburb {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|sub| sub.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InputError::UnknownCategory {
                field: "suburb",
                value: wanted.to_string(),
            })
    }
}

/// One form submission, exactly as the user entered it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInput {
    pub size_sq_ft: u32,
    pub bedrooms: u8,
    pub property_type: PropertyType,
    pub locality_name: String,
    pub suburb: Suburb,
    pub ap_dist_km: f64,
}

impl RawInput {
    /// Checks the numeric fields against the ranges the form allows.
    pub fn validate(&self) -> Result<(), InputError> {
        check_range(
            "size_sq_ft",
            self.size_sq_ft as f64,
            MIN_SIZE_SQ_FT as f64,
            MAX_SIZE_SQ_FT as f64,
        )?;
        check_range(
            "bedrooms",
            self.bedrooms as f64,
            MIN_BEDROOMS as f64,
            MAX_BEDROOMS as f64,
        )?;
        check_range("ap_dist_km", self.ap_dist_km, MIN_AP_DIST_KM, MAX_AP_DIST_KM)
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), InputError> {
    // NaN fails both comparisons, so it is rejected too.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}

/// Whether a column carries numbers or category labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// A named, typed column of the fitted input schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(name: &str, kind: ColumnKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
}

impl FeatureValue {
    pub fn kind(&self) -> ColumnKind {
        match self {
            FeatureValue::Number(_) => ColumnKind::Numeric,
            FeatureValue::Text(_) => ColumnKind::Categorical,
        }
    }
}

/// Ordered, untyped view of a record, as handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureRow {
    columns: Vec<(String, FeatureValue)>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, value: FeatureValue) {
        self.columns.push((name.to_string(), value));
    }

    /// Drops a column, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<FeatureValue> {
        let idx = self.columns.iter().position(|(n, _)| n == name)?;
        Some(self.columns.remove(idx).1)
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Dense numeric features produced by the pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector(pub Vec<f64>);

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Estimated monthly rent, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub monthly_rent: f64,
    pub display: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawInput {
        RawInput {
            size_sq_ft: 500,
            bedrooms: 2,
            property_type: PropertyType::Apartment,
            locality_name: "geeta colony".into(),
            suburb: Suburb::East,
            ap_dist_km: 20.0,
        }
    }

    #[test]
    fn labels_parse_back_case_insensitively() {
        for suburb in Suburb::ALL {
            assert_eq!(suburb.label().to_uppercase().parse::<Suburb>().unwrap(), suburb);
        }
        assert_eq!(
            " Independent Floor ".parse::<PropertyType>().unwrap(),
            PropertyType::IndependentFloor
        );
        assert!("villa".parse::<PropertyType>().is_err());
        assert!("Noida".parse::<Suburb>().is_err());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let mut input = sample();
        for (size, dist) in [(100, 0.0), (10_000, 50.0)] {
            input.size_sq_ft = size;
            input.ap_dist_km = dist;
            assert!(input.validate().is_ok());
        }
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        let mut input = sample();
        input.size_sq_ft = 99;
        assert!(matches!(
            input.validate(),
            Err(InputError::OutOfRange { field: "size_sq_ft", .. })
        ));

        let mut input = sample();
        input.bedrooms = 6;
        assert!(matches!(
            input.validate(),
            Err(InputError::OutOfRange { field: "bedrooms", .. })
        ));

        let mut input = sample();
        input.ap_dist_km = f64::NAN;
        assert!(input.validate().is_err());
        input.ap_dist_km = 50.01;
        assert!(input.validate().is_err());
    }

    #[test]
    fn feature_row_remove_keeps_order() {
        let mut row = FeatureRow::new();
        row.push("a", FeatureValue::Number(1.0));
        row.push("b", FeatureValue::Text("x".into()));
        row.push("c", FeatureValue::Number(3.0));

        assert_eq!(row.remove("b"), Some(FeatureValue::Text("x".into())));
        assert_eq!(row.remove("missing"), None);
        let names: Vec<&str> = row.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["a", "c"]);
    }
}
