// File: src/core/assembler.rs
use crate::core::types::{ColumnKind, FeatureRow, FeatureValue, PropertyType, RawInput, Suburb};

/// The six columns the pipeline is fitted on, in fitted order.
pub const SCHEMA: [(&str, ColumnKind); 6] = [
    ("size_sq_ft", ColumnKind::Numeric),
    ("bedrooms", ColumnKind::Numeric),
    ("propertyType", ColumnKind::Categorical),
    ("suburbName_clean", ColumnKind::Categorical),
    ("AP_dist_km", ColumnKind::Numeric),
    ("locality_encoded", ColumnKind::Numeric),
];

/// True when `columns` lists exactly the [`SCHEMA`] names and kinds, in order.
pub fn matches_schema<'a, I>(columns: I) -> bool
where
    I: IntoIterator<Item = (&'a str, ColumnKind)>,
{
    let mut columns = columns.into_iter();
    SCHEMA
        .iter()
        .all(|&(name, kind)| columns.next() == Some((name, kind)))
        && columns.next().is_none()
}

/// A fully typed model input. Field order mirrors [`SCHEMA`].
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledRecord {
    pub size_sq_ft: f64,
    pub bedrooms: f64,
    pub property_type: PropertyType,
    pub suburb: Suburb,
    pub ap_dist_km: f64,
    pub locality_encoded: f64,
}

impl AssembledRecord {
    /// Untyped row for the pipeline, with the fitted column names.
    pub fn to_row(&self) -> FeatureRow {
        let mut row = FeatureRow::new();
        row.push(SCHEMA[0].0, FeatureValue::Number(self.size_sq_ft));
        row.push(SCHEMA[1].0, FeatureValue::Number(self.bedrooms));
        row.push(
            SCHEMA[2].0,
            FeatureValue::Text(self.property_type.label().to_string()),
        );
        row.push(SCHEMA[3].0, FeatureValue::Text(self.suburb.label().to_string()));
        row.push(SCHEMA[4].0, FeatureValue::Number(self.ap_dist_km));
        row.push(SCHEMA[5].0, FeatureValue::Number(self.locality_encoded));
        row
    }
}

/// Combines a validated submission with its locality code.
pub fn assemble(input: &RawInput, locality_code: f64) -> AssembledRecord {
    AssembledRecord {
        size_sq_ft: input.size_sq_ft as f64,
        bedrooms: input.bedrooms as f64,
        property_type: input.property_type,
        suburb: input.suburb,
        ap_dist_km: input.ap_dist_km,
        locality_encoded: locality_code,
    }
}
