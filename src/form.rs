// File: src/form.rs
//! Parsing of the prediction form's text answers.

use crate::core::encoder::normalize_locality;
use crate::core::types::{
    PropertyType, RawInput, Suburb, MAX_AP_DIST_KM, MAX_BEDROOMS, MAX_SIZE_SQ_FT, MIN_AP_DIST_KM,
    MIN_BEDROOMS, MIN_SIZE_SQ_FT,
};
use crate::error::InputError;

pub const DEFAULT_SIZE_SQ_FT: u32 = 500;
pub const DEFAULT_BEDROOMS: u8 = 2;
pub const DEFAULT_AP_DIST_KM: f64 = 20.0;

/// Form fields in the order they are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Size,
    Bedrooms,
    PropertyType,
    Locality,
    Suburb,
    Distance,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Size,
        Field::Bedrooms,
        Field::PropertyType,
        Field::Locality,
        Field::Suburb,
        Field::Distance,
    ];

    pub fn prompt(&self) -> String {
        match self {
            Field::Size => format!(
                "Area in sq. ft. ({MIN_SIZE_SQ_FT}-{MAX_SIZE_SQ_FT}) [{DEFAULT_SIZE_SQ_FT}]"
            ),
            Field::Bedrooms => {
                format!("Number of bedrooms ({MIN_BEDROOMS}-{MAX_BEDROOMS}) [{DEFAULT_BEDROOMS}]")
            }
            Field::PropertyType => {
                let options: Vec<String> = PropertyType::ALL
                    .iter()
                    .enumerate()
                    .map(|(i, p)| format!("{}={}", i + 1, p))
                    .collect();
                format!("Property type ({}) [1]", options.join(", "))
            }
            Field::Locality => "Locality name (e.g., geeta colony)".to_string(),
            Field::Suburb => {
                let options: Vec<String> = Suburb::ALL
                    .iter()
                    .enumerate()
                    .map(|(i, s)| format!("{}={}", i + 1, s))
                    .collect();
                format!("Suburb ({}) [1]", options.join(", "))
            }
            Field::Distance => format!(
                "Distance from Akshardham in km ({MIN_AP_DIST_KM:.1}-{MAX_AP_DIST_KM:.1}) [{DEFAULT_AP_DIST_KM:.1}]"
            ),
        }
    }
}

/// Answers collected so far. Numeric and choice fields start at the form's
/// defaults; the locality has none.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDraft {
    pub size_sq_ft: u32,
    pub bedrooms: u8,
    pub property_type: PropertyType,
    pub locality_name: Option<String>,
    pub suburb: Suburb,
    pub ap_dist_km: f64,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self {
            size_sq_ft: DEFAULT_SIZE_SQ_FT,
            bedrooms: DEFAULT_BEDROOMS,
            property_type: PropertyType::Apartment,
            locality_name: None,
            suburb: Suburb::East,
            ap_dist_km: DEFAULT_AP_DIST_KM,
        }
    }
}

impl FormDraft {
    /// Applies one answer. Blank answers keep the default, except for the
    /// locality which is required.
    pub fn answer(&mut self, field: Field, raw: &str) -> Result<(), InputError> {
        let raw = raw.trim();
        if raw.is_empty() && field != Field::Locality {
            return Ok(());
        }

        match field {
            Field::Size => {
                self.size_sq_ft = parse_in_range("size_sq_ft", raw, MIN_SIZE_SQ_FT, MAX_SIZE_SQ_FT)?
            }
            Field::Bedrooms => {
                self.bedrooms = parse_in_range("bedrooms", raw, MIN_BEDROOMS, MAX_BEDROOMS)?
            }
            Field::PropertyType => self.property_type = pick(raw, &PropertyType::ALL)?,
            Field::Locality => {
                let name = normalize_locality(raw);
                if name.is_empty() {
                    return Err(InputError::Required { field: "locality" });
                }
                self.locality_name = Some(name);
            }
            Field::Suburb => self.suburb = pick(raw, &Suburb::ALL)?,
            Field::Distance => {
                let km: f64 = raw.parse().map_err(|_| InputError::InvalidNumber {
                    field: "ap_dist_km",
                    value: raw.to_string(),
                })?;
                if !(MIN_AP_DIST_KM..=MAX_AP_DIST_KM).contains(&km) {
                    return Err(InputError::OutOfRange {
                        field: "ap_dist_km",
                        min: MIN_AP_DIST_KM,
                        max: MAX_AP_DIST_KM,
                        value: km,
                    });
                }
                self.ap_dist_km = km;
            }
        }
        Ok(())
    }

    /// The finished submission, once the locality is known.
    pub fn finish(&self) -> Option<RawInput> {
        Some(RawInput {
            size_sq_ft: self.size_sq_ft,
            bedrooms: self.bedrooms,
            property_type: self.property_type,
            locality_name: self.locality_name.clone()?,
            suburb: self.suburb,
            ap_dist_km: self.ap_dist_km,
        })
    }
}

fn parse_in_range<T>(field: &'static str, raw: &str, min: T, max: T) -> Result<T, InputError>
where
    T: std::str::FromStr + PartialOrd + Into<f64> + Copy,
{
    let value: T = raw.parse().map_err(|_| InputError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;
    if value < min || value > max {
        return Err(InputError::OutOfRange {
            field,
            min: min.into(),
            max: max.into(),
            value: value.into(),
        });
    }
    Ok(value)
}

/// Accepts a 1-based menu number or the option's label.
fn pick<T>(raw: &str, options: &[T]) -> Result<T, InputError>
where
    T: std::str::FromStr<Err = InputError> + Copy,
{
    if let Ok(n) = raw.parse::<usize>() {
        return match n.checked_sub(1).and_then(|i| options.get(i)) {
            Some(option) => Ok(*option),
            None => Err(InputError::OutOfRange {
                field: "choice",
                min: 1.0,
                max: options.len() as f64,
                value: n as f64,
            }),
        };
    }
    raw.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_answers_keep_defaults() {
        let mut draft = FormDraft::default();
        for field in Field::ALL {
            if field != Field::Locality {
                draft.answer(field, "   ").unwrap();
            }
        }
        assert_eq!(draft, FormDraft::default());
        assert!(draft.finish().is_none());
    }

    #[test]
    fn full_form_produces_raw_input() {
        let mut draft = FormDraft::default();
        draft.answer(Field::Size, "10000").unwrap();
        draft.answer(Field::Bedrooms, "5").unwrap();
        draft.answer(Field::PropertyType, "2").unwrap();
        draft.answer(Field::Locality, "  Lajpat Nagar ").unwrap();
        draft.answer(Field::Suburb, "south delhi").unwrap();
        draft.answer(Field::Distance, "0").unwrap();

        let input = draft.finish().unwrap();
        assert_eq!(input.size_sq_ft, 10_000);
        assert_eq!(input.bedrooms, 5);
        assert_eq!(input.property_type, PropertyType::IndependentFloor);
        assert_eq!(input.locality_name, "lajpat nagar");
        assert_eq!(input.suburb, Suburb::South);
        assert_eq!(input.ap_dist_km, 0.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn bad_answers_are_rejected_and_leave_the_draft_alone() {
        let mut draft = FormDraft::default();
        assert!(draft.answer(Field::Size, "99").is_err());
        assert!(draft.answer(Field::Size, "big").is_err());
        assert!(draft.answer(Field::Bedrooms, "0").is_err());
        assert!(draft.answer(Field::Suburb, "8").is_err());
        assert!(draft.answer(Field::Suburb, "Gurgaon").is_err());
        assert!(draft.answer(Field::Distance, "50.5").is_err());
        assert!(draft.answer(Field::Locality, "  ").is_err());
        assert_eq!(draft, FormDraft::default());
    }

    #[test]
    fn unparsable_numbers_and_blank_locality_say_what_is_wrong() {
        let mut draft = FormDraft::default();

        let err = draft.answer(Field::Size, "100.5").unwrap_err();
        assert!(matches!(err, InputError::InvalidNumber { field: "size_sq_ft", .. }));
        assert_eq!(err.to_string(), "size_sq_ft must be a number, got '100.5'");

        let err = draft.answer(Field::Distance, "far").unwrap_err();
        assert!(matches!(err, InputError::InvalidNumber { field: "ap_dist_km", .. }));

        let err = draft.answer(Field::Locality, "").unwrap_err();
        assert!(matches!(err, InputError::Required { field: "locality" }));
        assert_eq!(err.to_string(), "locality is required");
    }

    #[test]
    fn prompts_show_defaults() {
        assert!(Field::Size.prompt().ends_with("[500]"));
        assert!(Field::Distance.prompt().contains("(0.0-50.0) [20.0]"));
        assert!(Field::Suburb.prompt().contains("7=South West Delhi"));
    }
}
