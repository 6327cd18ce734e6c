// File: src/request.rs
//! Per-submission state machine:
//! `AwaitingInput -> Validating -> Predicted | Rejected`.

use crate::core::engine::RentEngine;
use crate::core::types::RawInput;
use crate::error::{InputError, PredictError};

#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    AwaitingInput,
    Validating,
    Predicted { monthly_rent: f64, display: String },
    Rejected { message: String },
}

impl RequestState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestState::Predicted { .. } | RequestState::Rejected { .. }
        )
    }

    /// The single line shown to the user, if there is one yet.
    pub fn message(&self) -> Option<String> {
        match self {
            RequestState::Predicted { display, .. } => {
                Some(format!("Estimated Monthly Rent: {display}"))
            }
            RequestState::Rejected { message } => Some(message.clone()),
            _ => None,
        }
    }
}

/// Drives one submission at a time against a shared engine. Errors never
/// leave this type: they become a `Rejected` state.
pub struct RequestHandler<'a> {
    engine: &'a RentEngine,
    state: RequestState,
}

impl<'a> RequestHandler<'a> {
    pub fn new(engine: &'a RentEngine) -> Self {
        Self {
            engine,
            state: RequestState::AwaitingInput,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = RequestState::AwaitingInput;
    }

    pub fn submit(&mut self, input: &RawInput) -> &RequestState {
        self.state = RequestState::Validating;

        self.state = match self.engine.predict(input) {
            Ok(prediction) => {
                tracing::debug!(rent = prediction.monthly_rent, "prediction served");
                RequestState::Predicted {
                    monthly_rent: prediction.monthly_rent,
                    display: prediction.display,
                }
            }
            Err(err) => {
                match &err {
                    PredictError::Input(_) => tracing::debug!(%err, "submission rejected"),
                    PredictError::Inference(_) => tracing::warn!(%err, "prediction failed"),
                }
                RequestState::Rejected {
                    message: rejection_message(&err),
                }
            }
        };
        &self.state
    }
}

fn rejection_message(err: &PredictError) -> String {
    match err {
        PredictError::Input(InputError::UnknownLocality { suggestions, .. })
            if !suggestions.is_empty() =>
        {
            format!("{err} Did you mean: {}?", suggestions.join(", "))
        }
        _ => err.to_string(),
    }
}
