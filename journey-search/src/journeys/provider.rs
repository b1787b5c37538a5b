//! The journey search collaborator.
//!
//! Real routing and pricing live behind [`JourneyProvider`]. The bundled
//! [`SampleJourneys`] answers every search with the same two journeys.

use std::future::Future;

use chrono::NaiveTime;
use tracing::info;

use crate::domain::{ComfortScore, Journey, TrainClass};

use super::error::JourneyError;
use super::request::SearchRequest;

/// Something that can answer journey searches.
pub trait JourneyProvider {
    /// Find journeys for a validated request.
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<Vec<Journey>, JourneyError>> + Send;
}

/// Check every journey from a provider before it reaches the pipeline.
pub fn validate_journeys(journeys: &[Journey]) -> Result<(), JourneyError> {
    for journey in journeys {
        journey
            .validate()
            .map_err(|source| JourneyError::InvalidJourney {
                train_number: journey.train_number.clone(),
                source,
            })?;
    }
    Ok(())
}

/// Stub provider returning a fixed two-journey sample regardless of input.
#[derive(Debug, Clone, Default)]
pub struct SampleJourneys;

impl SampleJourneys {
    /// The fixed sample.
    pub fn journeys() -> Vec<Journey> {
        vec![
            Journey {
                train_number: "12952".to_string(),
                train_name: "Mumbai Rajdhani Express".to_string(),
                departure_station: "New Delhi".to_string(),
                departure_time: hm(16, 55),
                arrival_station: "Mumbai Central".to_string(),
                arrival_time: hm(8, 35),
                duration: "15h 40m".to_string(),
                transfers: 1,
                fare: 850.0,
                train_class: TrainClass::Ac,
                comfort_score: comfort(4),
            },
            Journey {
                train_number: "12138".to_string(),
                train_name: "Punjab Mail".to_string(),
                departure_station: "New Delhi".to_string(),
                departure_time: hm(5, 15),
                arrival_station: "Mumbai CSMT".to_string(),
                arrival_time: hm(7, 35),
                duration: "26h 20m".to_string(),
                transfers: 0,
                fare: 620.0,
                train_class: TrainClass::Sleeper,
                comfort_score: comfort(3),
            },
        ]
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("sample times are valid")
}

fn comfort(value: u8) -> ComfortScore {
    ComfortScore::new(value).expect("sample comfort scores are in range")
}

impl JourneyProvider for SampleJourneys {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Journey>, JourneyError> {
        info!(
            origin = %request.origin,
            destination = %request.destination,
            date = %request.date,
            "serving sample journeys"
        );
        Ok(Self::journeys())
    }
}
