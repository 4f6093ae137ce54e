use serde::Serialize;

use super::{Destination, DomesticIntl, SeasonalClimate};

/// A catalog destination priced for one request
#[derive(Debug, Clone, PartialEq)]
pub struct CostedDestination<'a> {
    pub destination: &'a Destination,
    pub distance_km: f64,
    pub flight_hours: f64,
    pub ticket_price: f64,
    /// Quantile bucket (0-3) of the ticket price among the candidates
    pub ticket_price_level: u8,
    /// Budget tier (missing counts as 0) plus ticket price level
    pub final_cost_sum: u8,
    /// Quantile bucket (0-3) of the final cost sum among the candidates
    pub final_cost_level: u8,
    pub domestic_intl: DomesticIntl,
}

/// A ranked destination as returned to the client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: u32,
    pub city: String,
    pub country: String,
    pub distance_km: f64,
    pub flight_hours: f64,
    pub ticket_price: f64,
    pub ticket_price_level: u8,
    pub budget_level: Option<u8>,
    pub final_cost_sum: u8,
    pub final_cost_level: u8,
    #[serde(rename = "Mar-May")]
    pub spring: u8,
    #[serde(rename = "Jun-Aug")]
    pub summer: u8,
    #[serde(rename = "Sep-Nov")]
    pub autumn: u8,
    #[serde(rename = "Dec-Feb")]
    pub winter: u8,
    pub domestic_intl: DomesticIntl,
}

impl Recommendation {
    /// Joins a priced destination with its climate codes, rounding display figures
    pub fn new(costed: &CostedDestination<'_>, climate: &SeasonalClimate) -> Self {
        let destination = costed.destination;
        Self {
            id: destination.id,
            city: destination.city.clone(),
            country: destination.country.clone(),
            distance_km: round2(costed.distance_km),
            flight_hours: round2(costed.flight_hours),
            ticket_price: round2(costed.ticket_price),
            ticket_price_level: costed.ticket_price_level,
            budget_level: destination.budget_tier.map(|t| t.ordinal()),
            final_cost_sum: costed.final_cost_sum,
            final_cost_level: costed.final_cost_level,
            spring: climate.spring,
            summer: climate.summer,
            autumn: climate.autumn,
            winter: climate.winter,
            domestic_intl: costed.domestic_intl,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
