use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};

use super::{Activity, DomesticIntl, Season};

/// Climate codes a request may select
pub const CLIMATE_CODES: [u8; 4] = [0, 1, 2, 3];
/// Final cost levels a request may select
pub const COST_LEVELS: [u8; 4] = [0, 1, 2, 3];
/// Flight-hour buckets a request may select
pub const DISTANCE_BUCKETS: [u8; 5] = [0, 1, 2, 3, 4];

const COUNTRY_PREFERENCES: [&str; 2] = ["domestic", "international"];

/// Raw recommendation request body.
///
/// Filter fields are kept as loose JSON so that out-of-domain values can be
/// reported against the field that carried them.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub user_location: Option<UserLocation>,
    #[serde(rename = "VACATION_TIME", default)]
    pub vacation_time: Option<Value>,
    #[serde(rename = "CLIMATE", default)]
    pub climate: Option<Value>,
    #[serde(rename = "BUDGET", default)]
    pub budget: Option<Value>,
    #[serde(rename = "PREFERENCES", default)]
    pub preferences: Option<Value>,
    #[serde(rename = "COUNTRY", default)]
    pub country: Option<Value>,
    #[serde(rename = "DISTANCE", default)]
    pub distance: Option<Value>,
}

/// Where the traveller departs from.
///
/// Fields stay loose JSON so that a malformed value fails the computation
/// that needs it rather than the whole body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserLocation {
    #[serde(default)]
    pub city: Option<Value>,
    #[serde(default)]
    pub country: Option<Value>,
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
}

/// Reads a coordinate sent either as a JSON number or as numeric text
fn degrees(value: Option<&Value>, field: &str) -> AppResult<f64> {
    let parsed = match value {
        None | Some(Value::Null) => {
            return Err(AppError::Computation(format!("{} is required", field)));
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(degrees) if degrees.is_finite() => Ok(degrees),
        Some(_) => Err(AppError::Computation(format!("{} must be finite", field))),
        None => Err(AppError::Computation(format!(
            "{} is not a number: {}",
            field,
            value.map(Value::to_string).unwrap_or_default()
        ))),
    }
}

/// Validated filter selection. Empty lists mean "no filter" on that dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationCriteria {
    pub seasons: Vec<Season>,
    pub climate_codes: Vec<u8>,
    pub budget_levels: Vec<u8>,
    pub country: Option<DomesticIntl>,
    pub distance_buckets: Vec<u8>,
    pub activities: Vec<Activity>,
}

impl RecommendationRequest {
    /// Parses a request body; a JSON `null` is treated as an empty request
    pub fn from_json(value: Value) -> AppResult<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| {
            tracing::debug!(error = %e, "Request body has an unexpected shape");
            AppError::InvalidJson
        })
    }

    /// Departure country, trimmed; empty when absent
    pub fn user_country(&self) -> AppResult<String> {
        let country = self.user_location.as_ref().and_then(|loc| loc.country.as_ref());
        match country {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.trim().to_string()),
            Some(other) => Err(AppError::Computation(format!(
                "user_location.country must be text, got {}",
                other
            ))),
        }
    }

    /// Departure coordinates as `(latitude, longitude)` in degrees
    pub fn user_coordinates(&self) -> AppResult<(f64, f64)> {
        let loc = self.user_location.as_ref();
        let latitude = degrees(
            loc.and_then(|l| l.latitude.as_ref()),
            "user_location.latitude",
        )?;
        let longitude = degrees(
            loc.and_then(|l| l.longitude.as_ref()),
            "user_location.longitude",
        )?;
        Ok((latitude, longitude))
    }

    /// Checks every filter field against its domain
    pub fn criteria(&self) -> AppResult<RecommendationCriteria> {
        let seasons = list_items("VACATION_TIME", self.vacation_time.as_ref(), &Season::labels())?
            .iter()
            .map(|item| {
                item.as_str()
                    .and_then(Season::from_label)
                    .ok_or_else(|| AppError::validation("VACATION_TIME", &Season::labels()))
            })
            .collect::<AppResult<Vec<_>>>()?;

        let climate_codes = ordinals("CLIMATE", self.climate.as_ref(), &CLIMATE_CODES)?;
        let budget_levels = ordinals("BUDGET", self.budget.as_ref(), &COST_LEVELS)?;
        let distance_buckets = ordinals("DISTANCE", self.distance.as_ref(), &DISTANCE_BUCKETS)?;

        let activities = list_items("PREFERENCES", self.preferences.as_ref(), &Activity::keys())?
            .iter()
            .map(|item| {
                item.as_str()
                    .and_then(Activity::from_key)
                    .ok_or_else(|| AppError::validation("PREFERENCES", &Activity::keys()))
            })
            .collect::<AppResult<Vec<_>>>()?;

        let country = match self.country.as_ref() {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
                "" => None,
                "domestic" => Some(DomesticIntl::Domestic),
                "international" => Some(DomesticIntl::International),
                _ => return Err(AppError::validation("COUNTRY", &COUNTRY_PREFERENCES)),
            },
            Some(_) => return Err(AppError::validation("COUNTRY", &COUNTRY_PREFERENCES)),
        };

        Ok(RecommendationCriteria {
            seasons,
            climate_codes,
            budget_levels,
            country,
            distance_buckets,
            activities,
        })
    }
}

/// Items of a list field; absent or null means empty
fn list_items<'a, T: std::fmt::Debug>(
    field: &'static str,
    value: Option<&'a Value>,
    allowed: &[T],
) -> AppResult<&'a [Value]> {
    match value {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(AppError::validation(field, allowed)),
    }
}

fn ordinals(field: &'static str, value: Option<&Value>, allowed: &[u8]) -> AppResult<Vec<u8>> {
    list_items(field, value, allowed)?
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .filter(|n| allowed.contains(n))
                .ok_or_else(|| AppError::validation(field, allowed))
        })
        .collect()
}
