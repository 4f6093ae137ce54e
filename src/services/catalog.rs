use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{
        ActivityProfile, ActivityScores, BudgetTier, Destination, MonthlyTemperatures, Season,
        SeasonalClimate,
    },
};

/// Raw CSV row. Extra dataset columns are ignored.
#[derive(Debug, Deserialize)]
struct CsvRow {
    city: String,
    country: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    latitude: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    longitude: Option<f64>,
    budget_level: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    culture: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    adventure: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    nature: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    beaches: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    nightlife: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    cuisine: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    wellness: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    urban: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    seclusion: Option<f64>,
    avg_temp_monthly: String,
}

/// A normalized dataset row before identifiers are assigned
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub city: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub budget_tier: Option<BudgetTier>,
    pub scores: ActivityScores,
    pub temperatures: MonthlyTemperatures,
}

impl From<CsvRow> for CatalogRecord {
    fn from(row: CsvRow) -> Self {
        let budget_tier = BudgetTier::from_label(&row.budget_level);
        if budget_tier.is_none() {
            tracing::debug!(
                city = %row.city,
                budget_level = %row.budget_level,
                "Unrecognized budget level, leaving tier unset"
            );
        }

        CatalogRecord {
            temperatures: parse_monthly_temperatures(&row.avg_temp_monthly),
            city: row.city,
            country: row.country,
            latitude: row.latitude,
            longitude: row.longitude,
            budget_tier,
            scores: ActivityScores {
                culture: row.culture,
                adventure: row.adventure,
                nature: row.nature,
                beaches: row.beaches,
                nightlife: row.nightlife,
                cuisine: row.cuisine,
                wellness: row.wellness,
                urban: row.urban,
                seclusion: row.seclusion,
            },
        }
    }
}

/// Read-only destination catalog with its climate and activity projections.
///
/// Built once at startup and shared by every request. Identifiers follow the
/// dataset row order, so `destinations[i].id == i`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub destinations: Vec<Destination>,
    pub climate: Vec<SeasonalClimate>,
    pub activities: Vec<ActivityProfile>,
}

impl Catalog {
    /// Loads the catalog from a CSV file
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::DataNotFound(path.to_path_buf()));
        }

        let catalog = Self::from_reader(File::open(path)?)?;
        tracing::info!(
            rows = catalog.len(),
            path = %path.display(),
            "Loaded travel dataset"
        );
        Ok(catalog)
    }

    /// Parses CSV data with a header row.
    ///
    /// Rows shorter than the header are padded with empty cells, which then
    /// degrade like any other blank value.
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let mut row = row?;
            if row.len() < headers.len() {
                tracing::debug!(
                    line = row.position().map(|p| p.line()),
                    fields = row.len(),
                    expected = headers.len(),
                    "Short dataset row, padding with empty cells"
                );
                while row.len() < headers.len() {
                    row.push_field("");
                }
            }
            let parsed: CsvRow = row.deserialize(Some(&headers))?;
            records.push(CatalogRecord::from(parsed));
        }

        Ok(Self::from_records(records))
    }

    /// Assigns identifiers in order and derives the projections
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        // A season is only scored when all of its months appear somewhere in the dataset
        let months_present: BTreeSet<u8> = records
            .iter()
            .flat_map(|r| r.temperatures.months())
            .collect();
        let scored_seasons: Vec<Season> = Season::ALL
            .into_iter()
            .filter(|season| season.months().iter().all(|m| months_present.contains(m)))
            .collect();

        if scored_seasons.len() < Season::ALL.len() {
            tracing::warn!(
                scored = ?scored_seasons,
                "Monthly temperatures incomplete, unscored seasons default to climate code 0"
            );
        }

        let mut catalog = Catalog::default();
        for (index, record) in records.into_iter().enumerate() {
            let id = index as u32;
            let code = |season: Season| {
                if scored_seasons.contains(&season) {
                    season_average(&record.temperatures, season)
                        .map(climate_code)
                        .unwrap_or(0)
                } else {
                    0
                }
            };

            catalog.climate.push(SeasonalClimate {
                id,
                city: record.city.clone(),
                country: record.country.clone(),
                spring: code(Season::Spring),
                summer: code(Season::Summer),
                autumn: code(Season::Autumn),
                winter: code(Season::Winter),
            });
            catalog.activities.push(ActivityProfile {
                id,
                city: record.city.clone(),
                country: record.country.clone(),
                scores: record.scores,
            });
            catalog.destinations.push(Destination {
                id,
                city: record.city,
                country: record.country,
                latitude: record.latitude,
                longitude: record.longitude,
                budget_tier: record.budget_tier,
                scores: record.scores,
            });
        }

        catalog
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    pub fn climate_for(&self, id: u32) -> Option<&SeasonalClimate> {
        self.climate.get(id as usize).filter(|c| c.id == id)
    }

    pub fn activities_for(&self, id: u32) -> Option<&ActivityProfile> {
        self.activities.get(id as usize).filter(|a| a.id == id)
    }
}

/// Parses a cell such as `{"1": {"avg": 12.3, "max": 15.0}, ...}`.
///
/// Unparsable cells yield an empty mapping. Keys outside 1-12 and entries
/// without a numeric `avg` are skipped.
pub fn parse_monthly_temperatures(cell: &str) -> MonthlyTemperatures {
    let mut temperatures = MonthlyTemperatures::new();

    let entries = match serde_json::from_str::<serde_json::Map<String, Value>>(cell) {
        Ok(entries) => entries,
        Err(e) => {
            if !cell.is_empty() {
                tracing::debug!(error = %e, "Malformed monthly temperature cell");
            }
            return temperatures;
        }
    };

    for (key, value) in entries {
        let month = match key.trim().parse::<u8>() {
            Ok(m) if (1..=12).contains(&m) => m,
            _ => continue,
        };
        if let Some(avg) = value.get("avg").and_then(Value::as_f64) {
            temperatures.insert(month, avg);
        }
    }

    temperatures
}

/// Mean of the season's months that are present
fn season_average(temperatures: &MonthlyTemperatures, season: Season) -> Option<f64> {
    let values: Vec<f64> = season
        .months()
        .iter()
        .filter_map(|m| temperatures.get(*m))
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Buckets an average temperature (°C) into a climate code
pub fn climate_code(temperature: f64) -> u8 {
    if temperature.is_nan() || temperature < 15.0 {
        0
    } else if temperature < 20.0 {
        1
    } else if temperature < 25.0 {
        2
    } else {
        3
    }
}
