use std::collections::BTreeMap;

use super::{Activity, Season};

/// Price tier of a destination as listed in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BudgetTier {
    Budget,
    MidRange,
    Luxury,
}

impl BudgetTier {
    /// Maps the dataset text to a tier; unknown text yields `None`
    pub fn from_label(label: &str) -> Option<BudgetTier> {
        match label {
            "Budget" => Some(BudgetTier::Budget),
            "Mid-range" => Some(BudgetTier::MidRange),
            "Luxury" => Some(BudgetTier::Luxury),
            _ => None,
        }
    }

    pub fn ordinal(&self) -> u8 {
        match self {
            BudgetTier::Budget => 0,
            BudgetTier::MidRange => 1,
            BudgetTier::Luxury => 2,
        }
    }
}

/// Average temperature per calendar month (1-12)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyTemperatures(BTreeMap<u8, f64>);

impl MonthlyTemperatures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, month: u8, average: f64) {
        self.0.insert(month, average);
    }

    pub fn get(&self, month: u8) -> Option<f64> {
        self.0.get(&month).copied()
    }

    pub fn months(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The nine activity scores of a destination, on a 0-5 scale.
/// `None` marks a cell that could not be read as a number.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActivityScores {
    pub culture: Option<f64>,
    pub adventure: Option<f64>,
    pub nature: Option<f64>,
    pub beaches: Option<f64>,
    pub nightlife: Option<f64>,
    pub cuisine: Option<f64>,
    pub wellness: Option<f64>,
    pub urban: Option<f64>,
    pub seclusion: Option<f64>,
}

impl ActivityScores {
    /// Every score set to `value`
    pub fn uniform(value: f64) -> Self {
        Self {
            culture: Some(value),
            adventure: Some(value),
            nature: Some(value),
            beaches: Some(value),
            nightlife: Some(value),
            cuisine: Some(value),
            wellness: Some(value),
            urban: Some(value),
            seclusion: Some(value),
        }
    }

    pub fn score(&self, activity: Activity) -> Option<f64> {
        match activity {
            Activity::Culture => self.culture,
            Activity::Adventure => self.adventure,
            Activity::Nature => self.nature,
            Activity::Beaches => self.beaches,
            Activity::Nightlife => self.nightlife,
            Activity::Cuisine => self.cuisine,
            Activity::Wellness => self.wellness,
            Activity::Urban => self.urban,
            Activity::Seclusion => self.seclusion,
        }
    }
}

/// One catalog row, immutable once loaded
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub id: u32,
    pub city: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub budget_tier: Option<BudgetTier>,
    pub scores: ActivityScores,
}

/// Climate code (0-3) of a destination for each season
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonalClimate {
    pub id: u32,
    pub city: String,
    pub country: String,
    pub spring: u8,
    pub summer: u8,
    pub autumn: u8,
    pub winter: u8,
}

impl SeasonalClimate {
    pub fn code(&self, season: Season) -> u8 {
        match season {
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Autumn => self.autumn,
            Season::Winter => self.winter,
        }
    }
}

/// Activity scores of a destination, kept apart from the cost columns
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityProfile {
    pub id: u32,
    pub city: String,
    pub country: String,
    pub scores: ActivityScores,
}
