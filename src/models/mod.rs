use serde::Serialize;
use std::fmt::Display;

mod destination;
mod recommendation;
mod request;

pub use destination::{
    ActivityProfile, ActivityScores, BudgetTier, Destination, MonthlyTemperatures,
    SeasonalClimate,
};
pub use recommendation::{CostedDestination, Recommendation};
pub use request::{
    RecommendationCriteria, RecommendationRequest, UserLocation, CLIMATE_CODES,
    COST_LEVELS, DISTANCE_BUCKETS,
};

/// Three-month travel window used to derive climate codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    #[serde(rename = "Mar-May")]
    Spring,
    #[serde(rename = "Jun-Aug")]
    Summer,
    #[serde(rename = "Sep-Nov")]
    Autumn,
    #[serde(rename = "Dec-Feb")]
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Calendar months (1-12) covered by the season
    pub fn months(&self) -> [u8; 3] {
        match self {
            Season::Spring => [3, 4, 5],
            Season::Summer => [6, 7, 8],
            Season::Autumn => [9, 10, 11],
            Season::Winter => [12, 1, 2],
        }
    }

    /// Label used on the wire, e.g. `"Mar-May"`
    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Mar-May",
            Season::Summer => "Jun-Aug",
            Season::Autumn => "Sep-Nov",
            Season::Winter => "Dec-Feb",
        }
    }

    pub fn from_label(label: &str) -> Option<Season> {
        Season::ALL.into_iter().find(|s| s.label() == label)
    }

    pub fn labels() -> Vec<&'static str> {
        Season::ALL.iter().map(Season::label).collect()
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Activity a traveller can ask for; each maps onto one catalog score column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    Beaches,
    Nature,
    Cuisine,
    Adventure,
    Nightlife,
    Urban,
    Culture,
    Wellness,
    Seclusion,
}

impl Activity {
    pub const ALL: [Activity; 9] = [
        Activity::Beaches,
        Activity::Nature,
        Activity::Cuisine,
        Activity::Adventure,
        Activity::Nightlife,
        Activity::Urban,
        Activity::Culture,
        Activity::Wellness,
        Activity::Seclusion,
    ];

    /// Preference key accepted in requests
    pub fn key(&self) -> &'static str {
        match self {
            Activity::Beaches => "beach",
            Activity::Nature => "nature",
            Activity::Cuisine => "cuisine",
            Activity::Adventure => "adventure",
            Activity::Nightlife => "nightlife",
            Activity::Urban => "urban",
            Activity::Culture => "culture",
            Activity::Wellness => "wellness",
            Activity::Seclusion => "seclusion",
        }
    }

    pub fn from_key(key: &str) -> Option<Activity> {
        Activity::ALL.into_iter().find(|a| a.key() == key)
    }

    pub fn keys() -> Vec<&'static str> {
        Activity::ALL.iter().map(Activity::key).collect()
    }
}

/// Whether a destination lies in the requesting user's own country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DomesticIntl {
    Domestic,
    International,
}

impl DomesticIntl {
    /// Tags `country` relative to `user_country`, ignoring case and surrounding whitespace.
    /// An empty user country matches nothing.
    pub fn classify(country: &str, user_country: &str) -> Self {
        let user = user_country.trim().to_lowercase();
        if !user.is_empty() && country.trim().to_lowercase() == user {
            DomesticIntl::Domestic
        } else {
            DomesticIntl::International
        }
    }
}
