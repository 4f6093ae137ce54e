use std::cmp::Ordering;

use crate::{
    models::{
        ActivityProfile, CostedDestination, Recommendation, RecommendationCriteria, Season,
        SeasonalClimate,
    },
    services::catalog::Catalog,
};

/// Scores must exceed this for a destination to count as good for an activity
const ACTIVITY_THRESHOLD: f64 = 3.0;

/// Whether `flight_hours` falls in the half-open range of distance `bucket`:
/// 0 = [0,2), 1 = [2,4), 2 = [4,6), 3 = [6,8), 4 = [8,∞)
pub fn in_distance_bucket(bucket: u8, flight_hours: f64) -> bool {
    match bucket {
        0 => flight_hours < 2.0,
        1 => (2.0..4.0).contains(&flight_hours),
        2 => (4.0..6.0).contains(&flight_hours),
        3 => (6.0..8.0).contains(&flight_hours),
        4 => flight_hours >= 8.0,
        _ => false,
    }
}

/// Ascending price with unpriced (NaN) rows last
fn price_order(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.total_cmp(&b),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

fn climate_matches(climate: &SeasonalClimate, seasons: &[Season], codes: &[u8]) -> bool {
    seasons.iter().any(|&season| codes.contains(&climate.code(season)))
}

fn activities_match(profile: &ActivityProfile, criteria: &RecommendationCriteria) -> bool {
    criteria.activities.iter().all(|&activity| {
        profile
            .scores
            .score(activity)
            .is_some_and(|score| score > ACTIVITY_THRESHOLD)
    })
}

/// Narrows the priced candidates to those matching `criteria` and ranks them.
///
/// Filters apply in order country, distance, budget, climate, activities; each
/// must pass, and values selected within one filter are alternatives. Results
/// are sorted by final cost level, then ticket price, keeping row order on ties.
/// Climate and activity data come from the catalog projections.
pub fn apply_filters(
    costed: Vec<CostedDestination<'_>>,
    catalog: &Catalog,
    criteria: &RecommendationCriteria,
) -> Vec<Recommendation> {
    let seasons: &[Season] = if criteria.seasons.is_empty() {
        &Season::ALL
    } else {
        &criteria.seasons
    };

    let mut kept: Vec<(CostedDestination<'_>, &SeasonalClimate)> = costed
        .into_iter()
        .filter(|c| criteria.country.map_or(true, |pref| c.domestic_intl == pref))
        .filter(|c| {
            criteria.distance_buckets.is_empty()
                || criteria
                    .distance_buckets
                    .iter()
                    .any(|&b| in_distance_bucket(b, c.flight_hours))
        })
        .filter(|c| {
            criteria.budget_levels.is_empty() || criteria.budget_levels.contains(&c.final_cost_level)
        })
        .filter_map(|c| {
            let id = c.destination.id;
            let Some(season_codes) = catalog.climate_for(id) else {
                tracing::warn!(id, "No climate projection for destination, dropping it");
                return None;
            };
            if !criteria.climate_codes.is_empty()
                && !climate_matches(season_codes, seasons, &criteria.climate_codes)
            {
                return None;
            }
            Some((c, season_codes))
        })
        .filter(|(c, _)| {
            criteria.activities.is_empty()
                || catalog
                    .activities_for(c.destination.id)
                    .is_some_and(|profile| activities_match(profile, criteria))
        })
        .collect();

    kept.sort_by(|(a, _), (b, _)| {
        a.final_cost_level
            .cmp(&b.final_cost_level)
            .then(price_order(a.ticket_price, b.ticket_price))
    });

    kept.iter()
        .map(|(costed, season_codes)| Recommendation::new(costed, season_codes))
        .collect()
}
