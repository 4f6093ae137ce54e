use crate::models::{CostedDestination, Destination, DomesticIntl};

const EARTH_RADIUS_KM: f64 = 6371.0;
const CRUISE_SPEED_KMH: f64 = 900.0;
const GROUND_HOURS: f64 = 1.0;
const BASE_FARE: f64 = 50.0;
const PER_KM_RATE: f64 = 0.12;
const PER_HOUR_RATE: f64 = 40.0;

/// Number of quantile buckets used for cost levels
pub const COST_BUCKETS: usize = 4;

/// Great-circle distance in km between two points given in degrees
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Flight duration in hours: cruise time plus a fixed hour on the ground
pub fn flight_time(distance_km: f64) -> f64 {
    distance_km / CRUISE_SPEED_KMH + GROUND_HOURS
}

/// Synthetic ticket price from distance and flight duration
pub fn estimate_ticket_price(distance_km: f64, flight_hours: f64) -> f64 {
    BASE_FARE + distance_km * PER_KM_RATE + flight_hours * PER_HOUR_RATE
}

/// Assigns each value a quantile bucket in `0..k` relative to the other values.
///
/// Values are ranked by percentile with ties broken by position, so equal
/// values may land in different buckets. Bucket `b` covers percentiles
/// `(b/k, (b+1)/k]`, the first bucket also including 0. NaN values get bucket
/// 0, as does every value when there is at most one distinct non-NaN value.
pub fn quantile_bucket(values: &[f64], k: usize) -> Vec<u8> {
    let mut buckets = vec![0u8; values.len()];
    if k == 0 {
        return buckets;
    }

    let mut ranked: Vec<usize> = (0..values.len()).filter(|&i| !values[i].is_nan()).collect();
    let first = match ranked.first() {
        Some(&i) => values[i],
        None => return buckets,
    };
    if ranked.iter().all(|&i| values[i] == first) {
        return buckets;
    }

    // Stable sort keeps row order among equal values
    ranked.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let n = ranked.len();
    for (position, &index) in ranked.iter().enumerate() {
        let rank = position + 1;
        // percentile rank/n falls in bucket ceil(rank*k/n) - 1
        let bucket = (rank * k).div_ceil(n) - 1;
        buckets[index] = bucket as u8;
    }

    buckets
}

/// Prices every destination for a traveller at the given location.
///
/// Both cost levels are bucketed over `destinations`, so they change with the
/// candidate set and with the traveller's position. A destination without
/// coordinates gets NaN distance, hours and price, and ticket price level 0.
pub fn compute_costs<'a>(
    destinations: &'a [Destination],
    user_lat: f64,
    user_lon: f64,
    user_country: &str,
) -> Vec<CostedDestination<'a>> {
    let distances: Vec<f64> = destinations
        .iter()
        .map(|destination| match (destination.latitude, destination.longitude) {
            (Some(lat), Some(lon)) => haversine(lat, lon, user_lat, user_lon),
            _ => {
                tracing::debug!(
                    id = destination.id,
                    city = %destination.city,
                    "Destination has no usable coordinates"
                );
                f64::NAN
            }
        })
        .collect();

    let flight_hours: Vec<f64> = distances.iter().map(|&d| flight_time(d)).collect();
    let ticket_prices: Vec<f64> = distances
        .iter()
        .zip(&flight_hours)
        .map(|(&d, &h)| estimate_ticket_price(d, h))
        .collect();
    let ticket_price_levels = quantile_bucket(&ticket_prices, COST_BUCKETS);

    let final_cost_sums: Vec<u8> = destinations
        .iter()
        .zip(&ticket_price_levels)
        .map(|(dest, &level)| dest.budget_tier.map_or(0, |t| t.ordinal()) + level)
        .collect();
    let sums_as_f64: Vec<f64> = final_cost_sums.iter().map(|&s| f64::from(s)).collect();
    let final_cost_levels = quantile_bucket(&sums_as_f64, COST_BUCKETS);

    destinations
        .iter()
        .enumerate()
        .map(|(i, destination)| CostedDestination {
            destination,
            distance_km: distances[i],
            flight_hours: flight_hours[i],
            ticket_price: ticket_prices[i],
            ticket_price_level: ticket_price_levels[i],
            final_cost_sum: final_cost_sums[i],
            final_cost_level: final_cost_levels[i],
            domestic_intl: DomesticIntl::classify(&destination.country, user_country),
        })
        .collect()
}
