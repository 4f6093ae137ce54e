use crate::{
    error::AppResult,
    models::{Recommendation, RecommendationRequest},
    services::{catalog::Catalog, costs, filters},
};

/// Ranks catalog destinations for a traveller.
///
/// Validates every filter field before doing any work, then prices the full
/// catalog from the traveller's position and narrows it to the matching
/// destinations, cheapest first.
pub fn recommend(
    catalog: &Catalog,
    request: &RecommendationRequest,
) -> AppResult<Vec<Recommendation>> {
    let criteria = request.criteria()?;
    let (user_lat, user_lon) = request.user_coordinates()?;
    let user_country = request.user_country()?;

    let costed = costs::compute_costs(&catalog.destinations, user_lat, user_lon, &user_country);
    let candidates = costed.len();

    let results = filters::apply_filters(costed, catalog, &criteria);

    tracing::debug!(
        candidates,
        results = results.len(),
        seasons = criteria.seasons.len(),
        activities = criteria.activities.len(),
        "Filtered recommendations"
    );

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{ActivityScores, BudgetTier, DomesticIntl, MonthlyTemperatures};
    use crate::services::catalog::CatalogRecord;
    use serde_json::json;

    fn record(country: &str, lat: f64, lon: f64, tier: BudgetTier) -> CatalogRecord {
        CatalogRecord {
            city: format!("{} {} {}", country, lat, lon),
            country: country.to_string(),
            latitude: Some(lat),
            longitude: Some(lon),
            budget_tier: Some(tier),
            scores: ActivityScores::uniform(5.0),
            temperatures: MonthlyTemperatures::new(),
        }
    }

    fn request(body: serde_json::Value) -> RecommendationRequest {
        RecommendationRequest::from_json(body).unwrap()
    }

    #[test]
    fn test_destination_at_user_location_comes_first() {
        let catalog = Catalog::from_records(vec![
            record("Y", 40.0, 40.0, BudgetTier::Luxury),
            record("X", 0.0, 0.0, BudgetTier::Budget),
            record("Y", -20.0, 60.0, BudgetTier::MidRange),
        ]);
        let results = recommend(
            &catalog,
            &request(json!({
                "user_location": { "country": "X", "latitude": 0, "longitude": 0 }
            })),
        )
        .unwrap();

        let first = &results[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.distance_km, 0.0);
        assert_eq!(first.flight_hours, 1.0);
        assert_eq!(first.ticket_price, 90.0);
        assert_eq!(first.domestic_intl, DomesticIntl::Domestic);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_far_destination_excluded_from_short_haul() {
        // 10,000 km along the equator is about 12.1 flight hours
        let lon = 10_000.0 / 6371.0_f64 * 180.0 / std::f64::consts::PI;
        let catalog = Catalog::from_records(vec![
            record("X", 0.0, 1.0, BudgetTier::Budget),
            record("Z", 0.0, lon, BudgetTier::Budget),
        ]);
        let body = json!({
            "user_location": { "country": "X", "latitude": 0.0, "longitude": 0.0 },
            "DISTANCE": [0]
        });
        let results = recommend(&catalog, &request(body)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].country, "X");

        let body = json!({
            "user_location": { "latitude": 0.0, "longitude": 0.0 },
            "DISTANCE": [4]
        });
        let results = recommend(&catalog, &request(body)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].flight_hours, 12.11);
    }

    #[test]
    fn test_validation_runs_before_computation() {
        let catalog = Catalog::from_records(vec![record("X", 0.0, 0.0, BudgetTier::Budget)]);
        // Coordinates are missing too, but the validation error wins
        let err = recommend(&catalog, &request(json!({ "CLIMATE": [5] }))).unwrap_err();
        match err {
            AppError::Validation { field, allowed } => {
                assert_eq!(field, "CLIMATE");
                assert_eq!(allowed, "[0, 1, 2, 3]");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_coordinates_fail_the_request() {
        let catalog = Catalog::from_records(vec![record("X", 0.0, 0.0, BudgetTier::Budget)]);
        let err = recommend(&catalog, &request(json!({}))).unwrap_err();
        assert!(matches!(err, AppError::Computation(_)));
    }

    #[test]
    fn test_empty_catalog_yields_no_results() {
        let catalog = Catalog::default();
        let body = json!({ "user_location": { "latitude": 10, "longitude": 10 } });
        assert!(recommend(&catalog, &request(body)).unwrap().is_empty());
    }

    #[test]
    fn test_destination_without_coordinates_does_not_fail_the_request() {
        let mut unmapped = record("X", 0.0, 0.0, BudgetTier::Budget);
        unmapped.longitude = None;
        let catalog = Catalog::from_records(vec![unmapped, record("X", 0.0, 2.0, BudgetTier::Budget)]);
        let body = json!({ "user_location": { "country": "X", "latitude": 0, "longitude": 0 } });

        let results = recommend(&catalog, &request(body)).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 1);
        assert!(results[1].distance_km.is_nan());
    }

    #[test]
    fn test_non_text_country_is_a_computation_error() {
        let catalog = Catalog::from_records(vec![record("X", 0.0, 0.0, BudgetTier::Budget)]);
        let body = json!({ "user_location": { "country": 7, "latitude": 0, "longitude": 0 } });
        let err = recommend(&catalog, &request(body)).unwrap_err();
        assert!(matches!(err, AppError::Computation(_)));
    }
}
