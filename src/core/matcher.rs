use crate::core::{
    distance::{distance_between, round_to_tenth, GeoPoint},
    filters::is_eligible,
};
use crate::models::{MatchFilters, MatchedProvider, ProviderRecord};

/// Provider matching orchestrator
///
/// # Pipeline Stages
/// 1. Eligibility: active, offers the category, rating, rate and availability
/// 2. Distance from the requester, dropping anything outside `max_distance`
/// 3. Stable sort by distance, nearest first
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderMatcher;

impl ProviderMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Find providers for a category, ranked by distance from the requester
    ///
    /// # Arguments
    /// * `requester` - Requester location; when absent every provider is reported at 0.0
    ///   miles and nobody is dropped on distance
    /// * `category` - Category identifier the provider must offer
    /// * `filters` - Rating, rate, availability and radius constraints
    /// * `candidates` - Providers from the store
    pub fn find_providers(
        &self,
        requester: Option<GeoPoint>,
        category: &str,
        filters: &MatchFilters,
        candidates: &[ProviderRecord],
    ) -> Vec<MatchedProvider> {
        let mut matched: Vec<MatchedProvider> = candidates
            .iter()
            // Stage 1: Eligibility
            .filter(|provider| is_eligible(provider, category, filters))
            // Stage 2: Distance
            .filter_map(|provider| {
                let distance_miles = match requester {
                    Some(origin) => {
                        let location = GeoPoint::from_parts(provider.latitude, provider.longitude);
                        let distance = distance_between(Some(origin), location);
                        if !distance.is_within(filters.max_distance) {
                            return None;
                        }
                        distance.known()?
                    }
                    None => 0.0,
                };

                Some(MatchedProvider::from_record(provider, round_to_tenth(distance_miles)))
            })
            .collect();

        // Stage 3: Nearest first; sort_by is stable so ties keep candidate order
        matched.sort_by(|a, b| {
            a.distance_miles
                .partial_cmp(&b.distance_miles)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::debug!(
            category,
            candidates = candidates.len(),
            matched = matched.len(),
            "Matched providers"
        );

        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Springfield, IL
    const ORIGIN: GeoPoint = GeoPoint { latitude: 39.7817, longitude: -89.6501 };

    fn create_candidate(id: i64, category: &str, lat: Option<f64>, lon: Option<f64>) -> ProviderRecord {
        ProviderRecord {
            id,
            name: format!("Provider {}", id),
            business_name: None,
            email: format!("provider{}@test.com", id),
            phone: "(555) 000-0000".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            county: None,
            sub_county: None,
            ward: None,
            latitude: lat,
            longitude: lon,
            categories: vec![category.to_string()],
            specialties: vec![],
            description: None,
            hourly_rate_min: None,
            hourly_rate_max: None,
            availability: "same_day".to_string(),
            average_rating: 4.5,
            total_reviews: 12,
            is_active: true,
            is_verified: true,
        }
    }

    #[test]
    fn test_find_providers_basic() {
        let matcher = ProviderMatcher::new();
        let candidates = vec![
            create_candidate(1, "plumbing", Some(39.79), Some(-89.64)),
            create_candidate(2, "electrical", Some(39.79), Some(-89.64)),
        ];

        let result = matcher.find_providers(Some(ORIGIN), "plumbing", &MatchFilters::default(), &candidates);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_sorted_by_distance() {
        let matcher = ProviderMatcher::new();
        let candidates = vec![
            create_candidate(1, "plumbing", Some(39.95), Some(-89.65)),
            create_candidate(2, "plumbing", Some(39.80), Some(-89.65)),
            create_candidate(3, "plumbing", Some(39.85), Some(-89.65)),
        ];

        let result = matcher.find_providers(Some(ORIGIN), "plumbing", &MatchFilters::default(), &candidates);

        let ids: Vec<i64> = result.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_distance_filtering() {
        let matcher = ProviderMatcher::new();
        let candidates = vec![
            create_candidate(1, "plumbing", Some(39.79), Some(-89.64)),  // under a mile
            create_candidate(2, "plumbing", Some(41.88), Some(-87.63)),  // Chicago, ~180mi
        ];

        let result = matcher.find_providers(Some(ORIGIN), "plumbing", &MatchFilters::default(), &candidates);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_provider_without_location_dropped() {
        let matcher = ProviderMatcher::new();
        let candidates = vec![create_candidate(1, "plumbing", None, None)];
        let filters = MatchFilters { max_distance: 10_000.0, ..MatchFilters::default() };

        let result = matcher.find_providers(Some(ORIGIN), "plumbing", &filters, &candidates);

        assert!(result.is_empty());
    }

    #[test]
    fn test_radius_is_inclusive() {
        let matcher = ProviderMatcher::new();
        let candidates = vec![create_candidate(1, "plumbing", Some(39.82), Some(-89.61))];
        let exact = crate::core::distance::haversine_miles(ORIGIN.latitude, ORIGIN.longitude, 39.82, -89.61);

        let at_edge = MatchFilters { max_distance: exact, ..MatchFilters::default() };
        assert_eq!(matcher.find_providers(Some(ORIGIN), "plumbing", &at_edge, &candidates).len(), 1);

        let inside_edge = MatchFilters { max_distance: exact - 0.01, ..MatchFilters::default() };
        assert!(matcher.find_providers(Some(ORIGIN), "plumbing", &inside_edge, &candidates).is_empty());
    }

    #[test]
    fn test_requester_without_location_keeps_everyone() {
        let matcher = ProviderMatcher::new();
        let candidates = vec![
            create_candidate(1, "plumbing", Some(41.88), Some(-87.63)),
            create_candidate(2, "plumbing", None, None),
        ];

        let result = matcher.find_providers(None, "plumbing", &MatchFilters::default(), &candidates);

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|p| p.distance_miles == 0.0));
        // ties keep candidate order
        assert_eq!(result[0].id, 1);
        assert_eq!(result[1].id, 2);
    }

    #[test]
    fn test_distance_rounded() {
        let matcher = ProviderMatcher::new();
        let candidates = vec![create_candidate(1, "plumbing", Some(39.82), Some(-89.61))];

        let result = matcher.find_providers(Some(ORIGIN), "plumbing", &MatchFilters::default(), &candidates);

        let d = result[0].distance_miles;
        assert_eq!(d, (d * 10.0).round() / 10.0);
    }
}
