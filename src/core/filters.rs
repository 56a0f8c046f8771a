use crate::models::{MatchFilters, ProviderRecord};

/// Check whether a provider passes every non-distance filter
///
/// This is the first stage of the matching pipeline; distance is checked
/// afterwards because it needs the requester location.
#[inline]
pub fn is_eligible(provider: &ProviderRecord, category: &str, filters: &MatchFilters) -> bool {
    provider.is_active
        && provider.offers(category)
        && meets_rating(provider, filters.min_rating)
        && within_rate(provider, filters.max_rate)
        && matches_availability(provider, filters.availability.as_deref())
}

/// A minimum rating of zero disables the check
#[inline]
pub fn meets_rating(provider: &ProviderRecord, min_rating: f64) -> bool {
    min_rating <= 0.0 || provider.average_rating >= min_rating
}

/// Providers without a published maximum rate always pass
#[inline]
pub fn within_rate(provider: &ProviderRecord, max_rate: Option<f64>) -> bool {
    match max_rate {
        Some(limit) if limit > 0.0 => provider
            .hourly_rate_max
            .map_or(true, |rate| rate <= limit),
        _ => true,
    }
}

#[inline]
pub fn matches_availability(provider: &ProviderRecord, availability: Option<&str>) -> bool {
    match availability {
        Some(wanted) if !wanted.is_empty() => provider.availability == wanted,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider(rating: f64, rate_max: Option<f64>, availability: &str) -> ProviderRecord {
        ProviderRecord {
            id: 1,
            name: "Quick Fix Plumbing".to_string(),
            business_name: None,
            email: "contact@quickfix.test".to_string(),
            phone: "(555) 123-4567".to_string(),
            address: "123 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            county: None,
            sub_county: None,
            ward: None,
            latitude: Some(39.7817),
            longitude: Some(-89.6501),
            categories: vec!["plumbing".to_string()],
            specialties: vec![],
            description: None,
            hourly_rate_min: Some(50.0),
            hourly_rate_max: rate_max,
            availability: availability.to_string(),
            average_rating: rating,
            total_reviews: 10,
            is_active: true,
            is_verified: true,
        }
    }

    #[test]
    fn test_eligible_with_default_filters() {
        let provider = create_test_provider(4.5, Some(120.0), "same_day");
        assert!(is_eligible(&provider, "plumbing", &MatchFilters::default()));
    }

    #[test]
    fn test_wrong_category_filtered() {
        let provider = create_test_provider(4.5, Some(120.0), "same_day");
        assert!(!is_eligible(&provider, "electrical", &MatchFilters::default()));
        assert!(!is_eligible(&provider, "", &MatchFilters::default()));
    }

    #[test]
    fn test_inactive_provider_filtered() {
        let mut provider = create_test_provider(4.5, Some(120.0), "same_day");
        provider.is_active = false;
        assert!(!is_eligible(&provider, "plumbing", &MatchFilters::default()));
    }

    #[test]
    fn test_rating_is_inclusive() {
        assert!(meets_rating(&create_test_provider(4.0, None, "same_day"), 4.0));
        assert!(!meets_rating(&create_test_provider(3.9, None, "same_day"), 4.0));
        assert!(meets_rating(&create_test_provider(0.0, None, "same_day"), 0.0));
    }

    #[test]
    fn test_rate_limit() {
        assert!(within_rate(&create_test_provider(4.0, Some(100.0), "same_day"), Some(100.0)));
        assert!(!within_rate(&create_test_provider(4.0, Some(150.0), "same_day"), Some(100.0)));
        // unset maximum rate passes
        assert!(within_rate(&create_test_provider(4.0, None, "same_day"), Some(100.0)));
        // a zero limit means no limit
        assert!(within_rate(&create_test_provider(4.0, Some(150.0), "same_day"), Some(0.0)));
    }

    #[test]
    fn test_availability_exact() {
        let provider = create_test_provider(4.0, None, "same_day");
        assert!(matches_availability(&provider, Some("same_day")));
        assert!(!matches_availability(&provider, Some("within_week")));
        assert!(matches_availability(&provider, None));
    }
}
