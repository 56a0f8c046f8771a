use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Closed set of service categories a problem can be routed to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceCategory {
    // Home systems
    Plumbing,
    Electrical,
    Hvac,

    // Home improvement
    Construction,
    Carpentry,
    Painting,
    Flooring,
    Roofing,

    // Home services
    Cleaning,
    Landscaping,
    PestControl,

    // Repairs & maintenance
    ApplianceRepair,
    GeneralMaintenance,

    Unknown,
}

/// Urgency of a reported problem, ordered from least to most urgent
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Emergency,
}

/// A ranked category guess for a problem description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySuggestion {
    pub category: ServiceCategory,
    pub confidence: f64,
    pub reasoning: String,
    #[serde(rename = "keywordsFound")]
    pub keywords_found: Vec<String>,
}

/// Outcome of running the detector over one description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetectionResult {
    #[serde(rename = "suggestedCategories")]
    pub suggested_categories: Vec<CategorySuggestion>,
    #[serde(rename = "urgencyLevel")]
    pub urgency_level: UrgencyLevel,
    #[serde(rename = "analysisSummary")]
    pub analysis_summary: String,
    #[serde(rename = "needsClarification")]
    pub needs_clarification: bool,
}

impl ProblemDetectionResult {
    /// The highest ranked suggestion. Detection always yields at least one.
    pub fn top(&self) -> Option<&CategorySuggestion> {
        self.suggested_categories.first()
    }

    pub fn top_category(&self) -> ServiceCategory {
        self.top()
            .map(|s| s.category)
            .unwrap_or(ServiceCategory::Unknown)
    }

    pub fn top_confidence(&self) -> f64 {
        self.top().map(|s| s.confidence).unwrap_or(0.0)
    }
}

/// Service provider as supplied by the provider store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub id: i64,
    pub name: String,
    #[serde(rename = "businessName", alias = "business_name", default)]
    pub business_name: Option<String>,
    pub email: String,
    pub phone: String,

    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(rename = "zipCode", alias = "zip_code", default)]
    pub zip_code: String,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(rename = "subCounty", alias = "sub_county", default)]
    pub sub_county: Option<String>,
    #[serde(default)]
    pub ward: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(default, deserialize_with = "deserialize_tags")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "hourlyRateMin", alias = "hourly_rate_min", default)]
    pub hourly_rate_min: Option<f64>,
    #[serde(rename = "hourlyRateMax", alias = "hourly_rate_max", default)]
    pub hourly_rate_max: Option<f64>,
    #[serde(default = "default_availability")]
    pub availability: String,

    #[serde(rename = "averageRating", alias = "average_rating", default)]
    pub average_rating: f64,
    #[serde(rename = "totalReviews", alias = "total_reviews", default)]
    pub total_reviews: u32,

    #[serde(rename = "isActive", alias = "is_active", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "isVerified", alias = "is_verified", default)]
    pub is_verified: bool,
}

impl ProviderRecord {
    /// Exact tag membership; the category is compared case-insensitively
    pub fn offers(&self, category: &str) -> bool {
        let wanted = category.trim();
        !wanted.is_empty()
            && self
                .categories
                .iter()
                .any(|tag| tag.trim().eq_ignore_ascii_case(wanted))
    }

    pub fn display_business_name(&self) -> &str {
        match self.business_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.name,
        }
    }

    pub fn formatted_address(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address, self.city, self.state, self.zip_code
        )
    }
}

fn default_true() -> bool { true }

fn default_availability() -> String { "within_week".to_string() }

/// Tags arrive either as a real list or as a JSON-encoded list stored in a string column.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTags {
        List(Vec<String>),
        Encoded(String),
    }

    let raw: Option<RawTags> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => Vec::new(),
        Some(RawTags::List(tags)) => tags,
        Some(RawTags::Encoded(encoded)) => parse_encoded_tags(&encoded),
    })
}

/// Parse a tag string such as `["plumbing", "hvac"]`, falling back to a comma list
pub fn parse_encoded_tags(encoded: &str) -> Vec<String> {
    let trimmed = encoded.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<String>>(trimmed) {
        Ok(tags) => tags,
        Err(_) => trimmed
            .split(',')
            .map(|tag| tag.trim().trim_matches('"').to_string())
            .filter(|tag| !tag.is_empty())
            .collect(),
    }
}

/// Provider projection returned to clients, with computed distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedProvider {
    pub id: i64,
    pub name: String,
    #[serde(rename = "businessName")]
    pub business_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "distanceMiles")]
    pub distance_miles: f64,
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    #[serde(rename = "totalReviews")]
    pub total_reviews: u32,
    #[serde(rename = "hourlyRateMin")]
    pub hourly_rate_min: f64,
    #[serde(rename = "hourlyRateMax")]
    pub hourly_rate_max: f64,
    pub availability: String,
    pub specialties: Vec<String>,
    pub description: String,
}

impl MatchedProvider {
    pub fn from_record(record: &ProviderRecord, distance_miles: f64) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            business_name: record.display_business_name().to_string(),
            phone: record.phone.clone(),
            email: record.email.clone(),
            address: record.formatted_address(),
            city: record.city.clone(),
            state: record.state.clone(),
            distance_miles,
            average_rating: record.average_rating,
            total_reviews: record.total_reviews,
            hourly_rate_min: record.hourly_rate_min.unwrap_or(0.0),
            hourly_rate_max: record.hourly_rate_max.unwrap_or(0.0),
            availability: record.availability.clone(),
            specialties: record.specialties.clone(),
            description: record.description.clone().unwrap_or_default(),
        }
    }
}

/// Optional constraints applied when matching providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchFilters {
    #[serde(rename = "maxDistance")]
    pub max_distance: f64,
    #[serde(rename = "minRating")]
    pub min_rating: f64,
    #[serde(rename = "maxRate")]
    pub max_rate: Option<f64>,
    pub availability: Option<String>,
}

impl Default for MatchFilters {
    fn default() -> Self {
        Self {
            max_distance: 50.0,
            min_rating: 0.0,
            max_rate: None,
            availability: None,
        }
    }
}

/// Detection outcome kept between the detect and find-providers calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemSession {
    pub problem_description: String,
    pub ai_suggested_category: ServiceCategory,
    pub final_category: ServiceCategory,
    pub confidence: f64,
    pub urgency_level: UrgencyLevel,
    pub user_id: Option<String>,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_string_forms() {
        assert_eq!(ServiceCategory::PestControl.to_string(), "pest_control");
        assert_eq!(
            ServiceCategory::from_str("appliance_repair").unwrap(),
            ServiceCategory::ApplianceRepair
        );
        assert!(ServiceCategory::from_str("tapestry").is_err());

        let json = serde_json::to_string(&ServiceCategory::Hvac).unwrap();
        assert_eq!(json, "\"hvac\"");
    }

    #[test]
    fn test_urgency_ordering() {
        assert!(UrgencyLevel::Emergency > UrgencyLevel::High);
        assert!(UrgencyLevel::Medium > UrgencyLevel::Low);
        assert_eq!(UrgencyLevel::Emergency.to_string(), "emergency");
    }

    #[test]
    fn test_tags_from_encoded_string() {
        let record: ProviderRecord = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Quick Fix",
            "email": "a@b.com",
            "phone": "555",
            "categories": "[\"plumbing\", \"hvac\"]",
            "specialties": null
        }))
        .unwrap();

        assert_eq!(record.categories, vec!["plumbing", "hvac"]);
        assert!(record.specialties.is_empty());
        assert!(record.is_active);
        assert_eq!(record.availability, "within_week");
    }

    #[test]
    fn test_tags_from_list() {
        let record: ProviderRecord = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "SafeWire",
            "email": "c@d.com",
            "phone": "555",
            "categories": ["electrical"]
        }))
        .unwrap();

        assert!(record.offers("electrical"));
        assert!(!record.offers("elec"));
    }

    #[test]
    fn test_comma_separated_fallback() {
        assert_eq!(parse_encoded_tags("plumbing, hvac"), vec!["plumbing", "hvac"]);
        assert!(parse_encoded_tags("  ").is_empty());
    }

    #[test]
    fn test_tag_membership_is_exact() {
        let mut record: ProviderRecord = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Vent Shop",
            "email": "e@f.com",
            "phone": "555",
            "categories": ["hvaccessories"]
        }))
        .unwrap();

        assert!(!record.offers("hvac"));
        record.categories.push("HVAC".to_string());
        assert!(record.offers("hvac"));
    }
}
