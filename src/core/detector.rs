use std::sync::Arc;

use regex::Regex;

use crate::core::taxonomy::{Taxonomy, TaxonomyError};
use crate::core::urgency::classify_urgency;
use crate::models::{CategorySuggestion, ProblemDetectionResult, ServiceCategory};

/// Points for each distinct normal keyword found
const KEYWORD_POINTS: u32 = 1;

/// Points for each distinct emergency keyword found
const EMERGENCY_POINTS: u32 = 3;

/// Prefix marking emergency hits in the matched keyword list
pub const EMERGENCY_PREFIX: &str = "EMERGENCY: ";

/// Tunables for confidence and clarification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorSettings {
    /// Score at which confidence saturates at 1.0
    pub confidence_divisor: f64,
    /// Top confidence below this asks the user to clarify
    pub clarification_threshold: f64,
    pub max_suggestions: usize,
}

impl DetectorSettings {
    pub fn validate(&self) -> Result<(), TaxonomyError> {
        if self.confidence_divisor.is_nan() || self.confidence_divisor <= 0.0 {
            return Err(TaxonomyError::InvalidSettings("confidence_divisor must be positive"));
        }
        if self.max_suggestions == 0 {
            return Err(TaxonomyError::InvalidSettings("max_suggestions must be at least 1"));
        }
        Ok(())
    }
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            confidence_divisor: 5.0,
            clarification_threshold: 0.6,
            max_suggestions: 3,
        }
    }
}

#[derive(Debug, Clone)]
struct KeywordPattern {
    keyword: String,
    pattern: Regex,
}

impl KeywordPattern {
    fn compile(keyword: &str) -> Result<Self, TaxonomyError> {
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword)))?;
        Ok(Self {
            keyword: keyword.to_string(),
            pattern,
        })
    }

    #[inline]
    fn is_found_in(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

#[derive(Debug, Clone)]
struct CompiledProfile {
    category: ServiceCategory,
    keywords: Vec<KeywordPattern>,
    emergency_keywords: Vec<KeywordPattern>,
}

/// Per-category outcome of a keyword scan
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub category: ServiceCategory,
    pub score: u32,
    pub keywords_found: Vec<String>,
}

/// Rule-based detector mapping free text to service categories
///
/// Keyword patterns are compiled once from the taxonomy; `detect` is pure and
/// can be called concurrently.
#[derive(Debug, Clone)]
pub struct ProblemDetector {
    taxonomy: Arc<Taxonomy>,
    profiles: Vec<CompiledProfile>,
    settings: DetectorSettings,
}

impl ProblemDetector {
    pub fn new(taxonomy: Arc<Taxonomy>, settings: DetectorSettings) -> Result<Self, TaxonomyError> {
        settings.validate()?;

        let profiles = taxonomy
            .profiles()
            .iter()
            .map(|profile| {
                Ok(CompiledProfile {
                    category: profile.category,
                    keywords: compile_all(&profile.keywords)?,
                    emergency_keywords: compile_all(&profile.emergency_keywords)?,
                })
            })
            .collect::<Result<Vec<_>, TaxonomyError>>()?;

        Ok(Self {
            taxonomy,
            profiles,
            settings,
        })
    }

    /// Detector over the built-in home services taxonomy
    pub fn with_default_taxonomy() -> Result<Self, TaxonomyError> {
        Self::new(Arc::new(Taxonomy::home_services()), DetectorSettings::default())
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Score every category against the description, in taxonomy order
    pub fn score(&self, description: &str) -> Vec<CategoryScore> {
        let text = description.to_lowercase();

        self.profiles
            .iter()
            .map(|profile| {
                let mut score = 0;
                let mut keywords_found = Vec::new();

                for keyword in &profile.keywords {
                    if keyword.is_found_in(&text) {
                        score += KEYWORD_POINTS;
                        keywords_found.push(keyword.keyword.clone());
                    }
                }

                for keyword in &profile.emergency_keywords {
                    if keyword.is_found_in(&text) {
                        score += EMERGENCY_POINTS;
                        keywords_found.push(format!("{}{}", EMERGENCY_PREFIX, keyword.keyword));
                    }
                }

                CategoryScore {
                    category: profile.category,
                    score,
                    keywords_found,
                }
            })
            .collect()
    }

    /// Detect the most likely service categories and the urgency of a description
    pub fn detect(&self, description: &str) -> ProblemDetectionResult {
        let mut scores = self.score(description);

        // Stable sort keeps taxonomy order among equal scores
        scores.sort_by(|a, b| b.score.cmp(&a.score));

        let best = scores.first().filter(|s| s.score > 0);

        let (best_category, confidence, suggestions) = match best {
            Some(best) => {
                let suggestions: Vec<CategorySuggestion> = scores
                    .iter()
                    .take(self.settings.max_suggestions)
                    .filter(|s| s.score > 0)
                    .map(|s| CategorySuggestion {
                        category: s.category,
                        confidence: self.confidence(s.score),
                        reasoning: format!("Found {} relevant keywords", s.score),
                        keywords_found: s.keywords_found.clone(),
                    })
                    .collect();

                (best.category, self.confidence(best.score), suggestions)
            }
            None => (
                ServiceCategory::Unknown,
                0.0,
                vec![CategorySuggestion {
                    category: ServiceCategory::Unknown,
                    confidence: 0.0,
                    reasoning: "No specific keywords found".to_string(),
                    keywords_found: Vec::new(),
                }],
            ),
        };

        // With no hits the first declared category still supplies emergency keywords,
        // which are matched as substrings ("overflowed" escalates via "overflow")
        let emergency_keywords: &[String] = scores
            .first()
            .and_then(|s| self.taxonomy.profile(s.category))
            .map(|p| p.emergency_keywords.as_slice())
            .unwrap_or(&[]);
        let urgency_level = classify_urgency(description, emergency_keywords);

        tracing::debug!(
            category = %best_category,
            confidence,
            urgency = %urgency_level,
            "Detected problem category"
        );

        ProblemDetectionResult {
            suggested_categories: suggestions,
            urgency_level,
            analysis_summary: format!(
                "Best match: {} ({:.0}% confidence)",
                best_category,
                confidence * 100.0
            ),
            needs_clarification: confidence < self.settings.clarification_threshold,
        }
    }

    #[inline]
    fn confidence(&self, score: u32) -> f64 {
        (score as f64 / self.settings.confidence_divisor).min(1.0)
    }
}

fn compile_all(keywords: &[String]) -> Result<Vec<KeywordPattern>, TaxonomyError> {
    keywords.iter().map(|k| KeywordPattern::compile(k)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::taxonomy::CategoryKeywordProfile;
    use crate::models::UrgencyLevel;

    fn detector() -> ProblemDetector {
        ProblemDetector::with_default_taxonomy().unwrap()
    }

    fn custom_detector(profiles: Vec<CategoryKeywordProfile>) -> ProblemDetector {
        let taxonomy = Taxonomy::new(profiles, Vec::new()).unwrap();
        ProblemDetector::new(Arc::new(taxonomy), DetectorSettings::default()).unwrap()
    }

    fn profile(category: ServiceCategory, keywords: &[&str], emergency: &[&str]) -> CategoryKeywordProfile {
        CategoryKeywordProfile {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            emergency_keywords: emergency.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_description() {
        let result = detector().detect("");

        assert_eq!(result.suggested_categories.len(), 1);
        assert_eq!(result.top_category(), ServiceCategory::Unknown);
        assert_eq!(result.top_confidence(), 0.0);
        assert!(result.suggested_categories[0].keywords_found.is_empty());
        assert_eq!(result.suggested_categories[0].reasoning, "No specific keywords found");
        assert_eq!(result.urgency_level, UrgencyLevel::Low);
        assert!(result.needs_clarification);
        assert_eq!(result.analysis_summary, "Best match: unknown (0% confidence)");
    }

    #[test]
    fn test_whole_word_matching() {
        let result = detector().detect("I want a tapestry hung");
        let plumbing = result
            .suggested_categories
            .iter()
            .find(|s| s.category == ServiceCategory::Plumbing);
        assert!(plumbing.is_none());
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let d = custom_detector(vec![profile(ServiceCategory::Plumbing, &["tap"], &[])]);
        let scores = d.score("tap tap TAP");
        assert_eq!(scores[0].score, 1);
        assert_eq!(scores[0].keywords_found, vec!["tap"]);
    }

    #[test]
    fn test_emergency_keywords_weigh_three() {
        let d = custom_detector(vec![profile(ServiceCategory::Plumbing, &["pipe"], &["burst"])]);
        let scores = d.score("the pipe burst");
        assert_eq!(scores[0].score, 4);
        assert_eq!(scores[0].keywords_found, vec!["pipe", "EMERGENCY: burst"]);
    }

    #[test]
    fn test_confidence_saturates() {
        let d = custom_detector(vec![profile(
            ServiceCategory::Painting,
            &["paint", "primer", "brush", "roller", "painter", "ceiling"],
            &[],
        )]);

        let two = d.detect("paint and primer");
        assert!((two.top_confidence() - 0.4).abs() < 1e-9);
        assert!(two.needs_clarification);

        let six = d.detect("painter with paint, primer, brush, roller for the ceiling");
        assert_eq!(six.top_confidence(), 1.0);
        assert!(!six.needs_clarification);
    }

    #[test]
    fn test_tie_resolves_to_declaration_order() {
        let d = custom_detector(vec![
            profile(ServiceCategory::Flooring, &["tile"], &[]),
            profile(ServiceCategory::Roofing, &["gutter"], &[]),
        ]);

        let result = d.detect("tile and gutter");
        assert_eq!(result.suggested_categories.len(), 2);
        assert_eq!(result.suggested_categories[0].category, ServiceCategory::Flooring);
        assert_eq!(result.suggested_categories[1].category, ServiceCategory::Roofing);
    }

    #[test]
    fn test_at_most_three_suggestions() {
        let result = detector().detect(
            "water leak near the outlet, the furnace is loud and there is a cockroach",
        );
        assert!(result.suggested_categories.len() <= 3);

        let scores: Vec<f64> = result.suggested_categories.iter().map(|s| s.confidence).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_toilet_overflow_emergency() {
        let result = detector()
            .detect("My toilet is overflowing and water is everywhere, this is an emergency!");

        assert_eq!(result.top_category(), ServiceCategory::Plumbing);
        assert_eq!(result.urgency_level, UrgencyLevel::Emergency);
    }

    #[test]
    fn test_category_emergency_keyword_sets_urgency() {
        let result = detector().detect("we have sewage backup in the basement bathroom");
        assert_eq!(result.top_category(), ServiceCategory::Plumbing);
        assert_eq!(result.urgency_level, UrgencyLevel::Emergency);
    }

    #[test]
    fn test_unmatched_description_uses_first_category_emergency_keywords() {
        let result = detector().detect("the basin overflowed");
        assert_eq!(result.top_category(), ServiceCategory::Unknown);
        assert_eq!(result.urgency_level, UrgencyLevel::Emergency);

        let result = detector().detect("my tank is bursting");
        assert_eq!(result.top_category(), ServiceCategory::Unknown);
        assert_eq!(result.urgency_level, UrgencyLevel::Emergency);
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let taxonomy = Arc::new(Taxonomy::home_services());

        let no_suggestions = DetectorSettings { max_suggestions: 0, ..DetectorSettings::default() };
        assert!(matches!(
            ProblemDetector::new(taxonomy.clone(), no_suggestions),
            Err(TaxonomyError::InvalidSettings(_))
        ));

        let zero_divisor = DetectorSettings { confidence_divisor: 0.0, ..DetectorSettings::default() };
        assert!(matches!(
            ProblemDetector::new(taxonomy, zero_divisor),
            Err(TaxonomyError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_high_urgency() {
        let result = detector().detect("my dishwasher is broken");
        assert_eq!(result.top_category(), ServiceCategory::ApplianceRepair);
        assert_eq!(result.urgency_level, UrgencyLevel::High);
    }

    #[test]
    fn test_summary_format() {
        let d = custom_detector(vec![profile(ServiceCategory::Cleaning, &["maid", "mop", "dust"], &[])]);
        let result = d.detect("need a maid to mop");
        assert_eq!(result.analysis_summary, "Best match: cleaning (40% confidence)");
        assert_eq!(result.suggested_categories[0].reasoning, "Found 2 relevant keywords");
    }
}
