use crate::models::UrgencyLevel;

/// Words that escalate any description straight to an emergency
pub const EMERGENCY_WORDS: &[&str] = &["emergency", "urgent", "immediately", "asap", "dangerous"];

pub const HIGH_URGENCY_WORDS: &[&str] = &["broken", "not working", "stopped", "failed", "damaged"];

pub const MEDIUM_URGENCY_WORDS: &[&str] = &["slow", "intermittent", "sometimes", "occasionally"];

/// Classify how urgent a description is.
///
/// Checks run in priority order and the first hit wins: explicit emergency
/// words, the best category's emergency keywords, high urgency words, medium
/// urgency words. These are plain substring checks, not whole-word matches.
pub fn classify_urgency<S: AsRef<str>>(
    description: &str,
    category_emergency_keywords: &[S],
) -> UrgencyLevel {
    let text = description.to_lowercase();
    let mentions = |word: &str| text.contains(word);

    if EMERGENCY_WORDS.iter().any(|w| mentions(w)) {
        return UrgencyLevel::Emergency;
    }

    if category_emergency_keywords.iter().any(|k| mentions(k.as_ref())) {
        return UrgencyLevel::Emergency;
    }

    if HIGH_URGENCY_WORDS.iter().any(|w| mentions(w)) {
        return UrgencyLevel::High;
    }

    if MEDIUM_URGENCY_WORDS.iter().any(|w| mentions(w)) {
        return UrgencyLevel::Medium;
    }

    UrgencyLevel::Low
}
