use crate::models::{ServiceCategory, UrgencyLevel};

/// What the client should expect after a detection, by urgency
pub fn next_steps(urgency: UrgencyLevel) -> Vec<String> {
    let steps: &[&str] = match urgency {
        UrgencyLevel::Emergency => &[
            "Emergency professionals will contact you within 30 minutes",
            "If no response, call emergency services",
            "Document the issue with photos if safe to do so",
        ],
        UrgencyLevel::High => &[
            "Priority professionals will respond within 2 hours",
            "Get quotes from multiple professionals",
            "Schedule service within 24-48 hours",
        ],
        UrgencyLevel::Medium | UrgencyLevel::Low => &[
            "Review recommended professionals",
            "Contact professionals for quotes",
            "Schedule service appointments",
        ],
    };

    steps.iter().map(|s| s.to_string()).collect()
}

/// Follow-up questions that help narrow down a problem in the given category
pub fn follow_up_questions(category: ServiceCategory) -> Vec<String> {
    let questions: &[&str] = match category {
        ServiceCategory::Plumbing => &[
            "Where exactly is the water issue located?",
            "How long has this problem been occurring?",
            "Is there any visible water damage?",
            "What is the water pressure like?",
            "Are multiple fixtures affected?",
        ],
        ServiceCategory::Electrical => &[
            "Which room or area is affected?",
            "When did you first notice this issue?",
            "Are there any burning smells or sparks?",
            "How many outlets/switches are affected?",
            "When was your electrical system last inspected?",
        ],
        ServiceCategory::Hvac => &[
            "What type of heating/cooling system do you have?",
            "What temperature issues are you experiencing?",
            "When was your system last serviced?",
            "Are all rooms affected equally?",
            "Do you hear any unusual noises?",
        ],
        ServiceCategory::Cleaning => &[
            "What type of cleaning service do you need?",
            "How large is the area to be cleaned?",
            "Do you have any specific cleaning preferences?",
            "How often would you like cleaning service?",
            "Are there any special requirements or restrictions?",
        ],
        ServiceCategory::PestControl => &[
            "What type of pests have you seen?",
            "Where have you noticed pest activity?",
            "How long have you been seeing pests?",
            "Have you tried any treatments already?",
            "Do you have pets or small children?",
        ],
        ServiceCategory::Construction => &[
            "What type of construction work do you need?",
            "What is your estimated timeline?",
            "Do you have permits or need help obtaining them?",
            "What is your approximate budget range?",
            "Do you have architectural plans or designs?",
        ],
        _ => &[
            "Can you provide more details about the issue?",
            "When did this problem start?",
            "Have you attempted any fixes?",
            "How urgent is this repair?",
            "Do you have any preferences for timing?",
        ],
    };

    questions.iter().map(|q| q.to_string()).collect()
}
