//! The fixed self-assessment question catalog.
//!
//! Each entry pairs the payload field name with the prompt shown to the user.
//! Keeping both in one table means prompt order and field order cannot drift
//! apart; the scoring backend reads fields by name but was trained on this order.

/// One yes/no question and the payload field it feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub field: &'static str,
    pub prompt: &'static str,
}

impl Question {
    const fn new(field: &'static str, prompt: &'static str) -> Self {
        Self { field, prompt }
    }
}

/// Number of yes/no questions in the catalog.
pub const QUESTION_COUNT: usize = 19;

pub const QUESTION_CATALOG: [Question; QUESTION_COUNT] = [
    Question::new("panic", "Do you often feel panicked?"),
    Question::new(
        "sweating",
        "Do you experience excessive sweating (without physical cause)?",
    ),
    Question::new(
        "concentration_trouble",
        "Do you have difficulty concentrating?",
    ),
    Question::new(
        "work_trouble",
        "Are you having trouble with work or daily activities?",
    ),
    Question::new("hopelessness", "Have you felt hopeless lately?"),
    Question::new("anger", "Do you often feel angry without a clear reason?"),
    Question::new(
        "over_react",
        "Do you feel your reactions to situations are overly exaggerated?",
    ),
    Question::new("eating_change", "Has your eating pattern changed unusually?"),
    Question::new("suicidal_thought", "Have you ever had thoughts of suicide?"),
    Question::new(
        "tired",
        "Do you feel constantly fatigued without a physical reason?",
    ),
    Question::new(
        "weight_gain",
        "Has your weight increased significantly without an apparent cause?",
    ),
    Question::new(
        "introvert",
        "Do you feel like withdrawing or becoming very introverted?",
    ),
    Question::new("nightmares", "Do you often experience nightmares?"),
    Question::new(
        "avoids_people_activities",
        "Do you avoid people or social activities you used to enjoy?",
    ),
    Question::new(
        "negative_feeling",
        "Do you frequently feel negative about yourself?",
    ),
    Question::new("self_blaming", "Do you often blame yourself for small things?"),
    Question::new(
        "hallucinations",
        "Have you ever experienced hallucinations (seeing or hearing things that aren't real)?",
    ),
    Question::new(
        "repetitive_behaviour",
        "Do you engage in repetitive behaviors that are hard to control?",
    ),
    Question::new(
        "increased_energy",
        "Do you feel unusually energetic (hyperactive)?",
    ),
];

/// Index of the final question.
pub const LAST_QUESTION_INDEX: usize = QUESTION_COUNT - 1;

#[must_use]
pub fn question(index: usize) -> Option<&'static Question> {
    QUESTION_CATALOG.get(index)
}

/// Field names in payload order.
pub fn field_names() -> impl Iterator<Item = &'static str> {
    QUESTION_CATALOG.iter().map(|q| q.field)
}
