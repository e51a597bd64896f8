//! Mood check-in results produced by the photo mood detector.

use serde::{Deserialize, Serialize};

/// Navigation state for the mood result view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodReading {
    /// Detected mood label. Empty when the detector gave none.
    #[serde(default)]
    pub mood: String,
    /// Detector confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub captured_image_url: Option<String>,
}

impl MoodReading {
    #[must_use]
    pub fn tone(&self) -> MoodTone {
        MoodTone::classify(&self.mood)
    }

    /// Confidence as a percentage with two decimals, e.g. `87.50%`.
    #[must_use]
    pub fn confidence_label(&self) -> Option<String> {
        self.confidence
            .filter(|c| c.is_finite())
            .map(|c| format!("{:.2}%", c * 100.0))
    }
}

/// Colour family for a detected mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodTone {
    Happy,
    Sad,
    Angry,
    Neutral,
    Other,
}

impl MoodTone {
    #[must_use]
    pub fn classify(mood: &str) -> Self {
        match mood.trim().to_ascii_lowercase().as_str() {
            "happy" => MoodTone::Happy,
            "sad" => MoodTone::Sad,
            "angry" => MoodTone::Angry,
            "neutral" => MoodTone::Neutral,
            _ => MoodTone::Other,
        }
    }
}
