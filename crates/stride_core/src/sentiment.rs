//! Simple keyword-based sentiment polarity.
//!
//! Default polarity source for the CLI; any external analyzer producing a
//! score in [-1.0, 1.0] can be substituted — the mood classifier only sees
//! the float.

const POSITIVE: &[&str] = &[
    "great", "good", "love", "excited", "happy", "awesome", "fun", "motivated", "thanks", "ready",
    "energized", "pumped", "!",
];

const NEGATIVE: &[&str] = &[
    "overwhelmed",
    "stressed",
    "tired",
    "hate",
    "anxious",
    "exhausted",
    "dread",
    "ugh",
    "worried",
    "sad",
    "awful",
    "terrible",
    "can't",
];

/// Score text polarity in [-1.0, 1.0] (negative to positive).
pub fn polarity(text: &str) -> f32 {
    let lower = text.to_lowercase();
    let pos = POSITIVE.iter().filter(|w| lower.contains(*w)).count() as f32;
    let neg = NEGATIVE.iter().filter(|w| lower.contains(*w)).count() as f32;

    (pos - neg) / (pos + neg + 1.0)
}
