//! Polarity-to-mood mapping and per-mood behavioral instructions.
//!
//! The instruction templates are static configuration consumed by the
//! downstream decomposition step; they are reproduced verbatim so generation
//! behavior stays stable across releases.

use serde::{Deserialize, Serialize};

/// Coarse emotional category derived from a sentiment polarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Stressed,
    Neutral,
    Excited,
}

const STRESSED_INSTRUCTION: &str = "The user seems overwhelmed, stressed, or negative. \
Adhere to 'Empathy First' protocol: \n\
1. Validate their feelings immediately (e.g., 'I hear that this is tough'). \n\
2. Do NOT be overly cheerful or robotic. \n\
3. Break tasks down into TINY, non-intimidating micro-steps. \n\
4. Suggest a 'quick win' task first.";

const EXCITED_INSTRUCTION: &str = "The user seems excited, energetic, or positive. \
Match their energy! \n\
1. Be encouraging and enthusiastic. \n\
2. Suggest ambitious but achievable milestones. \n\
3. Use emojis and high-energy language.";

const NEUTRAL_INSTRUCTION: &str = "The user's tone is neutral or practical. \
Be efficient, clear, and supportive without being overbearing.";

impl Mood {
    /// Threshold mapping over polarity in [-1.0, 1.0]. Boundaries are strict:
    /// exactly ±0.3 resolves to Neutral.
    pub fn from_polarity(polarity: f32) -> Self {
        if polarity < -0.3 {
            Mood::Stressed
        } else if polarity > 0.3 {
            Mood::Excited
        } else {
            Mood::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Stressed => "stressed",
            Mood::Neutral => "neutral",
            Mood::Excited => "excited",
        }
    }

    /// The hand-authored behavioral instruction for this mood.
    pub fn instruction(&self) -> &'static str {
        match self {
            Mood::Stressed => STRESSED_INSTRUCTION,
            Mood::Excited => EXCITED_INSTRUCTION,
            Mood::Neutral => NEUTRAL_INSTRUCTION,
        }
    }
}

/// Classification result: polarity echoed back with mood and instruction.
#[derive(Debug, Clone, Serialize)]
pub struct MoodReading {
    pub polarity: f32,
    pub mood: Mood,
    pub instruction: &'static str,
}

/// Total function over the polarity domain; no error conditions.
pub fn classify(polarity: f32) -> MoodReading {
    let mood = Mood::from_polarity(polarity);
    MoodReading {
        polarity,
        mood,
        instruction: mood.instruction(),
    }
}
