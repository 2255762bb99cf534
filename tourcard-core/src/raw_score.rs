//! Raw hole scores as entered on the card
//!
//! Scores are typed live on a phone, so parsing never fails: anything that
//! is not a whole, non-negative stroke count or a pickup marker is `Blank`.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marker written for a conceded hole
pub const PICKUP_MARKER: &str = "P";

/// One hole's entry on a scorecard
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RawScore {
    /// Strokes taken
    Strokes(u32),
    /// Hole conceded, recorded but worth 0 points
    Pickup,
    /// Nothing entered yet
    #[default]
    Blank,
}

impl RawScore {
    /// True for any recorded entry (strokes or pickup)
    pub fn is_recorded(&self) -> bool {
        !matches!(self, RawScore::Blank)
    }

    /// Stroke count, if one was entered
    pub fn strokes(&self) -> Option<u32> {
        match self {
            RawScore::Strokes(n) => Some(*n),
            _ => None,
        }
    }

    /// Parse free text from a score cell
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return RawScore::Blank;
        }
        if is_pickup_marker(text) {
            return RawScore::Pickup;
        }
        match text.parse::<u32>() {
            Ok(n) => RawScore::Strokes(n),
            Err(_) => RawScore::Blank,
        }
    }

    /// Interpret an arbitrary JSON cell value
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    return u32::try_from(u).map(RawScore::Strokes).unwrap_or_default();
                }
                match n.as_f64() {
                    Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
                        RawScore::Strokes(f as u32)
                    }
                    _ => RawScore::Blank,
                }
            }
            Value::String(s) => RawScore::parse(s),
            _ => RawScore::Blank,
        }
    }
}

fn is_pickup_marker(text: &str) -> bool {
    ["p", "pu", "pickup", "pick up"]
        .iter()
        .any(|marker| text.eq_ignore_ascii_case(marker))
}

impl Serialize for RawScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawScore::Strokes(n) => serializer.serialize_u32(*n),
            RawScore::Pickup => serializer.serialize_str(PICKUP_MARKER),
            RawScore::Blank => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for RawScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().map(RawScore::from_json).unwrap_or_default())
    }
}
