use serde::{Deserialize, Serialize};

/// The actionable direction of a threshold-crossing alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    /// Overbought: the instrument is a shorting candidate.
    Short,
    /// Oversold: the instrument is a buying candidate.
    Buy,
}

impl AlertKind {
    /// Returns the human-readable signal title for this alert direction.
    pub fn title(&self) -> &'static str {
        match self {
            AlertKind::Short => "Overbought Signal (Short)",
            AlertKind::Buy => "Oversold Signal (Buy)",
        }
    }
}
