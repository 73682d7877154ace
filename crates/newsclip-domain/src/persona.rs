//! Closed vocabularies for summarization requests

use serde::{Deserialize, Serialize};

/// Viewpoint applied to a persona summarization request.
///
/// The persona changes the prompt's framing, not the underlying algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Neutral summary of the page
    General,

    /// Marketing angle: strategy, audience, market trends
    Marketing,

    /// Developer angle: stack, implementation, architecture
    Dev,

    /// Business angle: model, opportunity, strategy
    Biz,
}

impl Persona {
    /// Get the persona name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::General => "general",
            Persona::Marketing => "marketing",
            Persona::Dev => "dev",
            Persona::Biz => "biz",
        }
    }

    /// Parse a persona from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "general" => Some(Persona::General),
            "marketing" => Some(Persona::Marketing),
            "dev" => Some(Persona::Dev),
            "biz" => Some(Persona::Biz),
            _ => None,
        }
    }
}

impl std::str::FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid persona: {}", s))
    }
}

/// Output mode for the single-endpoint summarize variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    /// Three-line summary plus keywords and insight
    Summary,

    /// Keyword extraction only, with a short insight
    Keywords,
}

impl SummaryMode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryMode::Summary => "summary",
            SummaryMode::Keywords => "keywords",
        }
    }

    /// Parse a mode from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "summary" => Some(SummaryMode::Summary),
            "keywords" => Some(SummaryMode::Keywords),
            _ => None,
        }
    }
}

impl std::str::FromStr for SummaryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid mode: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_round_trip() {
        for persona in [
            Persona::General,
            Persona::Marketing,
            Persona::Dev,
            Persona::Biz,
        ] {
            assert_eq!(Persona::parse(persona.as_str()), Some(persona));
        }
    }

    #[test]
    fn test_persona_rejects_unknown() {
        assert_eq!(Persona::parse("pirate"), None);
        assert!("pirate".parse::<Persona>().is_err());
    }

    #[test]
    fn test_persona_wire_format() {
        let json = serde_json::to_string(&Persona::Marketing).unwrap();
        assert_eq!(json, "\"marketing\"");
    }

    #[test]
    fn test_mode_round_trip() {
        assert_eq!(SummaryMode::parse("summary"), Some(SummaryMode::Summary));
        assert_eq!(SummaryMode::parse("keywords"), Some(SummaryMode::Keywords));
        assert_eq!(SummaryMode::parse("bullets"), None);
    }
}
