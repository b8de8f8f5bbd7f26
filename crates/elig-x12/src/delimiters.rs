//! Interchange delimiters
//!
//! X12 does not fix its separators; the ISA header declares them by position.
//! The element separator is the fourth character of the segment, the
//! repetition separator is the value of ISA11, the component separator is the
//! value of ISA16, and the segment terminator is the character immediately
//! after ISA16.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator characters for one interchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    /// Element separator (conventionally `*`)
    pub element: char,
    /// Segment terminator (conventionally `~`)
    pub segment: char,
    /// Component separator (conventionally `:`)
    pub component: char,
    /// Repetition separator (conventionally `^`)
    pub repetition: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            element: '*',
            segment: '~',
            component: ':',
            repetition: '^',
        }
    }
}

/// Errors resolving delimiters from an interchange header
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DelimiterError {
    /// The text does not begin with an ISA tag
    #[error("interchange does not begin with ISA")]
    NotInterchange,
    /// The header ends before all delimiter positions are reached
    #[error("interchange header too short to declare its delimiters")]
    Truncated,
}

impl Delimiters {
    /// Resolve the delimiters a message actually uses from its ISA header.
    ///
    /// Reads the fixed positions rather than assuming defaults, so messages
    /// produced with nonstandard separators still split correctly.
    pub fn from_isa(text: &str) -> Result<Self, DelimiterError> {
        if !text.starts_with("ISA") {
            return Err(DelimiterError::NotInterchange);
        }

        // ISA is the one fixed-width segment, so a bounded prefix is enough.
        let chars: Vec<char> = text.chars().take(130).collect();
        let element = *chars.get(3).ok_or(DelimiterError::Truncated)?;

        let mut separators_seen = 0usize;
        let mut repetition = None;
        let mut component = None;
        let mut segment = None;

        for (i, &c) in chars.iter().enumerate() {
            if c != element {
                continue;
            }
            separators_seen += 1;
            // ISA11 and ISA16 are single characters, so the values sit
            // directly after their separators.
            if separators_seen == 11 {
                repetition = chars.get(i + 1).copied();
            } else if separators_seen == 16 {
                component = chars.get(i + 1).copied();
                segment = chars.get(i + 2).copied();
                break;
            }
        }

        match (repetition, component, segment) {
            (Some(repetition), Some(component), Some(segment)) => Ok(Self {
                element,
                segment,
                component,
                repetition,
            }),
            _ => Err(DelimiterError::Truncated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ISA_DEFAULT: &str = "ISA*00*          *00*          *ZZ*HT009582-001   \
                               *ZZ*HT000004-001   *240815*1030*^*00501*000012345*1*P*:~GS*HS";

    #[test]
    fn resolves_default_delimiters() {
        let d = Delimiters::from_isa(ISA_DEFAULT).unwrap();
        assert_eq!(d, Delimiters::default());
    }

    #[test]
    fn resolves_nonstandard_delimiters() {
        let isa = "ISA|00|          |00|          |ZZ|SENDER         \
                   |ZZ|RECEIVER       |240815|1030|>|00501|000012345|1|T|<!";
        let d = Delimiters::from_isa(isa).unwrap();
        assert_eq!(d.element, '|');
        assert_eq!(d.repetition, '>');
        assert_eq!(d.component, '<');
        assert_eq!(d.segment, '!');
    }

    #[test]
    fn rejects_non_interchange_text() {
        assert_eq!(
            Delimiters::from_isa("GS*HS*SENDER"),
            Err(DelimiterError::NotInterchange)
        );
    }

    #[test]
    fn rejects_truncated_header() {
        assert_eq!(
            Delimiters::from_isa("ISA*00*          *00"),
            Err(DelimiterError::Truncated)
        );
    }
}
