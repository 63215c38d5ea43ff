//! Password strength meter for staff account registration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strength label shown next to the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Fair => "Fair",
            StrengthLabel::Good => "Good",
            StrengthLabel::Strong => "Strong",
        };
        f.write_str(s)
    }
}

/// Score (0..=100 in steps of 25) plus its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordStrength {
    pub score: u8,
    pub label: StrengthLabel,
}

/// Scores a password: 25 points each for length ≥ 8, an uppercase
/// letter, a digit, and a character that is not an ASCII letter or digit.
pub fn password_strength(password: &str) -> PasswordStrength {
    let checks = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = checks.iter().filter(|&&passed| passed).count() as u8 * 25;

    let label = match score {
        0..=25 => StrengthLabel::Weak,
        26..=50 => StrengthLabel::Fair,
        51..=75 => StrengthLabel::Good,
        _ => StrengthLabel::Strong,
    };

    PasswordStrength { score, label }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_weak() {
        assert_eq!(
            password_strength(""),
            PasswordStrength {
                score: 0,
                label: StrengthLabel::Weak
            }
        );
    }

    #[test]
    fn test_each_rule_adds_25() {
        assert_eq!(password_strength("abcdefgh").score, 25);
        assert_eq!(password_strength("Abcdefgh").score, 50);
        assert_eq!(password_strength("Abcdefg1").score, 75);
        assert_eq!(password_strength("Abcdef1!").score, 100);
    }

    #[test]
    fn test_labels() {
        assert_eq!(password_strength("abcdefgh").label, StrengthLabel::Weak);
        assert_eq!(password_strength("Abc").label, StrengthLabel::Weak);
        assert_eq!(password_strength("Abcdefgh").label, StrengthLabel::Fair);
        assert_eq!(password_strength("Abcdefg1").label, StrengthLabel::Good);
        assert_eq!(password_strength("Gold@2024").label, StrengthLabel::Strong);
        assert_eq!(StrengthLabel::Strong.to_string(), "Strong");
    }

    #[test]
    fn test_short_password_can_still_score() {
        // no length point, but uppercase + digit + symbol
        assert_eq!(password_strength("A1!").score, 75);
    }
}
