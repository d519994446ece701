//! Rule-based password strength scoring
//!
//! Drives the signup strength meter: a fast, deterministic signal of how many
//! complexity rules a candidate password satisfies. This is a UI
//! classification, not an entropy estimate; the point is that a user can see
//! exactly which rule is unmet. Server-side acceptance policy lives with the
//! auth handlers, not here.

use serde::Serialize;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// The closed set of special characters the meter recognizes.
///
/// Fixed by the scoring contract; widening it to a general punctuation class
/// would change existing scores.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*";

/// Upper bound of the strength score
pub const MAX_STRENGTH_SCORE: u8 = 5;

/// The five independent complexity rules, each worth one point.
///
/// Character classes are ASCII-only. Accented or otherwise non-ASCII letters
/// satisfy no class rule (they still count toward length).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthRule {
    MinLength,
    Lowercase,
    Uppercase,
    Digit,
    Special,
}

impl StrengthRule {
    pub const ALL: [StrengthRule; 5] = [
        StrengthRule::MinLength,
        StrengthRule::Lowercase,
        StrengthRule::Uppercase,
        StrengthRule::Digit,
        StrengthRule::Special,
    ];

    fn is_satisfied(self, password: &str) -> bool {
        match self {
            StrengthRule::MinLength => password.chars().count() >= MIN_PASSWORD_LENGTH,
            StrengthRule::Lowercase => password.chars().any(|c| c.is_ascii_lowercase()),
            StrengthRule::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
            StrengthRule::Digit => password.chars().any(|c| c.is_ascii_digit()),
            StrengthRule::Special => password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        }
    }

    /// User-facing description of what the rule requires
    pub fn description(self) -> &'static str {
        match self {
            StrengthRule::MinLength => "at least 8 characters",
            StrengthRule::Lowercase => "a lowercase letter",
            StrengthRule::Uppercase => "an uppercase letter",
            StrengthRule::Digit => "a digit",
            StrengthRule::Special => "a special character (!@#$%^&*)",
        }
    }
}

/// Strength evaluation result: the bounded score plus the rules left unmet.
#[derive(Debug, Clone, Serialize)]
pub struct StrengthEvaluation {
    pub score: u8,
    pub unmet: Vec<StrengthRule>,
}

/// Evaluate a candidate password against all five rules.
///
/// An empty candidate short-circuits to score 0 with every rule unmet; no
/// rule is evaluated. Otherwise the score is the count of satisfied rules,
/// clamped to `[0, 5]`. Rules are independent and order-insensitive; there
/// is no partial credit.
///
/// Total and side-effect free for any input, including very long strings
/// (cost is linear in length). Non-ASCII input is accepted; only the ASCII
/// classes above score.
pub fn evaluate_strength(password: &str) -> StrengthEvaluation {
    if password.is_empty() {
        return StrengthEvaluation {
            score: 0,
            unmet: StrengthRule::ALL.to_vec(),
        };
    }

    let mut score: u8 = 0;
    let mut unmet = Vec::new();
    for rule in StrengthRule::ALL {
        if rule.is_satisfied(password) {
            score += 1;
        } else {
            unmet.push(rule);
        }
    }

    StrengthEvaluation {
        score: score.min(MAX_STRENGTH_SCORE),
        unmet,
    }
}

/// Score a candidate password on the 0-5 meter scale.
///
/// Shortcut over [`evaluate_strength`] for callers that only render the
/// segment count.
pub fn score_strength(password: &str) -> u8 {
    evaluate_strength(password).score
}

/// Get human-readable score description
pub fn score_description(score: u8) -> &'static str {
    match score {
        0 => "Very weak",
        1 => "Weak",
        2 => "Fair",
        3 => "Good",
        4 => "Strong",
        _ => "Very strong",
    }
}

/// Format an evaluation as a single user-displayable message
pub fn format_strength_feedback(evaluation: &StrengthEvaluation) -> String {
    let mut parts = vec![format!(
        "Password strength: {}",
        score_description(evaluation.score)
    )];

    if !evaluation.unmet.is_empty() {
        let missing: Vec<&str> = evaluation
            .unmet
            .iter()
            .map(|rule| rule.description())
            .collect();
        parts.push(format!("Add {}", missing.join(", ")));
    }

    parts.join(". ")
}
