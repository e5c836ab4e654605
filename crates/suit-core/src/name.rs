use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

pub const DEFAULT_MAX_NAME_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// InvalidNameReason
// ---------------------------------------------------------------------------

/// Why a candidate identifier was rejected. Only the first failing rule is
/// reported, in the order: empty, length, format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum InvalidNameReason {
    Empty,
    TooLong { len: usize, max: usize },
    InvalidFormat { name: String },
}

impl fmt::Display for InvalidNameReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidNameReason::Empty => f.write_str("name must not be empty"),
            InvalidNameReason::TooLong { len, max } => {
                write!(f, "name is {len} characters long (max {max})")
            }
            InvalidNameReason::InvalidFormat { name } => write!(
                f,
                "'{name}' must be kebab-case: lowercase letters and digits joined by single hyphens, starting with a letter"
            ),
        }
    }
}

impl std::error::Error for InvalidNameReason {}

// ---------------------------------------------------------------------------
// ValidName
// ---------------------------------------------------------------------------

/// An identifier that passed [`NameValidator::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ValidName(String);

impl ValidName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ValidName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// NameValidator
// ---------------------------------------------------------------------------

static KEBAB_RE: OnceLock<Regex> = OnceLock::new();

fn kebab_re() -> &'static Regex {
    KEBAB_RE.get_or_init(|| {
        Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$").expect("kebab-case pattern compiles")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameValidator {
    max_length: usize,
}

impl Default for NameValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_NAME_LENGTH)
    }
}

impl NameValidator {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn validate(&self, candidate: &str) -> Result<ValidName, InvalidNameReason> {
        if candidate.is_empty() {
            return Err(InvalidNameReason::Empty);
        }
        let len = candidate.chars().count();
        if len > self.max_length {
            return Err(InvalidNameReason::TooLong {
                len,
                max: self.max_length,
            });
        }
        if !kebab_re().is_match(candidate) {
            return Err(InvalidNameReason::InvalidFormat {
                name: candidate.to_string(),
            });
        }
        Ok(ValidName(candidate.to_string()))
    }
}

/// Validate with the default length bound.
pub fn validate_name(candidate: &str) -> Result<ValidName, InvalidNameReason> {
    NameValidator::default().validate(candidate)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        for name in ["a", "my-feature", "strategy-tdd-bdd", "v2", "api-v2-auth", "x1-2"] {
            let valid = validate_name(name).unwrap_or_else(|e| panic!("expected valid {name}: {e}"));
            assert_eq!(valid.as_str(), name);
        }
    }

    #[test]
    fn invalid_format_names() {
        for name in [
            "MyFeature",
            "my_feature",
            "-leading",
            "trailing-",
            "double--hyphen",
            "1starts-with-digit",
            "has space",
            "ünïcode",
            "dot.md",
        ] {
            assert!(
                matches!(validate_name(name), Err(InvalidNameReason::InvalidFormat { .. })),
                "expected InvalidFormat: {name}"
            );
        }
    }

    #[test]
    fn empty_is_reported_first() {
        assert_eq!(validate_name(""), Err(InvalidNameReason::Empty));
    }

    #[test]
    fn length_checked_before_format() {
        // Both too long and badly formatted: length wins.
        let name = "X".repeat(101);
        assert_eq!(
            validate_name(&name),
            Err(InvalidNameReason::TooLong { len: 101, max: 100 })
        );
    }

    #[test]
    fn length_bound_is_inclusive() {
        let at_bound = "a".repeat(100);
        assert!(validate_name(&at_bound).is_ok());
        let over = "a".repeat(101);
        assert!(matches!(
            validate_name(&over),
            Err(InvalidNameReason::TooLong { .. })
        ));
    }

    #[test]
    fn length_counts_characters() {
        let validator = NameValidator::new(3);
        // Four characters, eight bytes.
        assert_eq!(
            validator.validate("éééé"),
            Err(InvalidNameReason::TooLong { len: 4, max: 3 })
        );
        assert!(matches!(
            validator.validate("ééé"),
            Err(InvalidNameReason::InvalidFormat { .. })
        ));
    }

    #[test]
    fn accepted_names_satisfy_every_rule() {
        let validator = NameValidator::new(12);
        let candidates = [
            "", "a", "ab-c", "Ab", "a-", "a--b", "abcdefghijkl", "abcdefghijklm", "a b", "a1-b2-c3",
            "9lives", "\u{0}", "-",
        ];
        for c in candidates {
            match validator.validate(c) {
                Ok(v) => {
                    assert!(kebab_re().is_match(v.as_str()));
                    assert!(v.as_str().chars().count() <= 12);
                }
                Err(InvalidNameReason::Empty) => assert!(c.is_empty()),
                Err(InvalidNameReason::TooLong { len, .. }) => {
                    assert!(!c.is_empty());
                    assert!(len > 12);
                }
                Err(InvalidNameReason::InvalidFormat { .. }) => {
                    assert!(!c.is_empty());
                    assert!(c.chars().count() <= 12);
                    assert!(!kebab_re().is_match(c));
                }
            }
        }
    }
}
