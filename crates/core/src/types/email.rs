//! Subscriber email addresses.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a string is not an acceptable [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {} characters", Email::MAX_LENGTH)]
    TooLong,
    #[error("email cannot contain whitespace")]
    Whitespace,
    /// Zero or several `@`.
    #[error("email must contain exactly one @ symbol")]
    MissingAtSymbol,
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// No dot, or an empty label such as `example..com`.
    #[error("email domain must look like name.tld")]
    InvalidDomain,
}

/// A syntactically valid email address, `local@name.tld`.
///
/// Newsletter subscribers are keyed by this value, which is why the parser
/// insists on a dotted domain. Deliverability is not checked.
///
/// ```
/// use oplaisir_core::Email;
///
/// assert!(Email::parse("karim+cadeaux@oplaisir.fr").is_ok());
/// assert!(Email::parse("karim@localhost").is_err());
/// assert_eq!(
///     Email::parse_normalized(" Karim@OPlaisir.fr ").unwrap().as_str(),
///     "karim@oplaisir.fr"
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email {
    address: String,
    at: usize,
}

impl Email {
    /// Longest accepted address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse `s` exactly as given.
    ///
    /// # Errors
    ///
    /// Returns the first [`EmailError`] the input violates.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let (local, domain) = match s.split_once('@') {
            Some((local, domain)) if !domain.contains('@') => (local, domain),
            _ => return Err(EmailError::MissingAtSymbol),
        };

        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }
        let mut labels = domain.split('.');
        let dotted = labels.clone().nth(1).is_some();
        if !dotted || labels.any(str::is_empty) {
            return Err(EmailError::InvalidDomain);
        }

        Ok(Self {
            address: s.to_owned(),
            at: local.len(),
        })
    }

    /// Trim and lowercase `s`, then [`parse`](Self::parse) it.
    ///
    /// Subscriptions are stored in this form, so `" Sofia@Example.com "` and
    /// `"sofia@example.com"` are the same subscriber.
    ///
    /// # Errors
    ///
    /// Same as [`Email::parse`].
    pub fn parse_normalized(s: &str) -> Result<Self, EmailError> {
        Self::parse(&s.trim().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Part before the `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.address.get(..self.at).unwrap_or_default()
    }

    /// Part after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.address.get(self.at + 1..).unwrap_or_default()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.address
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_shapes() {
        for ok in [
            "sofia@example.com",
            "sofia.benali+noel@example.com",
            "lina@mail.example.co.uk",
            "a@b.c",
        ] {
            assert!(Email::parse(ok).is_ok(), "{ok}");
        }
    }

    #[test]
    fn test_rejections() {
        let cases = [
            ("", EmailError::Empty),
            ("sofia benali@example.com", EmailError::Whitespace),
            ("sofia.example.com", EmailError::MissingAtSymbol),
            ("sofia@@example.com", EmailError::MissingAtSymbol),
            ("@example.com", EmailError::EmptyLocalPart),
            ("sofia@", EmailError::EmptyDomain),
            ("sofia@localhost", EmailError::InvalidDomain),
            ("sofia@example..com", EmailError::InvalidDomain),
            ("sofia@.com", EmailError::InvalidDomain),
        ];
        for (input, expected) in cases {
            assert_eq!(Email::parse(input), Err(expected), "{input:?}");
        }

        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(Email::parse(&long), Err(EmailError::TooLong));
    }

    #[test]
    fn test_normalized_is_the_subscriber_key() {
        let a = Email::parse_normalized("  Sofia@Example.COM ").unwrap();
        let b = Email::parse_normalized("sofia@example.com").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.local_part(), "sofia");
        assert_eq!(a.domain(), "example.com");
    }

    #[test]
    fn test_serde_is_a_validated_string() {
        let email: Email = serde_json::from_str("\"karim@example.com\"").unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"karim@example.com\"");
        assert!(serde_json::from_str::<Email>("\"karim\"").is_err());
    }
}
