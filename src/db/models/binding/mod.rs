//! Utility enum representation for the binding of a book.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enum representation for the binding of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Binding {
    /// 'hardcover'
    Hardcover,
    /// 'paperback'
    Paperback,
    /// 'ebook'
    Ebook,
}

impl Binding {
    /// Every binding, in the order they are offered to the user.
    pub const ALL: [Self; 3] = [Self::Hardcover, Self::Paperback, Self::Ebook];

    /// Convert a string to a `Binding` enum.
    /// The match is exact: no trimming, no case folding.
    /// # Errors
    /// Returns an error if the string is not a valid binding value.
    pub fn from_string(binding: &str) -> anyhow::Result<Self> {
        match binding {
            "hardcover" => Ok(Self::Hardcover),
            "paperback" => Ok(Self::Paperback),
            "ebook" => Ok(Self::Ebook),
            _ => Err(anyhow::anyhow!("Invalid binding value `{binding}`")),
        }
    }

    /// Convert a `Binding` enum to the value stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Hardcover => "hardcover",
            Self::Paperback => "paperback",
            Self::Ebook => "ebook",
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string_when_stored_value_expect_same_binding() {
        for binding in Binding::ALL {
            assert_eq!(Binding::from_string(binding.as_str()).unwrap(), binding);
        }
    }

    #[test]
    fn test_from_string_when_not_exact_expect_error() {
        assert!(Binding::from_string("Hardcover").is_err());
        assert!(Binding::from_string(" ebook").is_err());
        assert!(Binding::from_string("").is_err());
    }
}
