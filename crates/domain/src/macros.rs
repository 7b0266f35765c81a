//! Macro for implementing Display and FromStr for wire-level enums
//!
//! The remote API spells some values in lowercase (`snapshot`) and others in
//! mixed case (`JSONLines`). The macro keeps the exact wire spelling for
//! `Display` and parses case-insensitively.
//!
//! # Example
//!
//! ```rust
//! use peopleai_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Granularity {
//!     Daily,
//!     Weekly,
//! }
//!
//! impl_wire_enum_conversions!(Granularity {
//!     Daily => "daily",
//!     Weekly => "weekly",
//! });
//!
//! assert_eq!("DAILY".parse::<Granularity>().unwrap(), Granularity::Daily);
//! ```

/// Implements Display and FromStr traits for wire enums
///
/// This macro generates:
/// - Display trait: writes the exact wire string
/// - FromStr trait: parses ASCII case-insensitive strings to enum variants
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation used by the remote API
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestFormat {
        Plain,
        JsonLines,
    }

    impl_wire_enum_conversions!(TestFormat {
        Plain => "plain",
        JsonLines => "JSONLines",
    });

    #[test]
    fn test_display_keeps_wire_spelling() {
        assert_eq!(TestFormat::Plain.to_string(), "plain");
        assert_eq!(TestFormat::JsonLines.to_string(), "JSONLines");
    }

    #[test]
    fn test_fromstr_ignores_case() {
        assert_eq!(TestFormat::from_str("PLAIN").unwrap(), TestFormat::Plain);
        assert_eq!(TestFormat::from_str("jsonlines").unwrap(), TestFormat::JsonLines);
        assert_eq!(TestFormat::from_str("JSONLines").unwrap(), TestFormat::JsonLines);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestFormat::from_str("csv");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid TestFormat: csv"));
    }

    #[test]
    fn test_fromstr_empty() {
        assert!(TestFormat::from_str("").is_err());
    }
}
