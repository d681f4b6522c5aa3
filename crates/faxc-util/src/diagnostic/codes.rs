//! Diagnostic codes for categorizing scanner errors.
//!
//! This module provides the [`DiagnosticCode`] type for uniquely identifying
//! diagnostic messages, enabling users to look up documentation and suppress
//! specific warnings.
//!
//! # Examples
//!
//! ```
//! use faxc_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::E_LEX_UNRECOGNISED_CHAR;
//! assert_eq!(code.prefix(), "E");
//! assert_eq!(code.as_str(), "E1002");
//! ```

/// A unique code identifying a diagnostic message
///
/// Diagnostic codes follow the format `{prefix}{number}` where:
/// - `prefix` is typically "E" for errors or "W" for warnings
/// - `number` is a 4-digit number (padded with zeros)
///
/// This allows users to reference specific diagnostics in documentation
/// and suppression attributes.
///
/// # Examples
///
/// ```
/// use faxc_util::diagnostic::DiagnosticCode;
///
/// let code = DiagnosticCode::new("E", 1001);
/// assert_eq!(code.as_str(), "E1001");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    /// The prefix (e.g., "E" for error, "W" for warning)
    pub prefix: &'static str,
    /// The numeric identifier
    pub number: u32,
}

impl DiagnosticCode {
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Get the full code string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // =========================================================================
    // SCANNER ERROR CODES
    // =========================================================================

    /// E1001: Malformed UTF-8 BOM at the start of a source buffer
    pub const E_LEX_MALFORMED_BOM: Self = Self::new("E", 1001);
    /// E1002: A byte does not begin any recognised token
    pub const E_LEX_UNRECOGNISED_CHAR: Self = Self::new("E", 1002);
    /// E1003: An integer literal does not fit the representable range
    pub const E_LEX_INTEGER_OVERFLOW: Self = Self::new("E", 1003);
    /// E1004: A `$` interpolation start or its matching structure is malformed
    pub const E_LEX_BAD_INTERPOLATION: Self = Self::new("E", 1004);
    /// E1005: A string literal has no closing quote before end of input
    pub const E_LEX_UNTERMINATED_STRING: Self = Self::new("E", 1005);
    /// E1006: A `/* ... */` comment has no matching close before end of input
    pub const E_LEX_UNTERMINATED_COMMENT: Self = Self::new("E", 1006);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_pads_to_four_digits() {
        let code = DiagnosticCode::new("E", 1);
        assert_eq!(code.as_str(), "E0001");
    }

    #[test]
    fn display_matches_as_str() {
        let code = DiagnosticCode::E_LEX_UNTERMINATED_STRING;
        assert_eq!(format!("{}", code), code.as_str());
    }

    #[test]
    fn predefined_codes_have_expected_numbers() {
        assert_eq!(DiagnosticCode::E_LEX_MALFORMED_BOM.number(), 1001);
        assert_eq!(DiagnosticCode::E_LEX_UNRECOGNISED_CHAR.number(), 1002);
        assert_eq!(DiagnosticCode::E_LEX_INTEGER_OVERFLOW.number(), 1003);
        assert_eq!(DiagnosticCode::E_LEX_BAD_INTERPOLATION.number(), 1004);
        assert_eq!(DiagnosticCode::E_LEX_UNTERMINATED_STRING.number(), 1005);
        assert_eq!(DiagnosticCode::E_LEX_UNTERMINATED_COMMENT.number(), 1006);
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(DiagnosticCode::new("E", 1001), DiagnosticCode::new("E", 1001));
        assert_ne!(DiagnosticCode::new("E", 1001), DiagnosticCode::new("E", 1002));
    }
}
