//! Values shown on the lookup page

use serde::Serialize;

/// Request-scoped result of one form submission. Empty fields are not shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageData {
    /// Postal code as typed by the user
    pub postal_code: String,
    /// City name as returned by the address service
    pub city: String,
    pub temp_c: String,
    pub temp_f: String,
    pub temp_k: String,
    /// User-facing error line
    pub error: String,
}

impl PageData {
    /// Start a result that echoes the submitted postal code
    #[must_use]
    pub fn for_postal_code(postal_code: impl Into<String>) -> Self {
        Self {
            postal_code: postal_code.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Temperatures are only meaningful on a page without an error
    #[must_use]
    pub fn has_temperatures(&self) -> bool {
        !self.has_error() && !self.temp_c.is_empty()
    }
}
