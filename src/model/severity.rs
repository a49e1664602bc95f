//! Output severity and the debug-adapter category mapping.

/// Severity of a piece of console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Plain program output (stdout and unknown categories).
    Info,
    /// Debug-console messages from the adapter itself.
    Warning,
    /// Error output (stderr).
    Error,
    /// Synthetic messages that should not be styled, such as the clear notice.
    Ignore,
}

// Debug adapter output categories with special handling
pub(crate) const CATEGORY_STDERR: &str = "stderr";
pub(crate) const CATEGORY_CONSOLE: &str = "console";
pub(crate) const CATEGORY_TELEMETRY: &str = "telemetry";

impl Severity {
    /// Map a debug-adapter output category to a severity.
    ///
    /// `stderr` is an error, `console` is a warning, and every other
    /// category (including `stdout` and `important`) is informational.
    pub fn from_category(category: &str) -> Self {
        match category {
            CATEGORY_STDERR => Severity::Error,
            CATEGORY_CONSOLE => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

/// Whether output of this category is shown in the console at all.
pub fn is_displayed_category(category: &str) -> bool {
    category != CATEGORY_TELEMETRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_maps_to_error() {
        assert_eq!(Severity::from_category("stderr"), Severity::Error);
    }

    #[test]
    fn console_maps_to_warning() {
        assert_eq!(Severity::from_category("console"), Severity::Warning);
    }

    #[test]
    fn other_categories_map_to_info() {
        for category in ["stdout", "important", "", "custom"] {
            assert_eq!(
                Severity::from_category(category),
                Severity::Info,
                "category {category:?} should be Info"
            );
        }
    }

    #[test]
    fn telemetry_is_not_displayed() {
        assert!(!is_displayed_category("telemetry"));
        assert!(is_displayed_category("stdout"));
    }
}
