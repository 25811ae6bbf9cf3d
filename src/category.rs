use std::fmt;
use tracing::warn;

/// Closed set of labels a file can be classified into.
///
/// Any service response outside this set is coerced to [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// REST controllers, routes, request handlers
    Api,
    /// Entity classes, value objects, enums
    DataModel,
    /// Core services, domain logic, use case implementations
    BusinessLogic,
    /// Repositories, DAOs, database interaction code
    Persistence,
    /// Framework configuration and setup classes
    Configuration,
    /// Authentication, authorization, filters, tokens
    Security,
    /// Unit tests, integration tests, mocks, test helpers
    Testing,
    /// Common helper methods, constants, exceptions
    Utilities,
    /// Markdown, AsciiDoc, comments, usage guides
    Documentation,
    /// Everything else (also the coercion target for unrecognized labels)
    Other,
}

impl Category {
    /// All valid categories, in label order.
    pub const ALL: [Self; 10] = [
        Self::Api,
        Self::DataModel,
        Self::BusinessLogic,
        Self::Persistence,
        Self::Configuration,
        Self::Security,
        Self::Testing,
        Self::Utilities,
        Self::Documentation,
        Self::Other,
    ];

    /// Returns the canonical label for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Api => "API",
            Self::DataModel => "Data Model",
            Self::BusinessLogic => "Business Logic",
            Self::Persistence => "Persistence",
            Self::Configuration => "Configuration",
            Self::Security => "Security",
            Self::Testing => "Testing",
            Self::Utilities => "Utilities",
            Self::Documentation => "Documentation",
            Self::Other => "Other",
        }
    }

    /// Parses a raw service response into a category.
    ///
    /// The response is trimmed and matched against the canonical labels;
    /// anything outside the set falls back to [`Category::Other`] with a
    /// warning.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        for category in Self::ALL {
            if category.label() == trimmed {
                return category;
            }
        }
        warn!(
            "Unrecognized category '{}', coercing to '{}'",
            trimmed,
            Self::Other.label()
        );
        Self::Other
    }

    /// Returns true for categories documented with the stricter
    /// public-surface-only framing.
    #[must_use]
    pub const fn is_public_surface(self) -> bool {
        matches!(self, Self::Api | Self::DataModel | Self::BusinessLogic)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_labels() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.label()), category);
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Category::parse("  Persistence \n"), Category::Persistence);
    }

    #[test]
    fn test_out_of_set_coerces_to_other() {
        assert_eq!(Category::parse("Frontend"), Category::Other);
        assert_eq!(Category::parse(""), Category::Other);
        assert_eq!(Category::parse("api"), Category::Other);
    }

    #[test]
    fn test_public_surface_subset() {
        assert!(Category::Api.is_public_surface());
        assert!(Category::DataModel.is_public_surface());
        assert!(Category::BusinessLogic.is_public_surface());
        assert!(!Category::Utilities.is_public_surface());
        assert!(!Category::Other.is_public_surface());
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(Category::DataModel.to_string(), "Data Model");
    }
}
