//! Budget categories.
//!
//! A category is one budget line item. Categories are indexed by their
//! position in the session's category list and carry only a display name.

/// Maximum number of categories (and therefore constraints) per session.
pub const MAX_CATEGORIES: usize = 4;

/// One budget line item, identified by position and display name.
///
/// # Example
///
/// ```
/// use apportion_core::Category;
///
/// let named = Category::from_input("Rent", 0);
/// assert_eq!(named.name(), "Rent");
///
/// let defaulted = Category::from_input("  ", 1);
/// assert_eq!(defaulted.name(), "Category 2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    name: String,
}

impl Category {
    /// Creates a category with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Creates a category from user input, falling back to the default name
    /// for position `index` (0-based) when the input is blank.
    pub fn from_input(input: &str, index: usize) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            Self::new(default_name(index))
        } else {
            Self::new(trimmed)
        }
    }

    /// Display name of the category.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Default display name for the category at `index` (0-based).
pub fn default_name(index: usize) -> String {
    format!("Category {}", index + 1)
}
