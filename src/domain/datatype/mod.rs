pub mod field;
pub mod status;

pub use field::{UserField, UserNameField};
pub use status::{ActivityStatus, WorkItemStatus};

use derive_more::{Display, Error};

/// A path segment or stored value that names no known variant.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display(fmt = "unknown {type_name} '{value}'")]
pub struct UnknownVariant {
    pub type_name: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(type_name: &'static str, value: &str) -> Self {
        Self {
            type_name,
            value: value.into(),
        }
    }
}

/// Lowercases and strips separators, so `first_name`, `firstName` and
/// `FIRST-NAME` all read as `firstname`.
pub(crate) fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
