//! Tag domain models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A label attached to tasks. Names are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: i64,
    #[validate(
        length(min = 1, max = 50, message = "Tag name must be between 1 and 50 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: String,
}

/// Input for creating a tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTag {
    #[validate(
        length(min = 1, max = 50, message = "Tag name must be between 1 and 50 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: String,
}

impl NewTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tag_validation() {
        assert!(NewTag::new("backend").validate().is_ok());
        assert!(NewTag::new("").validate().is_err());
        assert!(NewTag::new("x".repeat(51)).validate().is_err());
    }

    #[test]
    fn test_renamed_tag_validation() {
        let mut tag = Tag {
            id: 1,
            name: "backend".to_string(),
        };
        assert!(tag.validate().is_ok());
        tag.name = String::new();
        assert!(tag.validate().is_err());
    }
}
