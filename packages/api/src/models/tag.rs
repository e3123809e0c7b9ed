use serde::{Deserialize, Serialize};

/// A user-defined label: an emotion felt during a trade, or a technical
/// confirmation that justified taking it. Both catalogs share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub user_id: Option<String>,
}

/// Payload for creating a tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTag {
    pub name: String,
    pub description: Option<String>,
    pub user_id: Option<String>,
}

impl NewTag {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
