//! String identifiers for quests and items.
//!
//! Both ids are plain strings in the data files (`goblin_hunter`,
//! `iron_sword`); the newtypes keep the two namespaces from mixing.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an id from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Unique key of a quest definition.
    QuestId
);

string_id!(
    /// Unique key of an item definition.
    ItemId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(QuestId::new("first_steps"), 1);
        assert_eq!(map.get("first_steps"), Some(&1));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn compares_with_str() {
        let id = ItemId::from("iron_sword");
        assert_eq!(id, "iron_sword");
        assert_eq!(id.as_str(), "iron_sword");
        assert_eq!(id.to_string(), "iron_sword");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&QuestId::new("dragon_slayer")).unwrap();
        assert_eq!(json, "\"dragon_slayer\"");
    }
}
