//! Typed identifiers for catalog records and session entities.
//!
//! Catalog data is keyed by human-readable string ids (`"raven"`,
//! `"food_berries"`, `"heartwood_grove"`). Each id kind gets its own
//! newtype so a companion id can never be passed where a resource id
//! is expected.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new id.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw id string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Identifies a playable character in the catalog.
    CharacterId
);
string_id!(
    /// Identifies an equippable (and possibly craftable) item.
    ItemId
);
string_id!(
    /// Identifies an animal companion.
    CompanionId
);
string_id!(
    /// Identifies a landscape along the journey path.
    LandscapeId
);
string_id!(
    /// Identifies a challenge definition.
    ChallengeId
);
string_id!(
    /// Identifies a resource.
    ///
    /// Resource ids use a `kind_name` convention: the segment before the
    /// first underscore is the resource kind (`"food_berries"` is a
    /// `"food"` resource). Companion preferences match either the full id
    /// or the kind.
    ResourceId
);

impl ResourceId {
    /// The lexical kind prefix of this resource id.
    ///
    /// Falls back to the whole id when there is no underscore.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.0.split('_').next().unwrap_or(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = CompanionId::new("raven");
        assert_eq!(id.as_str(), "raven");
        assert_eq!(format!("{}", id), "raven");
        assert_eq!(id, CompanionId::from("raven"));
    }

    #[test]
    fn test_resource_kind_prefix() {
        assert_eq!(ResourceId::new("food_berries").kind(), "food");
        assert_eq!(ResourceId::new("herb_rowan").kind(), "herb");
        assert_eq!(ResourceId::new("flint").kind(), "flint");
    }
}
