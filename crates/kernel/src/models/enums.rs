//! Farm enumerations shared by records and filters.
//!
//! Every enumeration parses case-insensitively and renders lowercase, which is
//! also the form stored in the database.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A string that does not name a variant of the expected enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! farm_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const VARIANTS: &'static [$name] = &[$($name::$variant),+];

            /// Lowercase storage and wire form.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ParseEnumError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = ParseEnumError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

farm_enum! {
    /// Kind of animal kept as livestock.
    AnimalType ("animal type") {
        Chicken => "chicken",
        Cow => "cow",
        Pig => "pig",
        Sheep => "sheep",
    }
}

farm_enum! {
    /// Crop species. Also used for a livestock diet.
    CropType ("crop type") {
        Canola => "canola",
        Corn => "corn",
        Wheat => "wheat",
    }
}

farm_enum! {
    /// Cultivar family of a planted crop.
    CropVariant ("crop variant") {
        Standard => "standard",
        Organic => "organic",
        Gmo => "gmo",
    }
}

farm_enum! {
    /// Growth stage of a planted crop.
    CropStatus ("crop status") {
        Planted => "planted",
        Growing => "growing",
        Mature => "mature",
        Harvested => "harvested",
    }
}

farm_enum! {
    /// Action applied to a single animal by the update endpoint.
    ActionType ("action type") {
        /// Record a feeding.
        Feed => "feed",
        /// Collect harvested goods; the animal stops being harvestable.
        Harvest => "harvest",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_any_case() {
        assert_eq!("COW".parse::<AnimalType>(), Ok(AnimalType::Cow));
        assert_eq!("Wheat".parse::<CropType>(), Ok(CropType::Wheat));
        assert_eq!(" growing ".parse::<CropStatus>(), Ok(CropStatus::Growing));
        assert_eq!("GMO".parse::<CropVariant>(), Ok(CropVariant::Gmo));
    }

    #[test]
    fn unknown_value_names_the_enum() {
        let err = "llama".parse::<AnimalType>().unwrap_err();
        assert_eq!(err.kind, "animal type");
        assert_eq!(err.to_string(), "unknown animal type: \"llama\"");
    }

    #[test]
    fn all_is_not_a_variant() {
        assert!("all".parse::<CropType>().is_err());
        assert!("ALL".parse::<AnimalType>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&ActionType::Harvest).unwrap();
        assert_eq!(json, "\"harvest\"");

        let parsed: AnimalType = serde_json::from_str("\"SHEEP\"").unwrap();
        assert_eq!(parsed, AnimalType::Sheep);
    }

    #[test]
    fn variants_round_trip_through_as_str() {
        for variant in CropStatus::VARIANTS {
            assert_eq!(variant.as_str().parse::<CropStatus>(), Ok(*variant));
        }
    }
}
