//! Filter criteria types.
//!
//! A filter is built fresh from one request, turned into a WHERE clause once,
//! and dropped. Fields are private and there are no setters; the `with_*`
//! builders consume the value so a filter never changes after it is handed to
//! a query.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer};

use crate::models::{AnimalType, CropStatus, CropType, CropVariant};

/// Wire value meaning "no filter on this field".
pub const WILDCARD: &str = "all";

/// Three-valued flag filter.
///
/// Unset must stay distinct from both `true` and `false`, so this is not an
/// `Option<bool>` in disguise: any value other than a recognizable boolean
/// means "do not filter".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tristate {
    #[default]
    Unset,
    True,
    False,
}

impl Tristate {
    /// Parse the textual form. Only `true` and `false` (any case) are
    /// meaningful; everything else is [`Tristate::Unset`].
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Tristate::True
        } else if text.eq_ignore_ascii_case("false") {
            Tristate::False
        } else {
            Tristate::Unset
        }
    }

    /// The boolean this state filters on, if any.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Tristate::Unset => None,
            Tristate::True => Some(true),
            Tristate::False => Some(false),
        }
    }
}

impl From<Option<bool>> for Tristate {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Tristate::Unset,
            Some(true) => Tristate::True,
            Some(false) => Tristate::False,
        }
    }
}

impl<'de> Deserialize<'de> for Tristate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Text(String),
            Other(IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Flag(flag) => Tristate::from(Some(flag)),
            Raw::Text(text) => Tristate::from_text(&text),
            Raw::Other(_) => Tristate::Unset,
        })
    }
}

/// Parse an enumeration value where [`WILDCARD`] (any case) means no filter.
pub fn parse_wildcard<T: FromStr>(text: &str) -> Result<Option<T>, T::Err> {
    if text.trim().eq_ignore_ascii_case(WILDCARD) {
        Ok(None)
    } else {
        text.parse().map(Some)
    }
}

/// Serde adapter for optional enum fields that accept the wildcard.
///
/// Use with `#[serde(default, deserialize_with = "deserialize_wildcard")]` so
/// that a missing field is also treated as the wildcard.
pub fn deserialize_wildcard<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(text) => parse_wildcard(&text).map_err(de::Error::custom),
    }
}

/// Inclusive integer range. `min <= max` is not checked; an inverted range
/// simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeFilter {
    pub min: i32,
    pub max: i32,
}

impl RangeFilter {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Whether `value` falls inside the range.
    pub fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Criteria for narrowing the livestock listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivestockFilter {
    harvestable: Tristate,
    animal_type: Option<AnimalType>,
    diet: Option<CropType>,
    age: RangeFilter,
    tag_id: Option<RangeFilter>,
    min_water_spent: Option<i64>,
    min_food_spent: Option<i64>,
}

impl LivestockFilter {
    /// Create a filter with the mandatory age range.
    pub fn new(
        harvestable: Tristate,
        animal_type: Option<AnimalType>,
        diet: Option<CropType>,
        min_age: i32,
        max_age: i32,
    ) -> Self {
        Self {
            harvestable,
            animal_type,
            diet,
            age: RangeFilter::new(min_age, max_age),
            tag_id: None,
            min_water_spent: None,
            min_food_spent: None,
        }
    }

    /// Restrict to a tag ID range.
    pub fn with_tag_range(mut self, min: i32, max: i32) -> Self {
        self.tag_id = Some(RangeFilter::new(min, max));
        self
    }

    /// Keep animals whose recorded water consumption totals at least `amount`.
    pub fn with_min_water_spent(mut self, amount: i64) -> Self {
        self.min_water_spent = Some(amount);
        self
    }

    /// Keep animals whose recorded food consumption totals at least `amount`.
    pub fn with_min_food_spent(mut self, amount: i64) -> Self {
        self.min_food_spent = Some(amount);
        self
    }

    pub fn harvestable(&self) -> Tristate {
        self.harvestable
    }

    pub fn animal_type(&self) -> Option<AnimalType> {
        self.animal_type
    }

    pub fn diet(&self) -> Option<CropType> {
        self.diet
    }

    pub fn age(&self) -> RangeFilter {
        self.age
    }

    pub fn tag_id(&self) -> Option<RangeFilter> {
        self.tag_id
    }

    pub fn min_water_spent(&self) -> Option<i64> {
        self.min_water_spent
    }

    pub fn min_food_spent(&self) -> Option<i64> {
        self.min_food_spent
    }
}

/// Criteria for narrowing the crops listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropsFilter {
    crop_type: Option<CropType>,
    crop_variant: Option<CropVariant>,
    crop_status: Option<CropStatus>,
    quantity: RangeFilter,
}

impl CropsFilter {
    /// Create a filter with the mandatory quantity range.
    pub fn new(
        crop_type: Option<CropType>,
        crop_variant: Option<CropVariant>,
        crop_status: Option<CropStatus>,
        min_quantity: i32,
        max_quantity: i32,
    ) -> Self {
        Self {
            crop_type,
            crop_variant,
            crop_status,
            quantity: RangeFilter::new(min_quantity, max_quantity),
        }
    }

    pub fn crop_type(&self) -> Option<CropType> {
        self.crop_type
    }

    pub fn crop_variant(&self) -> Option<CropVariant> {
        self.crop_variant
    }

    pub fn crop_status(&self) -> Option<CropStatus> {
        self.crop_status
    }

    pub fn quantity(&self) -> RangeFilter {
        self.quantity
    }
}
