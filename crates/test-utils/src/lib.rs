//! Farm test utilities.
//!
//! Fixture builders for livestock, farmers and filter requests, plus JSON
//! assertion helpers for the integration tests.

use serde_json::{Value as JsonValue, json};

/// Create a test animal with default values.
///
/// Defaults to a two year old, non-harvestable animal on a corn diet.
pub fn test_livestock(tag_id: i32, animal_type: &str) -> TestLivestock {
    TestLivestock {
        tag_id,
        animal_type: animal_type.to_string(),
        age: 2,
        diet: "corn".to_string(),
        weight: 100.0,
        last_fed: None,
        harvestable: false,
        last_violated_for_harvested_goods: None,
    }
}

/// A test animal builder.
#[derive(Debug, Clone)]
pub struct TestLivestock {
    pub tag_id: i32,
    pub animal_type: String,
    pub age: i32,
    pub diet: String,
    pub weight: f64,
    pub last_fed: Option<String>,
    pub harvestable: bool,
    pub last_violated_for_harvested_goods: Option<String>,
}

impl TestLivestock {
    /// Set the age in years.
    pub fn with_age(mut self, age: i32) -> Self {
        self.age = age;
        self
    }

    /// Set the diet crop.
    pub fn with_diet(mut self, diet: &str) -> Self {
        self.diet = diet.to_string();
        self
    }

    /// Set the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the last feeding date (`YYYY-MM-DD`).
    pub fn fed_on(mut self, date: &str) -> Self {
        self.last_fed = Some(date.to_string());
        self
    }

    /// Mark as ready for harvest.
    pub fn harvestable(mut self) -> Self {
        self.harvestable = true;
        self
    }

    /// JSON body accepted by `POST /api/livestock/insert`.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "tagID": self.tag_id,
            "animalType": self.animal_type,
            "age": self.age,
            "diet": self.diet,
            "weight": self.weight,
            "lastFed": self.last_fed,
            "harvestable": self.harvestable,
            "lastViolatedForHarvestedGoods": self.last_violated_for_harvested_goods,
        })
    }
}

/// Create a feed action for an animal.
pub fn feed(tag_id: i32) -> TestUpdate {
    TestUpdate {
        tag_id,
        action_type: "feed",
        fields: json!({}),
    }
}

/// Create a harvest action for an animal.
pub fn harvest(tag_id: i32) -> TestUpdate {
    TestUpdate {
        tag_id,
        action_type: "harvest",
        fields: json!({}),
    }
}

/// A livestock update builder.
#[derive(Debug, Clone)]
pub struct TestUpdate {
    pub tag_id: i32,
    pub action_type: &'static str,
    pub fields: JsonValue,
}

impl TestUpdate {
    /// Add a single field.
    pub fn with_field(mut self, name: &str, value: JsonValue) -> Self {
        if let Some(obj) = self.fields.as_object_mut() {
            obj.insert(name.to_string(), value);
        }
        self
    }

    /// Record the feeding against a farmer.
    pub fn by_farmer(self, farmer_id: i32, water: i32, food: i32) -> Self {
        self.with_field("farmerID", json!(farmer_id))
            .with_field("waterSpent", json!(water))
            .with_field("foodSpent", json!(food))
    }

    /// JSON body accepted by `POST /api/livestock/update`.
    pub fn to_json(&self) -> JsonValue {
        let mut body = self.fields.clone();
        if let Some(obj) = body.as_object_mut() {
            obj.insert("tagID".to_string(), json!(self.tag_id));
            obj.insert("actionType".to_string(), json!(self.action_type));
        }
        body
    }
}

/// Filter request builders.
pub mod filters {
    use serde_json::{Value, json};

    /// Livestock filter over an age range with every other filter disabled.
    pub fn livestock(min_age: i32, max_age: i32) -> Value {
        json!({
            "harvestable": "all",
            "animalType": "ALL",
            "diet": "ALL",
            "minAge": min_age,
            "maxAge": max_age,
        })
    }

    /// Crops filter over a quantity range with every other filter disabled.
    pub fn crops(min_quantity: i32, max_quantity: i32) -> Value {
        json!({
            "cropType": "ALL",
            "cropVariant": "ALL",
            "cropStatus": "ALL",
            "minQuantity": min_quantity,
            "maxQuantity": max_quantity,
        })
    }

    /// Overwrite one key of a filter body.
    pub fn with(mut filter: Value, key: &str, value: Value) -> Value {
        if let Some(obj) = filter.as_object_mut() {
            obj.insert(key.to_string(), value);
        }
        filter
    }
}

/// Assertion helpers for JSON responses.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{}', got: {}",
            key,
            value
        );
    }

    /// Integer values of `key` across a JSON array of objects.
    pub fn ints(rows: &Value, key: &str) -> Vec<i64> {
        rows.as_array()
            .map(|rows| rows.iter().filter_map(|r| r[key].as_i64()).collect())
            .unwrap_or_default()
    }

    /// Assert that a JSON array contains an object whose `key` equals `id`.
    pub fn contains_id(rows: &Value, key: &str, id: i64) {
        assert!(
            ints(rows, key).contains(&id),
            "Expected a row with {} = {}, got: {}",
            key,
            id,
            rows
        );
    }

    /// Assert that no object in a JSON array has `key` equal to `id`.
    pub fn lacks_id(rows: &Value, key: &str, id: i64) {
        assert!(
            !ints(rows, key).contains(&id),
            "Expected no row with {} = {}, got: {}",
            key,
            id,
            rows
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_livestock_builder() {
        let cow = test_livestock(9001, "cow").with_age(7).harvestable();
        let body = cow.to_json();

        assert_eq!(body["tagID"], 9001);
        assert_eq!(body["animalType"], "cow");
        assert_eq!(body["age"], 7);
        assert_eq!(body["harvestable"], true);
        assert!(body["lastFed"].is_null());
    }

    #[test]
    fn test_update_builder() {
        let body = feed(9001).by_farmer(2, 10, 5).to_json();

        assert_eq!(body["actionType"], "feed");
        assert_eq!(body["tagID"], 9001);
        assert_eq!(body["farmerID"], 2);
        assert_eq!(body["waterSpent"], 10);

        let body = harvest(9002).to_json();
        assert_eq!(body["actionType"], "harvest");
        assert::has_key(&body, "tagID");
    }

    #[test]
    fn test_filter_builders() {
        let filter = filters::with(filters::livestock(0, 10), "harvestable", json!("true"));
        assert_eq!(filter["harvestable"], "true");
        assert_eq!(filter["minAge"], 0);

        let crops = filters::crops(5, 100);
        assert_eq!(crops["cropType"], "ALL");
    }

    #[test]
    fn test_id_assertions() {
        let rows = json!([{"tagID": 1}, {"tagID": 2}]);
        assert::contains_id(&rows, "tagID", 2);
        assert::lacks_id(&rows, "tagID", 3);
        assert_eq!(assert::ints(&rows, "tagID"), vec![1, 2]);
    }
}
