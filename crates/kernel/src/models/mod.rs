//! Database models.

pub mod catalog;
pub mod crop;
pub mod enums;
pub mod farmer;
pub mod livestock;
pub mod report;

pub use catalog::ProjectionError;
pub use crop::Crop;
pub use enums::{ActionType, AnimalType, CropStatus, CropType, CropVariant, ParseEnumError};
pub use farmer::{Farmer, NurtureCount};
pub use livestock::{Livestock, LivestockUpdate};
pub use report::{AnimalCount, ResourcesSpent, VetRecord, WateredAndFed};
