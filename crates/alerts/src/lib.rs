//! Alert condition evaluation over clean forecast records.
//!
//! A [`Condition`] inspects a record set and emits only positive findings;
//! a quiet condition contributes nothing. The [`ConditionRegistry`] runs
//! conditions in registration order so output ordering is deterministic.

pub mod conditions;
pub mod registry;

pub use conditions::{
    Condition, MaxTemperatureExceeds, MinTemperatureBelow, PrecipitationExceeds, StaleData,
    WindExceeds,
};
pub use registry::{default_registry, ConditionRegistry};
