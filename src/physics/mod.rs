//! Hydraulic press physics
//!
//! Pascal's principle for two connected pistons: the pressure F₁/A₁ is the
//! same under both, so the output force scales with the area ratio while the
//! output travel shrinks by the same ratio.

mod model;
mod params;

pub use model::DerivedQuantities;
pub use params::{Parameter, ParameterBounds, ParameterRange, PressParameters};
