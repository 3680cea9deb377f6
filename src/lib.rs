//! # pascal-press
//!
//! An interactive hydraulic press built on Pascal's principle, with WebGPU
//! rendering.
//!
//! ## Features
//! - Pressure, output force, output travel and mechanical advantage for two
//!   connected pistons
//! - One-shot press animation with frozen parameters and a completion hook
//! - Validated parameter edits in display units
//! - Cross-platform: Native + WASM support
//!
//! ## Example
//! ```rust,ignore
//! use pascal_press::{Parameter, PressSession};
//!
//! let mut session = PressSession::default();
//! session.set_parameter(Parameter::OutputRadius, 0.2)?;
//!
//! let derived = session.derived();
//! println!("F2 = {:.0} N, MA = {:.1}", derived.output_force, derived.mechanical_advantage());
//!
//! assert!(session.request_press().accepted());
//! while session.is_pressing() {
//!     session.advance(1.0 / 60.0);
//! }
//! ```

pub mod animation;
pub mod config;
pub mod controls;
pub mod error;
pub mod math;
pub mod physics;
pub mod render;
pub mod scene;
pub mod session;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use animation::{
    AnimationConfig, AnimationState, AnimationTrigger, Ease, ElementOffsets, PressListener,
    PressSnapshot, Request, TriggerEvent,
};
pub use config::PressConfig;
pub use controls::{EditableValue, FieldSpec, PressureUnit, ResultsReadout};
pub use error::{PressError, PressResult};
pub use math::Transform;
pub use physics::{DerivedQuantities, Parameter, ParameterBounds, PressParameters};
pub use scene::PressLayout;
pub use session::PressSession;
