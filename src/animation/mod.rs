//! Press animation
//!
//! A press request freezes the current parameters, builds a [`Timeline`] of
//! eased tweens for every moving element and plays it forward as the frame
//! loop calls [`AnimationTrigger::advance`].

pub mod ease;
pub mod timeline;
pub mod trigger;
pub mod tween;

pub use ease::Ease;
pub use timeline::{Element, ElementOffsets, Timeline, TimelineStatus};
pub use trigger::{
    AnimationConfig, AnimationState, AnimationTrigger, PressListener, PressSnapshot, Request,
    TriggerEvent,
};
pub use tween::{Interpolatable, Tween};
