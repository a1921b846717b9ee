//! Animation primitives for rendering step transitions.
//!
//! The transition controller only says *whether* a step is visible. These
//! helpers let a host turn that flag into a smooth opacity ramp and a blended
//! colour, sampled once per frame.

mod easing;
mod fade;

pub use easing::{ease_in_out, interpolate_color};
pub use fade::{Fade, FadeDirection};
