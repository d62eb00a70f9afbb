//! Arithmetic utilities for pool calculations.
//!
//! - [`CheckedArithmetic`]: overflow-checked add/sub on domain types.
//! - [`mul_div`] and friends: multiply-then-divide through a 256-bit
//!   intermediate with explicit [`Rounding`](crate::domain::Rounding).

mod checked;
mod wide;

pub use checked::CheckedArithmetic;
pub use wide::{div_narrow, mul_div, mul_wide, narrow, widen};
