pub mod eval;
pub mod search;
pub(crate) mod tt;

/// Sentinel bounding every score the engine can produce; material terms stay
/// well below it. Half of `i32::MAX` so the root's doubled sort keys fit.
pub const WINDOW_MAX: i32 = i32::MAX / 2;
