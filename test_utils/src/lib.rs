//! Utility helpers for tests.
//!
//! Scripted navigators and ready-made walks shared by the integration tests.

pub mod navigators;
pub mod walks;

pub use navigators::{CountingNavigator, ScriptedNavigator};
pub use walks::{straight_walk, walk_until_reached, WalkResult};

/// Assert that `actual` lies within `tolerance` of `expected`.
///
/// # Panics
/// Panics with both values in the message when the difference is larger.
pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
