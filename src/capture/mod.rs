//! Capture screen internals: frame sources, the tick source and the countdown state machine.

/// Frame sources standing in for the live camera.
pub mod camera;
/// Tick sources for the countdown.
pub mod clock;
/// The capture state machine.
pub mod machine;
