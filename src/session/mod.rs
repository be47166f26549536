//! Typed state handed from one screen to the next.

/// Navigation routes and their parameters.
pub mod route;
/// Shots, shot lists and encoded frames.
pub mod shot;
/// The versioned session document.
pub mod state;
/// Session persistence.
pub mod store;
