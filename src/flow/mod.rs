//! The three screens of the booth, wired to the session store.

/// Capture screen.
pub mod booth;
/// Strip composer screen.
pub mod composer;
/// Shot count menu.
pub mod selector;
