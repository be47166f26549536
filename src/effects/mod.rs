//! Filter tags and the bake step that writes them into pixel data.

/// Baking filters into encoded shots.
pub mod bake;
pub(crate) mod blur;
/// The closed filter set and its op chains.
pub mod filter;
