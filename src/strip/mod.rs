//! Strip composition: presentation config, geometry and rasterization.

/// Strip configuration and the composer view.
pub mod config;
/// Date stamp text rendering.
pub mod date_stamp;
/// Vertical strip geometry.
pub mod layout;
/// CPU rasterization of a prepared strip.
pub mod raster;
