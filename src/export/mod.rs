//! Terminal actions of the composer: save and share.

/// Save and share orchestration with user-facing alerts.
pub mod exporter;
/// Download targets and share sheets.
pub mod target;
