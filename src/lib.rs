//! stripbooth is a photobooth pipeline: pick a shot count, capture filtered stills, and compose
//! them into a styled vertical photo strip exported as PNG.
//!
//! The flow runs through three screens that hand typed state to each other through a
//! [`SessionStore`]:
//!
//! - [`ShotSelector`] records how many photos to take
//! - [`BoothScreen`] counts down, captures from a [`FrameSource`] and bakes each shot's filter
//! - [`StripComposer`] lays the baked shots out and saves or shares the rasterized strip
#![forbid(unsafe_code)]

mod foundation;

/// Capture screen internals.
pub mod capture;
/// Filters and the bake step.
pub mod effects;
/// Save and share.
pub mod export;
/// The booth screens.
pub mod flow;
/// Typed cross-screen state.
pub mod session;
/// Strip layout and rasterization.
pub mod strip;

pub use crate::foundation::core::{Rgba8, ShotCount, ShotOption, Size};
pub use crate::foundation::error::{BoothError, BoothResult};

pub use crate::capture::camera::{DirectorySource, FrameSource, SyntheticSource};
pub use crate::capture::clock::{IntervalTicker, ManualTicker, Ticker};
pub use crate::capture::machine::{CaptureMachine, CaptureRequest, CaptureState, TickOutcome};
pub use crate::effects::filter::{FilterOp, FilterTag};
pub use crate::export::exporter::{Alert, ExportOutcome};
pub use crate::export::target::{
    CommandShareSheet, DirectoryDownloads, DownloadTarget, MemoryDownloads, MemoryShareSheet,
    NoShareSheet, ShareSheet,
};
pub use crate::flow::booth::BoothScreen;
pub use crate::flow::composer::{Opened, StripComposer};
pub use crate::flow::selector::ShotSelector;
pub use crate::session::route::Route;
pub use crate::session::shot::{BakedShots, EncodedImage, Shot, ShotList};
pub use crate::session::state::{SESSION_VERSION, SessionState};
pub use crate::session::store::{JsonFileStore, MemoryStore, SessionStore};
pub use crate::strip::config::{DateFormat, DateStamp, StripConfig, StripView};
pub use crate::strip::raster::{PreparedStrip, StripFrame};
