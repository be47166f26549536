use chrono::{DateTime, FixedOffset};

use crate::export::exporter::{self, ExportOutcome};
use crate::export::target::{DownloadTarget, ShareSheet};
use crate::foundation::error::{BoothError, BoothResult};
use crate::session::route::Route;
use crate::session::shot::BakedShots;
use crate::session::store::SessionStore;
use crate::strip::config::{StripConfig, StripView};

/// Result of opening a screen that depends on upstream state.
#[derive(Debug)]
pub enum Opened<T> {
    Ready(T),
    /// Upstream state is missing; navigate here instead.
    Redirect(Route),
}

/// The strip composer: baked shots plus the live styling view.
#[derive(Debug, Clone)]
pub struct StripComposer {
    shots: BakedShots,
    view: StripView,
}

impl StripComposer {
    /// Open for a `Route::Strip`. Without the completion flag or a readable stored strip the
    /// user is sent back to the start.
    #[tracing::instrument(skip(store))]
    pub fn open(route: &Route, store: &dyn SessionStore) -> BoothResult<Opened<Self>> {
        let Route::Strip { complete } = *route else {
            return Err(BoothError::validation(format!(
                "strip composer cannot open {route}"
            )));
        };
        if !complete {
            tracing::info!("strip not marked complete, redirecting home");
            return Ok(Opened::Redirect(Route::Home));
        }

        let state = store.load_or_default()?;
        let Some(shots) = state.baked else {
            tracing::info!("no baked strip in session, redirecting home");
            return Ok(Opened::Redirect(Route::Home));
        };
        Ok(Opened::Ready(Self {
            shots,
            view: StripView::default(),
        }))
    }

    pub fn shots(&self) -> &BakedShots {
        &self.shots
    }

    pub fn view(&self) -> &StripView {
        &self.view
    }

    /// Replace the styling after validating it.
    pub fn set_config(&mut self, config: StripConfig) -> BoothResult<()> {
        config.validate()?;
        self.view.config = config;
        Ok(())
    }

    pub fn toggle_minimized(&mut self) {
        self.view.toggle_minimized();
    }

    pub fn save(&mut self, downloads: &mut dyn DownloadTarget, at: DateTime<FixedOffset>) -> ExportOutcome {
        exporter::save(&mut self.view, &self.shots, downloads, at)
    }

    pub fn share(
        &mut self,
        sheet: &mut dyn ShareSheet,
        downloads: &mut dyn DownloadTarget,
        at: DateTime<FixedOffset>,
    ) -> ExportOutcome {
        exporter::share(&mut self.view, &self.shots, sheet, downloads, at)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flow/composer.rs"]
mod tests;
