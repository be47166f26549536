use crate::foundation::core::{ShotCount, ShotOption};
use crate::foundation::error::{BoothError, BoothResult};
use crate::session::route::Route;
use crate::session::store::SessionStore;

/// Message shown when the user tries to continue without picking a count.
pub const NO_SELECTION_MESSAGE: &str = "Please select the number of shots before continuing!";

/// The shot count menu.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShotSelector {
    selected: Option<ShotCount>,
}

impl ShotSelector {
    /// Open the menu, preselecting a previously saved count.
    ///
    /// An unreadable session opens the menu with nothing selected.
    pub fn open(store: &dyn SessionStore) -> BoothResult<Self> {
        let state = store.load_or_default()?;
        Ok(Self {
            selected: state.selected_shots,
        })
    }

    pub fn options(&self) -> &'static [ShotOption] {
        &ShotCount::ALL
    }

    pub fn selected(&self) -> Option<ShotCount> {
        self.selected
    }

    pub fn choose(&mut self, count: ShotCount) {
        self.selected = Some(count);
    }

    /// Persist the choice and move on to the capture screen.
    ///
    /// Any strip from an earlier session is discarded, and an unreadable session is replaced.
    #[tracing::instrument(skip(self, store), fields(selected = ?self.selected))]
    pub fn proceed(&self, store: &mut dyn SessionStore) -> BoothResult<Route> {
        let Some(shots) = self.selected else {
            return Err(BoothError::validation(NO_SELECTION_MESSAGE));
        };
        store.update(&mut |state| {
            state.selected_shots = Some(shots);
            state.baked = None;
        })?;
        Ok(Route::Capture { shots })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flow/selector.rs"]
mod tests;
