use crate::capture::camera::FrameSource;
use crate::capture::clock::Ticker;
use crate::capture::machine::{CaptureMachine, CaptureRequest, CaptureState, TickOutcome};
use crate::effects::bake::bake_shots;
use crate::effects::filter::FilterTag;
use crate::foundation::error::{BoothError, BoothResult};
use crate::session::route::Route;
use crate::session::store::SessionStore;

/// The capture screen. Owns the frame source for as long as it is open.
pub struct BoothScreen<'a> {
    machine: CaptureMachine,
    source: &'a mut dyn FrameSource,
}

impl<'a> BoothScreen<'a> {
    /// Open the screen for a `Route::Capture` and try to start the camera.
    ///
    /// A camera that fails to open leaves the screen in `CameraUnavailable`; that is not an
    /// error here, the failure is shown on screen instead.
    pub fn open(route: &Route, source: &'a mut dyn FrameSource) -> BoothResult<Self> {
        let Route::Capture { shots } = *route else {
            return Err(BoothError::validation(format!(
                "capture screen cannot open {route}"
            )));
        };

        let mut machine = CaptureMachine::new(shots);
        if let Err(e) = source.open() {
            machine.camera_failed(e.to_string());
        }
        Ok(Self { machine, source })
    }

    pub fn machine(&self) -> &CaptureMachine {
        &self.machine
    }

    pub fn state(&self) -> CaptureState {
        self.machine.state()
    }

    pub fn select_filter(&mut self, filter: FilterTag) {
        self.machine.select_filter(filter);
    }

    pub fn request_capture(&mut self) -> CaptureRequest {
        self.machine.request_capture()
    }

    /// One scheduler tick against the owned source.
    pub fn tick(&mut self) -> BoothResult<TickOutcome> {
        self.machine.tick(&mut *self.source)
    }

    /// Request a photo and run its countdown to the end.
    ///
    /// A request the machine refuses (list full, camera gone) is an error.
    pub fn capture_one(&mut self, ticker: &mut dyn Ticker) -> BoothResult<TickOutcome> {
        self.capture_one_with(ticker, &mut |_| {})
    }

    /// [`BoothScreen::capture_one`], handing every tick's outcome to `observe`.
    pub fn capture_one_with(
        &mut self,
        ticker: &mut dyn Ticker,
        observe: &mut dyn FnMut(TickOutcome),
    ) -> BoothResult<TickOutcome> {
        match self.machine.request_capture() {
            CaptureRequest::Started | CaptureRequest::AlreadyCounting => {
                self.machine
                    .run_countdown_with(ticker, &mut *self.source, observe)
            }
            CaptureRequest::Full => Err(BoothError::validation(format!(
                "all {} shots are already taken",
                self.machine.shots().target()
            ))),
            CaptureRequest::CameraUnavailable => Err(BoothError::camera(
                self.machine
                    .camera_error()
                    .unwrap_or("camera is unavailable")
                    .to_owned(),
            )),
        }
    }

    /// Start over with an empty list.
    pub fn retake(&mut self) -> BoothResult<()> {
        self.machine.reset()
    }

    /// Bake the finished list, persist it and move on to the strip composer.
    #[tracing::instrument(skip_all, fields(shots = self.machine.shots().len()))]
    pub fn finish(&self, store: &mut dyn SessionStore) -> BoothResult<Route> {
        let list = self.machine.complete()?;
        let baked = bake_shots(list)?;
        let target = baked.target();
        store.update(&mut |state| {
            state.selected_shots = Some(target);
            state.baked = Some(baked.clone());
        })?;
        tracing::info!(%target, "baked strip stored");
        Ok(Route::Strip { complete: true })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flow/booth.rs"]
mod tests;
