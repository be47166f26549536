use crate::capture::camera::FrameSource;
use crate::capture::clock::Ticker;
use crate::effects::filter::FilterTag;
use crate::foundation::core::ShotCount;
use crate::foundation::error::{BoothError, BoothResult};
use crate::session::shot::{Shot, ShotList};

/// Countdown start value, in ticks.
pub const COUNTDOWN_START: u8 = 3;

/// Where the capture screen currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    /// Waiting for the user to ask for a photo.
    Idle,
    /// Counting down; the payload is the number still on screen.
    Countdown(u8),
    /// Every shot is taken; only `complete` is offered.
    Complete,
    /// The camera could not be used. Terminal for this session.
    CameraUnavailable,
}

/// Answer to a capture request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureRequest {
    /// A countdown was started.
    Started,
    /// A countdown is already running; nothing changed.
    AlreadyCounting,
    /// The list is already full; nothing changed.
    Full,
    /// Capture is disabled because the camera failed.
    CameraUnavailable,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No countdown running.
    Idle,
    /// The countdown moved to this value.
    Counting(u8),
    /// A frame was captured and appended at `index`.
    Captured {
        /// Position of the new shot.
        index: usize,
        /// Filter the shot was tagged with.
        filter: FilterTag,
        /// `true` when this shot filled the list.
        complete: bool,
    },
    /// The countdown ran out but the source had no frame ready.
    NoFrame,
}

/// Capture state machine. All transitions happen on explicit calls, so it is driven by a
/// [`Ticker`] in production and step by step in tests.
#[derive(Debug, Clone)]
pub struct CaptureMachine {
    state: CaptureState,
    shots: ShotList,
    filter: FilterTag,
    camera_error: Option<String>,
}

impl CaptureMachine {
    /// Idle machine with an empty list for `target` shots.
    pub fn new(target: ShotCount) -> Self {
        Self {
            state: CaptureState::Idle,
            shots: ShotList::new(target),
            filter: FilterTag::None,
            camera_error: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Shots taken so far.
    pub fn shots(&self) -> &ShotList {
        &self.shots
    }

    /// Filter the next shot will be tagged with.
    pub fn selected_filter(&self) -> FilterTag {
        self.filter
    }

    /// User-facing camera failure message, if the camera failed.
    pub fn camera_error(&self) -> Option<&str> {
        self.camera_error.as_deref()
    }

    /// Choose the filter for subsequent shots (preview only until baked).
    pub fn select_filter(&mut self, filter: FilterTag) {
        self.filter = filter;
    }

    /// Ask for a photo. Starts a countdown only from `Idle` with room left in the list.
    pub fn request_capture(&mut self) -> CaptureRequest {
        match self.state {
            CaptureState::CameraUnavailable => CaptureRequest::CameraUnavailable,
            CaptureState::Countdown(_) => CaptureRequest::AlreadyCounting,
            CaptureState::Complete => CaptureRequest::Full,
            CaptureState::Idle if self.shots.is_complete() => CaptureRequest::Full,
            CaptureState::Idle => {
                self.state = CaptureState::Countdown(COUNTDOWN_START);
                tracing::debug!(
                    taken = self.shots.len(),
                    target = %self.shots.target(),
                    "countdown started"
                );
                CaptureRequest::Started
            }
        }
    }

    /// Advance one tick. When the countdown reaches zero the frame is grabbed in the same tick.
    ///
    /// An error from the source marks the camera unavailable and is returned.
    pub fn tick(&mut self, source: &mut dyn FrameSource) -> BoothResult<TickOutcome> {
        let n = match self.state {
            CaptureState::Countdown(n) => n,
            _ => return Ok(TickOutcome::Idle),
        };
        if n > 1 {
            self.state = CaptureState::Countdown(n - 1);
            return Ok(TickOutcome::Counting(n - 1));
        }

        let frame = match source.grab_frame() {
            Ok(frame) => frame,
            Err(e) => {
                self.camera_failed(e.to_string());
                return Err(e);
            }
        };

        let Some(src) = frame else {
            tracing::warn!("frame source had no frame ready");
            self.state = CaptureState::Idle;
            return Ok(TickOutcome::NoFrame);
        };

        let index = self.shots.len();
        self.shots.push(Shot {
            src,
            filter: self.filter,
        })?;
        let complete = self.shots.is_complete();
        self.state = if complete {
            CaptureState::Complete
        } else {
            CaptureState::Idle
        };
        tracing::info!(index, filter = %self.filter, complete, "captured shot");

        Ok(TickOutcome::Captured {
            index,
            filter: self.filter,
            complete,
        })
    }

    /// Tick until the running countdown (if any) has finished.
    pub fn run_countdown(
        &mut self,
        ticker: &mut dyn Ticker,
        source: &mut dyn FrameSource,
    ) -> BoothResult<TickOutcome> {
        self.run_countdown_with(ticker, source, &mut |_| {})
    }

    /// [`CaptureMachine::run_countdown`], handing every tick's outcome to `observe`.
    pub fn run_countdown_with(
        &mut self,
        ticker: &mut dyn Ticker,
        source: &mut dyn FrameSource,
        observe: &mut dyn FnMut(TickOutcome),
    ) -> BoothResult<TickOutcome> {
        let mut last = TickOutcome::Idle;
        while matches!(self.state, CaptureState::Countdown(_)) {
            ticker.wait_tick();
            last = self.tick(source)?;
            observe(last);
        }
        Ok(last)
    }

    /// Record a device failure. Capture stays disabled for the rest of the session.
    pub fn camera_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(%reason, "camera unavailable");
        self.camera_error = Some(reason);
        self.state = CaptureState::CameraUnavailable;
    }

    /// Throw away every shot and any running countdown.
    pub fn reset(&mut self) -> BoothResult<()> {
        if self.state == CaptureState::CameraUnavailable {
            return Err(BoothError::camera(
                "capture is disabled after a camera failure",
            ));
        }
        self.shots.clear();
        self.state = CaptureState::Idle;
        Ok(())
    }

    /// The full list, available only once every shot is taken.
    pub fn complete(&self) -> BoothResult<&ShotList> {
        if self.state != CaptureState::Complete {
            return Err(BoothError::validation(format!(
                "strip is not complete ({} of {} shots)",
                self.shots.len(),
                self.shots.target()
            )));
        }
        Ok(&self.shots)
    }

    /// Progress indicator shown over the preview.
    pub fn status_line(&self) -> String {
        if self.shots.is_complete() {
            "All shots taken!".to_owned()
        } else {
            format!("{} of {}", self.shots.len() + 1, self.shots.target())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/machine.rs"]
mod tests;
