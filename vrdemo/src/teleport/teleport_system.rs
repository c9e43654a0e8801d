use cgmath::{Vector3, vec3};
use engine::{
    teleport_log,
    timer::{TimerHandle, TimerQueue},
};

use crate::{
    config::TeleportConfig,
    pose::CharacterPose,
    screen::{FadeColor, ScreenFader},
};

use super::TeleportCandidate;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TeleportFadeState {
    #[default]
    Idle,
    FadingOut,
    FadingIn,
}

/// Deferred work scheduled by the teleport sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeleportTask {
    /// The screen is fully faded out; move the player and fade back in
    FadeOutComplete,
    /// The screen is fully visible again
    FadeInComplete,
}

/// What happened when the fade-out finished.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TeleportOutcome {
    Moved { to: Vector3<f32> },
    /// The destination had gone invalid during the fade; the player stays put
    SkippedInvalidDestination,
}

/// Fade out, teleport, fade in.
///
/// At most one timer is pending at any moment. A new teleport request while
/// fading out is ignored; while fading in it restarts the sequence.
pub struct TeleportSystem {
    state: TeleportFadeState,
    pending: Option<TimerHandle>,
    fade_time: f32,
    fade_color: FadeColor,
}

impl TeleportSystem {
    pub fn new(config: &TeleportConfig) -> Self {
        TeleportSystem {
            state: TeleportFadeState::Idle,
            pending: None,
            fade_time: config.fade_time,
            fade_color: config.fade_color,
        }
    }

    pub fn state(&self) -> TeleportFadeState {
        self.state
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending.as_ref().is_some_and(TimerHandle::is_pending)
    }

    /// Start fading out. Returns false when the request was ignored.
    pub fn begin_teleport(
        &mut self,
        fader: &mut dyn ScreenFader,
        scheduler: &mut TimerQueue<TeleportTask>,
    ) -> bool {
        if self.state == TeleportFadeState::FadingOut {
            teleport_log!(DEBUG, "teleport already fading out, ignoring request");
            return false;
        }

        fader.fade_screen(0.0, 1.0, self.fade_time, self.fade_color);
        // Replacing the handle cancels a fade-in timer from a previous teleport
        self.pending = Some(scheduler.schedule_once(self.fade_time, TeleportTask::FadeOutComplete));
        self.state = TeleportFadeState::FadingOut;

        teleport_log!(DEBUG, "teleport started, fading out over {}s", self.fade_time);
        true
    }

    /// Dispatch a fired timer task. `candidate` is read now, not when the
    /// teleport started: the player may have aimed elsewhere during the fade.
    pub fn handle_task(
        &mut self,
        task: TeleportTask,
        candidate: &TeleportCandidate,
        body: &mut CharacterPose,
        fader: &mut dyn ScreenFader,
        scheduler: &mut TimerQueue<TeleportTask>,
    ) -> Option<TeleportOutcome> {
        match task {
            TeleportTask::FadeOutComplete => {
                self.complete_fade_out(candidate, body, fader, scheduler)
            }
            TeleportTask::FadeInComplete => {
                self.complete_fade_in();
                None
            }
        }
    }

    fn complete_fade_out(
        &mut self,
        candidate: &TeleportCandidate,
        body: &mut CharacterPose,
        fader: &mut dyn ScreenFader,
        scheduler: &mut TimerQueue<TeleportTask>,
    ) -> Option<TeleportOutcome> {
        if self.state != TeleportFadeState::FadingOut {
            teleport_log!(WARN, "fade-out timer fired while {:?}", self.state);
            return None;
        }

        let outcome = match candidate.valid_destination() {
            Some(destination) => {
                body.position = destination + vec3(0.0, body.capsule_half_height, 0.0);
                teleport_log!(INFO, "teleported to {:?}", body.position);
                TeleportOutcome::Moved { to: body.position }
            }
            None => {
                teleport_log!(DEBUG, "destination invalid at end of fade, not moving");
                TeleportOutcome::SkippedInvalidDestination
            }
        };

        fader.fade_screen(1.0, 0.0, self.fade_time, self.fade_color);
        self.pending = Some(scheduler.schedule_once(self.fade_time, TeleportTask::FadeInComplete));
        self.state = TeleportFadeState::FadingIn;

        Some(outcome)
    }

    fn complete_fade_in(&mut self) {
        if self.state == TeleportFadeState::FadingIn {
            self.state = TeleportFadeState::Idle;
            self.pending = None;
        }
    }

    /// Abort any sequence in flight and drop its timer.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            teleport_log!(DEBUG, "teleport cancelled while {:?}", self.state);
        }
        self.state = TeleportFadeState::Idle;
    }
}
