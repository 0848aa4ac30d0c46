//! Panel transition state machine.
//!
//! The content region shows exactly one mounted panel. When the selection
//! changes the mounted panel plays an exit animation, is unmounted once the
//! exit completes, and the newly selected panel is mounted and plays its enter
//! animation. The controller is driven by two inputs:
//!
//! - [`TransitionController::request`] whenever the selection changes, and
//! - [`TransitionController::tick`] on every frame tick.
//!
//! A newer request supersedes an older one. Because the outgoing panel stays
//! mounted until its exit completes, and the incoming panel is only chosen at
//! that moment, a target abandoned mid-exit is never mounted. Completion of an
//! enter whose panel is no longer selected is ignored.
//!
//! Time is always passed in, which keeps the controller deterministic under
//! test.

use std::time::{Duration, Instant};

use contextflow_types::PanelId;
use tracing::debug;

/// Animation parameters for panel transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionSettings {
    /// When `false` every selection swaps panels immediately.
    pub enabled: bool,
    /// Duration of each half (exit or enter) of a transition.
    pub duration: Duration,
    /// Vertical travel, in rows, of entering and exiting content.
    pub offset_rows: u16,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            duration: Duration::from_millis(300),
            offset_rows: 2,
        }
    }
}

impl MotionSettings {
    /// Settings that degrade every transition to an immediate swap.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Observable state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// The panel is mounted, fully visible and interactive.
    Idle(PanelId),
    /// The panel is still mounted and animating out.
    ExitingFrom(PanelId),
    /// The panel has been mounted and is animating in.
    EnteringTo(PanelId),
}

impl TransitionPhase {
    pub fn panel(&self) -> PanelId {
        match *self {
            TransitionPhase::Idle(id) | TransitionPhase::ExitingFrom(id) | TransitionPhase::EnteringTo(id) => id,
        }
    }
}

/// Lifecycle notifications produced while the controller advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    Unmounted(PanelId),
    Mounted(PanelId),
    Settled(PanelId),
}

/// What the content region should draw for the current instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    pub panel: PanelId,
    /// 0.0 is fully transparent, 1.0 fully opaque.
    pub opacity: f32,
    /// Rows to shift the content down (positive) or up (negative).
    pub offset_rows: i16,
    /// Only a settled panel accepts input.
    pub interactive: bool,
    /// Linear progress of the enter animation, 1.0 in every other phase.
    /// Panels use it to bring their sections in one after another.
    pub reveal: f32,
}

#[derive(Debug, Clone)]
pub struct TransitionController {
    settings: MotionSettings,
    phase: TransitionPhase,
    target: PanelId,
    started_at: Instant,
}

impl TransitionController {
    /// Creates a controller with `initial` mounted. With motion enabled the
    /// initial panel plays its enter animation.
    pub fn new(initial: PanelId, settings: MotionSettings, now: Instant) -> Self {
        let phase = if settings.enabled {
            TransitionPhase::EnteringTo(initial)
        } else {
            TransitionPhase::Idle(initial)
        };
        Self {
            settings,
            phase,
            target: initial,
            started_at: now,
        }
    }

    pub fn settings(&self) -> MotionSettings {
        self.settings
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// The panel currently mounted in the content region.
    pub fn mounted(&self) -> PanelId {
        self.phase.panel()
    }

    /// The most recently requested panel.
    pub fn target(&self) -> PanelId {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        !matches!(self.phase, TransitionPhase::Idle(_))
    }

    /// Points the controller at `target`. Requests for the current target are
    /// ignored and return no events; in particular they never restart an
    /// enter animation.
    pub fn request(&mut self, target: PanelId, now: Instant) -> Vec<TransitionEvent> {
        if target == self.target {
            return Vec::new();
        }
        self.target = target;

        if !self.settings.enabled {
            let previous = self.mounted();
            self.phase = TransitionPhase::Idle(target);
            return vec![
                TransitionEvent::Unmounted(previous),
                TransitionEvent::Mounted(target),
                TransitionEvent::Settled(target),
            ];
        }

        match self.phase {
            TransitionPhase::Idle(mounted) => {
                self.phase = TransitionPhase::ExitingFrom(mounted);
                self.started_at = now;
            }
            TransitionPhase::ExitingFrom(mounted) if mounted == target => {
                // Back to the panel that is leaving: reverse into its enter
                // from the same visible opacity.
                let exit_progress = self.progress(now);
                let enter_progress = ease_out_inverse(1.0 - ease_out(exit_progress));
                self.phase = TransitionPhase::EnteringTo(mounted);
                self.started_at = self.rewind(now, enter_progress);
            }
            TransitionPhase::ExitingFrom(_) => {
                // Still leaving; the new target simply replaces the old one.
            }
            TransitionPhase::EnteringTo(mounted) => {
                let enter_progress = self.progress(now);
                let exit_progress = ease_out_inverse(1.0 - ease_out(enter_progress));
                self.phase = TransitionPhase::ExitingFrom(mounted);
                self.started_at = self.rewind(now, exit_progress);
            }
        }
        debug!(target = %target, phase = ?self.phase, "Transition requested");
        Vec::new()
    }

    /// Advances the state machine. Call on every frame tick.
    pub fn tick(&mut self, now: Instant) -> Vec<TransitionEvent> {
        if self.progress(now) < 1.0 {
            return Vec::new();
        }
        match self.phase {
            TransitionPhase::Idle(_) => Vec::new(),
            TransitionPhase::ExitingFrom(previous) => {
                let next = self.target;
                self.phase = TransitionPhase::EnteringTo(next);
                self.started_at = now;
                debug!(from = %previous, to = %next, "Exit complete; mounting next panel");
                vec![TransitionEvent::Unmounted(previous), TransitionEvent::Mounted(next)]
            }
            TransitionPhase::EnteringTo(mounted) if mounted == self.target => {
                self.phase = TransitionPhase::Idle(mounted);
                vec![TransitionEvent::Settled(mounted)]
            }
            TransitionPhase::EnteringTo(stale) => {
                debug!(panel = %stale, target = %self.target, "Ignoring stale enter completion");
                self.phase = TransitionPhase::ExitingFrom(stale);
                self.started_at = now;
                Vec::new()
            }
        }
    }

    /// Visual parameters for `now`.
    pub fn frame(&self, now: Instant) -> TransitionFrame {
        let travel = self.settings.offset_rows as f32;
        match self.phase {
            TransitionPhase::Idle(panel) => TransitionFrame {
                panel,
                opacity: 1.0,
                offset_rows: 0,
                interactive: true,
                reveal: 1.0,
            },
            TransitionPhase::EnteringTo(panel) => {
                let progress = self.progress(now);
                let visible = ease_out(progress);
                TransitionFrame {
                    panel,
                    opacity: visible,
                    offset_rows: (travel * (1.0 - visible)).round() as i16,
                    interactive: false,
                    reveal: progress,
                }
            }
            TransitionPhase::ExitingFrom(panel) => {
                let gone = ease_out(self.progress(now));
                TransitionFrame {
                    panel,
                    opacity: 1.0 - gone,
                    offset_rows: -((travel * gone).round() as i16),
                    interactive: false,
                    reveal: 1.0,
                }
            }
        }
    }

    /// Linear progress of the current phase in `0.0..=1.0`.
    fn progress(&self, now: Instant) -> f32 {
        if matches!(self.phase, TransitionPhase::Idle(_)) || self.settings.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.settings.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Start instant that makes `progress(now) == progress`.
    fn rewind(&self, now: Instant, progress: f32) -> Instant {
        let elapsed = self.settings.duration.mul_f32(progress.clamp(0.0, 1.0));
        now.checked_sub(elapsed).unwrap_or(now)
    }
}

/// Cubic ease-out.
pub(crate) fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

fn ease_out_inverse(y: f32) -> f32 {
    let y = y.clamp(0.0, 1.0);
    1.0 - (1.0 - y).cbrt()
}
