use crate::{Easing, ScrollState, SmoothScrollOptions};

/// Clamps a normalized scroll value, mapping NaN to the top.
fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// A running animation of the normalized scroll position.
///
/// Both ends stay inside `0.0..=1.0`. The duration is fixed per transition: when a new gesture
/// is [fused](Transition::fuse) in, the remaining distance is covered in a fresh full duration,
/// so interrupted scrolls speed up instead of queueing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    from: f32,
    to: f32,
    started_at_ms: u64,
    duration_ms: u64,
    easing: Easing,
}

impl Transition {
    pub fn new(from: f32, to: f32, started_at_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from: unit(from),
            to: unit(to),
            started_at_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn from(&self) -> f32 {
        self.from
    }

    pub fn to(&self) -> f32 {
        self.to
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_at_ms) >= self.duration_ms
    }

    /// Position at `now_ms`; exactly `to` once finished.
    pub fn position_at(&self, now_ms: u64) -> f32 {
        if self.is_finished(now_ms) {
            return self.to;
        }
        let elapsed = now_ms.saturating_sub(self.started_at_ms);
        let travelled = self.easing.apply(elapsed as f32 / self.duration_ms as f32);
        unit(self.from + (self.to - self.from) * travelled)
    }

    /// Folds a new gesture into the running transition.
    ///
    /// Restarts at `now_ms` from the live position toward `to`, keeping the duration and easing.
    /// Returns the position it restarted from.
    pub fn fuse(&mut self, now_ms: u64, to: f32) -> f32 {
        self.from = self.position_at(now_ms);
        self.to = unit(to);
        self.started_at_ms = now_ms;
        self.from
    }
}

/// Turns discrete wheel/trackpad deltas into an animated, normalized scroll position.
///
/// Position and target both live in `0.0..=1.0` (the scroll container's "vvalue"). Gestures
/// that arrive while a transition is running are fused into it: the target accumulates and
/// the running transition is fused: it restarts from wherever it currently is.
///
/// The adapter drives time: call [`SmoothScroll::tick`] each frame and apply the returned
/// position to the real scroll container.
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    options: SmoothScrollOptions,
    position: f32,
    target: f32,
    transition: Option<Transition>,
}

impl SmoothScroll {
    pub fn new(options: SmoothScrollOptions) -> Self {
        Self {
            options,
            position: 0.0,
            target: 0.0,
            transition: None,
        }
    }

    pub fn options(&self) -> &SmoothScrollOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SmoothScrollOptions) {
        self.options = options;
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn state(&self) -> ScrollState {
        ScrollState {
            current_position: self.position,
            accumulated_target: self.target,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    /// Feeds one raw wheel event.
    ///
    /// `delta_y > 0` scrolls toward the start. The step is
    /// `base_change * unit_modifier / content_height` regardless of the delta's magnitude.
    /// Returns `false` (and changes nothing) for a zero delta or an empty content height.
    pub fn on_wheel(&mut self, delta_y: f32, content_height: f32, now_ms: u64) -> bool {
        if delta_y == 0.0 || delta_y.is_nan() {
            return false;
        }
        if content_height.is_nan() || content_height <= 0.0 {
            gtrace!(content_height, "SmoothScroll::on_wheel ignored");
            return false;
        }

        let change = -(self.options.base_change * self.options.unit_modifier) / content_height;
        let sign = if delta_y > 0.0 { 1.0 } else { -1.0 };
        let target = self.target + change * sign;
        if !target.is_nan() {
            self.target = unit(target);
        }

        if let Some(t) = self.transition.as_mut() {
            self.position = t.fuse(now_ms, self.target);
            gtrace!(from = self.position, to = self.target, "SmoothScroll fused gesture");
        } else {
            self.transition = Some(Transition::new(
                self.position,
                self.target,
                now_ms,
                self.options.duration_ms,
                self.options.easing,
            ));
        }
        true
    }

    /// Advances the running transition.
    ///
    /// Returns the new position while animating (including the final frame), `None` when idle.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        let t = self.transition?;
        self.position = t.position_at(now_ms);
        if t.is_finished(now_ms) {
            self.transition = None;
        }
        Some(self.position)
    }

    /// Drops the running transition, leaving the position where it is.
    pub fn cancel(&mut self) {
        self.transition = None;
    }

    /// Snaps position and target to an externally forced value (scrollbar drag, reload
    /// scrolling back to the top) without animating.
    pub fn reset_to(&mut self, position: f32) {
        let position = unit(position);
        self.position = position;
        self.target = position;
        self.transition = None;
    }
}
