//! Per-marker transition state machine.
//!
//! Markers move through `Entering -> Idle`, `Idle -> Updating -> Idle` and
//! `* -> Exiting -> removed`. Starting a transition on a marker that is
//! already animating supersedes the old one: the new transition starts from
//! the geometry sampled at the moment it is issued.

use serde::{Deserialize, Serialize};

/// Easing curve applied to transition progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    #[default]
    InOutCubic,
}

impl Ease {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// Animation phase of one marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPhase {
    Entering,
    Idle,
    Updating,
    Exiting,
}

/// Animatable marker attributes in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerGeometry {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub opacity: f64,
}

impl MarkerGeometry {
    #[must_use]
    pub fn visible(x: f64, y: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            radius,
            opacity: 1.0,
        }
    }

    /// Same position, collapsed and transparent.
    #[must_use]
    pub fn collapsed(self) -> Self {
        Self {
            radius: 0.0,
            opacity: 0.0,
            ..self
        }
    }

    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            radius: mix(self.radius, to.radius),
            opacity: mix(self.opacity, to.opacity),
        }
    }
}

/// Timing shared by every transition of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionTiming {
    pub duration_ms: f64,
    /// Extra delay per record index on updates.
    pub stagger_ms: f64,
    pub ease: Ease,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            duration_ms: 1_000.0,
            stagger_ms: 5.0,
            ease: Ease::default(),
        }
    }
}

/// One in-flight interpolation between two geometries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: MarkerGeometry,
    pub to: MarkerGeometry,
    pub start_ms: f64,
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub ease: Ease,
}

impl Transition {
    /// Linear progress in `[0, 1]` at `now_ms`, before easing.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        let elapsed = now_ms - self.start_ms - self.delay_ms;
        if elapsed <= 0.0 {
            return 0.0;
        }
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed / self.duration_ms).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn sample(&self, now_ms: f64) -> MarkerGeometry {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, self.ease.apply(t))
    }

    #[must_use]
    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    #[must_use]
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.delay_ms + self.duration_ms.max(0.0)
    }
}
