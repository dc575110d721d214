//! Radiation pulse animation
//!
//! Every band runs the same two-phase loop forever:
//!
//! 1. **Expand**: ease out from its start state to a drifted, scaled-up,
//!    fully transparent, recolored state over the pulse duration.
//! 2. **Reset**: snap back to an invisible, unscaled, semi-opaque state and
//!    expand again immediately.
//!
//! Sibling bands are staggered by a one-time startup delay proportional to
//! their index, after which they settle into an evenly spaced rhythm.
//!
//! All bands are advanced by a single [`PulseAnimator::tick`]. Leftover
//! time carries across phase boundaries, so one long tick lands exactly
//! where many short ones would.

use std::time::Duration;

use glam::{DAffine2, DVec2};
use tracing::{trace, warn};

use crate::color::Rgb;
use crate::config::PulseConfig;
use crate::geometry::Tile;
use crate::radiation::RadiationField;
use crate::surface::NodeId;

/// Pulse timing and target appearance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseTiming {
    /// Length of one expansion
    pub duration: Duration,
    /// Startup delay per band index
    pub stagger: Duration,
    /// Downward drift at full expansion
    pub drop: f64,
    pub initial_opacity: f64,
    pub reset_opacity: f64,
    pub ease_exponent: f64,
    /// Color at rest
    pub rest_color: Rgb,
    /// Color at full expansion
    pub pulse_color: Rgb,
}

impl PulseTiming {
    pub fn from_config(
        config: &PulseConfig,
        tile: &Tile,
        rest_color: Rgb,
        pulse_color: Rgb,
    ) -> Self {
        if config.duration_ms == 0 {
            warn!("Pulse duration of 0 ms clamped to 1 ns");
        }
        Self {
            // Zero duration would never complete a cycle
            duration: Duration::from_millis(config.duration_ms).max(Duration::from_nanos(1)),
            stagger: Duration::from_millis(config.stagger_ms),
            drop: config.drop_tiles * tile.height,
            initial_opacity: config.initial_opacity,
            reset_opacity: config.reset_opacity,
            ease_exponent: config.ease_exponent,
            rest_color,
            pulse_color,
        }
    }

    /// Ease-out curve: fast start, slow finish
    pub fn ease(&self, progress: f64) -> f64 {
        progress.clamp(0.0, 1.0).powf(self.ease_exponent)
    }
}

/// Translation plus uniform scale about a fixed origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandTransform {
    pub translate: DVec2,
    pub scale: f64,
    /// Scaling origin (the band's epicenter)
    pub origin: DVec2,
}

impl BandTransform {
    /// Affine matrix: scale about the origin, then translate
    pub fn to_affine(&self) -> DAffine2 {
        DAffine2::from_translation(self.translate + self.origin)
            * DAffine2::from_scale(DVec2::splat(self.scale))
            * DAffine2::from_translation(-self.origin)
    }
}

/// Animated appearance of a band
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandState {
    pub transform: BandTransform,
    pub opacity: f64,
    pub fill: Rgb,
}

impl BandState {
    /// Blend toward `target`; `t = 0` returns `self` unchanged
    pub fn interpolate(&self, target: &BandState, t: f64) -> BandState {
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *target;
        }
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        BandState {
            transform: BandTransform {
                translate: self.transform.translate.lerp(target.transform.translate, t),
                scale: lerp(self.transform.scale, target.transform.scale),
                origin: self.transform.origin,
            },
            opacity: lerp(self.opacity, target.opacity),
            fill: self.fill.lerp(target.fill, t),
        }
    }
}

/// Where a band is in its loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PulsePhase {
    /// Waiting out the startup stagger
    Delay { remaining: Duration },
    /// Expanding
    Expand { elapsed: Duration },
    /// Halted by [`PulseAnimator::stop`]
    Stopped,
}

/// Animation channel for one band
#[derive(Clone, Debug, PartialEq)]
pub struct PulseChannel {
    pub field: u32,
    pub band: u32,
    pub node: NodeId,
    pub phase: PulsePhase,
    /// Completed expansions
    pub cycles: u64,
    state: BandState,
    from: BandState,
    initial: BandState,
    reset: BandState,
    target: BandState,
}

impl PulseChannel {
    fn new(field: u32, band: u32, node: NodeId, origin: DVec2, scale: f64, timing: &PulseTiming) -> Self {
        let rest = BandTransform {
            translate: DVec2::ZERO,
            scale: 0.0,
            origin,
        };
        let initial = BandState {
            transform: rest,
            opacity: timing.initial_opacity,
            fill: timing.rest_color,
        };
        let reset = BandState {
            opacity: timing.reset_opacity,
            ..initial
        };
        let target = BandState {
            transform: BandTransform {
                translate: DVec2::new(0.0, timing.drop),
                scale,
                origin,
            },
            opacity: 0.0,
            fill: timing.pulse_color,
        };

        Self {
            field,
            band,
            node,
            phase: PulsePhase::Delay {
                remaining: timing.stagger * band,
            },
            cycles: 0,
            state: initial,
            from: initial,
            initial,
            reset,
            target,
        }
    }

    /// Current appearance
    pub fn state(&self) -> &BandState {
        &self.state
    }

    /// Appearance right after every reset
    pub fn reset_state(&self) -> &BandState {
        &self.reset
    }

    /// Appearance at full expansion
    pub fn target_state(&self) -> &BandState {
        &self.target
    }

    fn restart(&mut self, timing: &PulseTiming) {
        self.phase = PulsePhase::Delay {
            remaining: timing.stagger * self.band,
        };
        self.cycles = 0;
        self.state = self.initial;
        self.from = self.initial;
    }

    fn stop(&mut self) {
        self.phase = PulsePhase::Stopped;
        self.state = self.reset;
        self.from = self.reset;
    }

    fn complete_cycles(&mut self, count: u64) {
        self.cycles += count;
        self.from = self.reset;
        self.state = self.reset;
        trace!(
            field = self.field,
            band = self.band,
            cycles = self.cycles,
            "Pulse reset"
        );
    }

    /// Advance by `dt`
    fn advance(&mut self, mut dt: Duration, timing: &PulseTiming) {
        loop {
            match self.phase {
                PulsePhase::Stopped => return,
                PulsePhase::Delay { remaining } => {
                    if dt < remaining {
                        self.phase = PulsePhase::Delay {
                            remaining: remaining - dt,
                        };
                        return;
                    }
                    dt -= remaining;
                    self.phase = PulsePhase::Expand {
                        elapsed: Duration::ZERO,
                    };
                    self.state = self.from;
                }
                PulsePhase::Expand { elapsed } => {
                    let total = elapsed + dt;
                    if total < timing.duration {
                        self.phase = PulsePhase::Expand { elapsed: total };
                        let progress = total.as_secs_f64() / timing.duration.as_secs_f64();
                        self.state = self.from.interpolate(&self.target, timing.ease(progress));
                        return;
                    }

                    // Finish this expansion, then skip any whole cycles the
                    // remaining time covers
                    let overflow = total - timing.duration;
                    let duration_ns = timing.duration.as_nanos();
                    let skipped = overflow.as_nanos() / duration_ns;
                    let leftover = (overflow.as_nanos() % duration_ns) as u64;

                    self.complete_cycles(1 + skipped as u64);
                    self.phase = PulsePhase::Expand {
                        elapsed: Duration::ZERO,
                    };
                    if leftover == 0 {
                        return;
                    }
                    dt = Duration::from_nanos(leftover);
                }
            }
        }
    }
}

/// Scheduler state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorStatus {
    Running,
    Paused,
    Stopped,
}

/// A band whose appearance changed during a tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandUpdate {
    pub node: NodeId,
    pub state: BandState,
}

/// Drives every band of every field from one clock
#[derive(Clone, Debug)]
pub struct PulseAnimator {
    timing: PulseTiming,
    channels: Vec<PulseChannel>,
    status: AnimatorStatus,
    elapsed: Duration,
}

impl PulseAnimator {
    pub fn new(timing: PulseTiming) -> Self {
        Self {
            timing,
            channels: Vec::new(),
            status: AnimatorStatus::Running,
            elapsed: Duration::ZERO,
        }
    }

    /// Register one channel per band of `field`
    pub fn add_field(&mut self, field: &RadiationField) {
        for band in &field.bands {
            self.channels.push(PulseChannel::new(
                field.index,
                band.index,
                band.node,
                field.epicenter,
                field.scale,
                &self.timing,
            ));
        }
    }

    pub fn timing(&self) -> &PulseTiming {
        &self.timing
    }

    pub fn channels(&self) -> &[PulseChannel] {
        &self.channels
    }

    pub fn status(&self) -> AnimatorStatus {
        self.status
    }

    /// Time advanced while running
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Current state of every channel, for an initial paint
    pub fn snapshot(&self) -> Vec<BandUpdate> {
        self.channels
            .iter()
            .map(|c| BandUpdate {
                node: c.node,
                state: c.state,
            })
            .collect()
    }

    /// Advance every band by `dt` and report those that changed
    ///
    /// Does nothing while paused or stopped.
    pub fn tick(&mut self, dt: Duration) -> Vec<BandUpdate> {
        if self.status != AnimatorStatus::Running {
            return Vec::new();
        }
        self.elapsed += dt;

        let timing = self.timing;
        let mut updates = Vec::new();
        for channel in &mut self.channels {
            let before = channel.state;
            channel.advance(dt, &timing);
            if channel.state != before {
                updates.push(BandUpdate {
                    node: channel.node,
                    state: channel.state,
                });
            }
        }
        updates
    }

    /// Freeze all bands in place
    pub fn pause(&mut self) {
        if self.status == AnimatorStatus::Running {
            self.status = AnimatorStatus::Paused;
        }
    }

    /// Continue after [`Self::pause`]
    pub fn resume(&mut self) {
        if self.status == AnimatorStatus::Paused {
            self.status = AnimatorStatus::Running;
        }
    }

    /// Halt every band at its reset appearance
    pub fn stop(&mut self) -> Vec<BandUpdate> {
        self.status = AnimatorStatus::Stopped;
        self.channels
            .iter_mut()
            .map(|c| {
                c.stop();
                BandUpdate {
                    node: c.node,
                    state: c.state,
                }
            })
            .collect()
    }

    /// Start over from the initial staggered state
    pub fn restart(&mut self) -> Vec<BandUpdate> {
        self.status = AnimatorStatus::Running;
        self.elapsed = Duration::ZERO;
        let timing = self.timing;
        self.channels
            .iter_mut()
            .map(|c| {
                c.restart(&timing);
                BandUpdate {
                    node: c.node,
                    state: c.state,
                }
            })
            .collect()
    }
}
