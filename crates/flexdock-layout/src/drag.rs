#![forbid(unsafe_code)]

//! Pointer drag session.
//!
//! A host forwards raw pointer events to a [`DragSession`]; the session
//! decides whether a gesture is a click, a double click or a drag, and
//! calls the matching [`DragHandler`] callbacks.
//!
//! ```text
//! Idle -> Armed -> Dragging -> Idle
//!           \  \-> Captured -> Idle   (drag_start vetoed)
//!            \---> Idle               (click, cancel)
//! ```
//!
//! While a session is active the host shows a full-viewport capture
//! overlay through [`PointerCapture`]; whichever way the session ends, the
//! overlay is hidden exactly once.

use std::time::{Duration, Instant};

use flexdock_core::pointer::PointerPosition;
use serde::{Deserialize, Serialize};

use crate::logging::{debug, warn};

/// Tunables for click and drag recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSessionConfig {
    /// Pixels the pointer must move on either axis before a drag starts.
    pub drag_threshold: i32,
    /// Maximum gap between two clicks of a double click.
    pub double_click_window: Duration,
    /// Maximum distance between two clicks of a double click, and between
    /// pointer down and up of a click.
    pub double_click_tolerance: i32,
}

impl Default for DragSessionConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 5,
            double_click_window: Duration::from_millis(500),
            double_click_tolerance: 5,
        }
    }
}

/// Callbacks for one gesture. Every method has a no-op default.
pub trait DragHandler {
    /// The pointer crossed the drag threshold. `origin` is where it went
    /// down. Return `false` to veto the drag.
    fn drag_start(&mut self, origin: PointerPosition) -> bool {
        let _ = origin;
        true
    }

    fn drag_move(&mut self, position: PointerPosition) {
        let _ = position;
    }

    fn drag_end(&mut self, position: PointerPosition) {
        let _ = position;
    }

    /// The gesture ended without a completed drag, or was cancelled.
    fn drag_cancel(&mut self, was_dragging: bool) {
        let _ = was_dragging;
    }

    fn click(&mut self, position: PointerPosition) {
        let _ = position;
    }

    fn double_click(&mut self, position: PointerPosition) {
        let _ = position;
    }
}

/// Host hook for the capture overlay.
pub trait PointerCapture {
    fn show_overlay(&mut self);
    fn hide_overlay(&mut self);
}

/// Hosts without an overlay.
impl PointerCapture for () {
    fn show_overlay(&mut self) {}
    fn hide_overlay(&mut self) {}
}

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragPhase {
    Idle,
    Armed {
        origin: PointerPosition,
        current: PointerPosition,
    },
    Dragging {
        origin: PointerPosition,
        current: PointerPosition,
    },
    /// The handler vetoed the drag; the pointer stays captured until it is
    /// released.
    Captured {
        origin: PointerPosition,
        current: PointerPosition,
    },
}

impl DragPhase {
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Why an event changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
    ThresholdNotReached,
    DragVetoed,
}

/// What one event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Armed {
        origin: PointerPosition,
    },
    DragStarted {
        origin: PointerPosition,
        current: PointerPosition,
    },
    DragVetoed {
        origin: PointerPosition,
    },
    DragMoved {
        previous: PointerPosition,
        current: PointerPosition,
    },
    DragEnded {
        end: PointerPosition,
    },
    Clicked {
        position: PointerPosition,
    },
    DoubleClicked {
        position: PointerPosition,
    },
    /// Pointer released without a drag and too far away for a click.
    Released {
        position: PointerPosition,
    },
    Canceled {
        was_dragging: bool,
    },
    Noop {
        reason: DragNoopReason,
    },
}

/// One session step with its diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragPhase,
    pub to: DragPhase,
    pub effect: DragEffect,
}

#[derive(Debug, Clone, Copy)]
struct LastClick {
    at: Instant,
    position: PointerPosition,
}

/// Recognizes clicks and drags from raw pointer events.
///
/// `drag_start` is asked once per press. If it vetoes, the session stays
/// captured until release and later moves do not ask again.
pub struct DragSession<C: PointerCapture = ()> {
    config: DragSessionConfig,
    capture: C,
    phase: DragPhase,
    handler: Option<Box<dyn DragHandler>>,
    overlay_shown: bool,
    last_click: Option<LastClick>,
    transition_counter: u64,
}

impl Default for DragSession<()> {
    fn default() -> Self {
        Self::new(DragSessionConfig::default(), ())
    }
}

impl<C: PointerCapture> std::fmt::Debug for DragSession<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragSession")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("overlay_shown", &self.overlay_shown)
            .field("transition_counter", &self.transition_counter)
            .finish_non_exhaustive()
    }
}

impl<C: PointerCapture> DragSession<C> {
    pub fn new(config: DragSessionConfig, capture: C) -> Self {
        Self {
            config,
            capture,
            phase: DragPhase::Idle,
            handler: None,
            overlay_shown: false,
            last_click: None,
            transition_counter: 0,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.phase.is_dragging()
    }

    #[must_use]
    pub const fn config(&self) -> &DragSessionConfig {
        &self.config
    }

    #[must_use]
    pub fn capture(&self) -> &C {
        &self.capture
    }

    /// Arm a new gesture at `position` with `handler` receiving its
    /// callbacks.
    pub fn pointer_down(
        &mut self,
        position: PointerPosition,
        handler: Box<dyn DragHandler>,
    ) -> DragTransition {
        let from = self.phase;
        if !from.is_idle() {
            warn!(?from, "pointer down while a drag session is active; should not be dragging");
        }
        if !self.overlay_shown {
            self.capture.show_overlay();
            self.overlay_shown = true;
        }
        self.handler = Some(handler);
        self.phase = DragPhase::Armed {
            origin: position,
            current: position,
        };
        self.record(from, DragEffect::Armed { origin: position })
    }

    pub fn pointer_move(&mut self, position: PointerPosition) -> DragTransition {
        let from = self.phase;
        let effect = match from {
            DragPhase::Idle => DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            },
            DragPhase::Armed { origin, .. } => {
                if position.moved_beyond(origin, self.config.drag_threshold) {
                    let accepted = self.handler.as_mut().is_none_or(|h| h.drag_start(origin));
                    if accepted {
                        self.phase = DragPhase::Dragging {
                            origin,
                            current: position,
                        };
                        if let Some(handler) = self.handler.as_mut() {
                            handler.drag_move(position);
                        }
                        DragEffect::DragStarted {
                            origin,
                            current: position,
                        }
                    } else {
                        debug!(?origin, "drag vetoed");
                        self.phase = DragPhase::Captured {
                            origin,
                            current: position,
                        };
                        DragEffect::DragVetoed { origin }
                    }
                } else {
                    self.phase = DragPhase::Armed {
                        origin,
                        current: position,
                    };
                    DragEffect::Noop {
                        reason: DragNoopReason::ThresholdNotReached,
                    }
                }
            }
            DragPhase::Dragging { origin, current } => {
                self.phase = DragPhase::Dragging {
                    origin,
                    current: position,
                };
                if let Some(handler) = self.handler.as_mut() {
                    handler.drag_move(position);
                }
                DragEffect::DragMoved {
                    previous: current,
                    current: position,
                }
            }
            DragPhase::Captured { origin, .. } => {
                self.phase = DragPhase::Captured {
                    origin,
                    current: position,
                };
                DragEffect::Noop {
                    reason: DragNoopReason::DragVetoed,
                }
            }
        };
        self.record(from, effect)
    }

    /// Finish the gesture at `position`; `now` times double clicks.
    pub fn pointer_up(&mut self, position: PointerPosition, now: Instant) -> DragTransition {
        let from = self.phase;
        let effect = match from {
            DragPhase::Idle => DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            },
            DragPhase::Dragging { .. } => {
                let handler = self.finish();
                if let Some(mut handler) = handler {
                    handler.drag_end(position);
                }
                DragEffect::DragEnded { end: position }
            }
            DragPhase::Armed { origin, .. } | DragPhase::Captured { origin, .. } => {
                let handler = self.finish();
                self.resolve_click(handler, origin, position, now)
            }
        };
        self.record(from, effect)
    }

    /// Abort the gesture (escape key or host teardown).
    pub fn cancel(&mut self) -> DragTransition {
        let from = self.phase;
        let effect = if from.is_idle() {
            DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            }
        } else {
            let was_dragging = from.is_dragging();
            if let Some(mut handler) = self.finish() {
                handler.drag_cancel(was_dragging);
            }
            DragEffect::Canceled { was_dragging }
        };
        self.record(from, effect)
    }

    fn resolve_click(
        &mut self,
        handler: Option<Box<dyn DragHandler>>,
        origin: PointerPosition,
        position: PointerPosition,
        now: Instant,
    ) -> DragEffect {
        let Some(mut handler) = handler else {
            return DragEffect::Released { position };
        };
        handler.drag_cancel(false);
        let tolerance = self.config.double_click_tolerance;
        if !position.is_near(origin, tolerance) {
            return DragEffect::Released { position };
        }
        let double = self.last_click.is_some_and(|last| {
            last.position.is_near(position, tolerance)
                && now.saturating_duration_since(last.at) < self.config.double_click_window
        });
        if double {
            handler.double_click(position);
        }
        handler.click(position);
        self.last_click = Some(LastClick { at: now, position });
        if double {
            DragEffect::DoubleClicked { position }
        } else {
            DragEffect::Clicked { position }
        }
    }

    /// Return to idle, hide the overlay and hand back the handler.
    fn finish(&mut self) -> Option<Box<dyn DragHandler>> {
        self.phase = DragPhase::Idle;
        self.release_overlay();
        self.handler.take()
    }

    fn release_overlay(&mut self) {
        if self.overlay_shown {
            self.overlay_shown = false;
            self.capture.hide_overlay();
        }
    }

    fn record(&mut self, from: DragPhase, effect: DragEffect) -> DragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.phase,
            effect,
        }
    }
}

impl<C: PointerCapture> Drop for DragSession<C> {
    fn drop(&mut self) {
        if !self.phase.is_idle() {
            self.cancel();
        }
        self.release_overlay();
    }
}
