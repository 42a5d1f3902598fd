//! A self-cycling traffic light built on the handoff cell.
//!
//! A [`TrafficLight`] owns its current [`Phase`] and, once started, a
//! background worker that toggles the phase every 4 to 6 seconds and
//! announces each transition through a single-slot handoff. Collaborators
//! observe the light two ways:
//!
//! - [`TrafficLight::current_phase`] takes a non-blocking snapshot of the
//!   phase under its own mutex, independent of the announcement channel.
//! - [`TrafficLight::wait_for_green`] (and the general
//!   [`TrafficLight::wait_for`]) blocks on the announcement channel,
//!   discarding transitions until the awaited phase arrives.
//!
//! The two views are updated sequentially (phase first, then the
//! announcement) but read through independent synchronization, so a
//! snapshot reader can see a new phase an instant before a waiter receives
//! it. Waiters share one handoff slot: each announced transition is
//! consumed by exactly one waiter, and the rest keep blocking. That
//! competition is the documented delivery model, not a defect; callers that
//! need a private view of every consumable transition should hold their own
//! [`transitions`](TrafficLight::transitions) tap and accept the same
//! single-consumer-per-value policy.

use crate::error::{RecvError, WaitError};
use crate::handoff;

mod cycle;

use self::cycle::{CycleWorker, MAX_DWELL_MS, MIN_DWELL_MS};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// The traffic light's signal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Red,
  Green,
}

impl Phase {
  /// Returns the other phase. `Red` and `Green` toggle into each other; no
  /// other transition exists.
  pub fn toggled(self) -> Phase {
    match self {
      Phase::Red => Phase::Green,
      Phase::Green => Phase::Red,
    }
  }
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

/// State behind the control mutex: the not-yet-started producing endpoint
/// and, once started, the worker handle.
struct Control {
  tx: Option<handoff::Sender<Phase>>,
  worker: Option<CycleWorker>,
}

/// A single traffic light running as an independent state machine.
///
/// A fresh light is `Red`, silent, and idle; [`start`](TrafficLight::start)
/// launches the cycling worker. The light is `Send + Sync` and is meant to
/// be shared behind an `Arc` by every thread that consults it.
pub struct TrafficLight {
  /// Current phase. Mutated only by the cycle worker, copied out by
  /// snapshot reads; both sides go through this mutex.
  phase: Arc<Mutex<Phase>>,
  /// Receiving end of the announcement handoff, shared by every waiter.
  rx: handoff::Receiver<Phase>,
  control: Mutex<Control>,
}

impl fmt::Debug for TrafficLight {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let control = self.control.lock();
    f.debug_struct("TrafficLight")
      .field("phase", &*self.phase.lock())
      .field("running", &control.worker.is_some())
      .finish()
  }
}

impl TrafficLight {
  /// Creates a new light in [`Phase::Red`] with an empty announcement
  /// channel and no running worker.
  pub fn new() -> Self {
    let (tx, rx) = handoff::channel();
    TrafficLight {
      phase: Arc::new(Mutex::new(Phase::Red)),
      rx,
      control: Mutex::new(Control {
        tx: Some(tx),
        worker: None,
      }),
    }
  }

  /// Launches the background cycling worker.
  ///
  /// The worker dwells in each phase for a duration drawn uniformly from
  /// the closed interval [4000, 6000] ms, then toggles the phase and
  /// announces it. At most one worker ever runs per light: the producing
  /// endpoint can be taken out of the control block only once, so a second
  /// call finds nothing to start and returns without effect.
  pub fn start(&self) {
    let mut control = self.control.lock();
    if let Some(tx) = control.tx.take() {
      control.worker = Some(CycleWorker::spawn(
        Arc::clone(&self.phase),
        tx,
        MIN_DWELL_MS..=MAX_DWELL_MS,
      ));
    }
  }

  /// Stops the cycling worker and waits for it to exit.
  ///
  /// Works from any state: on a running light the worker is joined and its
  /// sender dropped with it; on a never-started light the stored sender is
  /// dropped directly. Either way the announcement channel disconnects, so
  /// every present and future waiter observes [`WaitError::Stopped`] once
  /// the slot drains. Calling `stop` again is a no-op. The last committed
  /// phase remains readable through [`current_phase`](Self::current_phase).
  pub fn stop(&self) {
    let (tx, worker) = {
      let mut control = self.control.lock();
      (control.tx.take(), control.worker.take())
    };
    drop(tx);
    if let Some(worker) = worker {
      worker.stop();
    }
  }

  /// Returns a snapshot of the current phase.
  ///
  /// Non-blocking: takes the phase mutex, copies the value, releases. The
  /// announcement channel is not involved, so this never competes with
  /// waiters.
  pub fn current_phase(&self) -> Phase {
    *self.phase.lock()
  }

  /// Blocks until the light announces `target`.
  ///
  /// Receives from the shared handoff in a loop, discarding every
  /// announcement that is not `target`. Announcements taken here are
  /// consumed: with several concurrent waiters each transition reaches
  /// exactly one of them, so a waiter can sleep through a transition that
  /// another waiter already took.
  ///
  /// # Errors
  ///
  /// Returns [`WaitError::Stopped`] once the light has been stopped (or
  /// dropped its worker) and no announcement is left to drain.
  pub fn wait_for(&self, target: Phase) -> Result<(), WaitError> {
    loop {
      match self.rx.recv() {
        Ok(phase) if phase == target => return Ok(()),
        Ok(_) => {} // Not the awaited phase; discard and keep listening.
        Err(RecvError::Disconnected) => return Err(WaitError::Stopped),
      }
    }
  }

  /// Blocks until the light turns green.
  ///
  /// Equivalent to `wait_for(Phase::Green)`; see [`wait_for`](Self::wait_for)
  /// for the delivery and error semantics.
  pub fn wait_for_green(&self) -> Result<(), WaitError> {
    self.wait_for(Phase::Green)
  }

  /// Returns an observation tap on the announcement channel.
  ///
  /// The tap is a clone of the light's receiving endpoint: it pulls from
  /// the same single slot as the wait operations and competes with them for
  /// each announced value. Dropping the tap detaches it without affecting
  /// the light.
  pub fn transitions(&self) -> handoff::Receiver<Phase> {
    self.rx.clone()
  }
}

impl Default for TrafficLight {
  fn default() -> Self {
    Self::new()
  }
}

impl Drop for TrafficLight {
  fn drop(&mut self) {
    self.stop();
  }
}
