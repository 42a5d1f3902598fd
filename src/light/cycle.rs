use super::Phase;
use crate::handoff::Sender;

use parking_lot::Mutex;
use rand::Rng;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Bounds of the randomized dwell interval, in milliseconds. Both ends are
/// inclusive; each cycle's dwell is drawn uniformly from this range.
pub(crate) const MIN_DWELL_MS: u64 = 4_000;
pub(crate) const MAX_DWELL_MS: u64 = 6_000;

/// How long the cycle loop sleeps between elapsed-time checks. Bounds CPU
/// usage while keeping transition overshoot within a millisecond or so.
const POLL_SLICE: Duration = Duration::from_millis(1);

/// The background task that toggles the light's phase on a randomized
/// interval and announces every transition through the handoff.
pub(crate) struct CycleWorker {
  handle: JoinHandle<()>,
  stop_flag: Arc<AtomicBool>,
}

impl CycleWorker {
  /// Spawns a new cycle worker thread.
  ///
  /// `dwell_ms` is the closed interval dwell durations are drawn from. The
  /// light passes [`MIN_DWELL_MS`]`..=`[`MAX_DWELL_MS`]; tests compress the
  /// range to keep wall-clock time down.
  pub(crate) fn spawn(
    phase: Arc<Mutex<Phase>>,
    tx: Sender<Phase>,
    dwell_ms: RangeInclusive<u64>,
  ) -> Self {
    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_clone = stop_flag.clone();

    let handle = thread::spawn(move || run_cycle(phase, tx, dwell_ms, stop_clone));

    Self { handle, stop_flag }
  }

  /// Signals the worker thread to stop and waits for it to exit.
  ///
  /// When this returns, the thread is gone and its sender has been dropped,
  /// so blocked receivers observe the disconnect.
  pub(crate) fn stop(self) {
    self.stop_flag.store(true, Ordering::Relaxed);
    let _ = self.handle.join();
  }
}

/// The cycling state machine.
///
/// One RNG handle is obtained at loop entry and drawn from for every cycle;
/// it is never reseeded per iteration. Each pass sleeps in short slices
/// until the drawn dwell has elapsed, then toggles the phase under the phase
/// mutex, announces the new phase, resets the timer, and draws the next
/// dwell. The elapsed check is `>=`, tolerating slice overshoot.
fn run_cycle(
  phase: Arc<Mutex<Phase>>,
  tx: Sender<Phase>,
  dwell_ms: RangeInclusive<u64>,
  stop: Arc<AtomicBool>,
) {
  let mut rng = rand::rng();
  let mut dwell = Duration::from_millis(rng.random_range(dwell_ms.clone()));
  let mut dwell_start = Instant::now();

  while !stop.load(Ordering::Relaxed) {
    thread::sleep(POLL_SLICE);

    if dwell_start.elapsed() < dwell {
      continue;
    }

    // Commit the toggle under the phase mutex, then announce it. A snapshot
    // reader can observe the new phase just before a waiter receives the
    // announcement; the two views converge within the same transition.
    let next = {
      let mut guard = phase.lock();
      let next = guard.toggled();
      *guard = next;
      next
    };

    if tx.send(next).is_err() {
      // Every receiver is gone; nothing left to announce to.
      break;
    }

    dwell_start = Instant::now();
    dwell = Duration::from_millis(rng.random_range(dwell_ms.clone()));
  }
}
