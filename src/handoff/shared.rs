use crate::error::{RecvError, RecvErrorTimeout, SendError, TryRecvError};

use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::time::Instant;

/// Mutable state of the handoff cell, protected by the slot mutex.
pub(crate) struct HandoffInternal<T> {
  /// The single pending value. A send overwrites it, a receive takes it.
  pub(crate) slot: Option<T>,
  /// True once the producing endpoint has been dropped.
  pub(crate) producer_dropped: bool,
  /// Number of live receiving endpoints, clones included.
  pub(crate) receiver_count: usize,
}

/// The shared core of the handoff cell.
///
/// Both endpoints hold it behind an `Arc`. All state lives under a single
/// `parking_lot::Mutex`; `available` signals blocked receivers whenever the
/// slot is filled or the producer goes away. Waits are predicate-checked:
/// every wake re-inspects the slot and the disconnect flag, so spurious
/// wakeups and consumed-by-another-receiver races resolve by looping.
pub(crate) struct HandoffShared<T> {
  pub(crate) internal: Mutex<HandoffInternal<T>>,
  pub(crate) available: Condvar,
}

impl<T> fmt::Debug for HandoffShared<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let internal = self.internal.lock();
    f.debug_struct("HandoffShared")
      .field("occupied", &internal.slot.is_some())
      .field("producer_dropped", &internal.producer_dropped)
      .field("receiver_count", &internal.receiver_count)
      .finish_non_exhaustive()
  }
}

impl<T> HandoffShared<T> {
  /// Fresh core: empty slot, live producer, one registered receiver.
  pub(crate) fn new_internal() -> Self {
    HandoffShared {
      internal: Mutex::new(HandoffInternal {
        slot: None,
        producer_dropped: false,
        receiver_count: 1,
      }),
      available: Condvar::new(),
    }
  }

  /// Stores `value` in the slot, replacing any value already resident
  /// (last write wins), and wakes one blocked receiver. Never blocks.
  ///
  /// Fails only when every receiver is gone, handing the value back.
  pub(crate) fn publish(&self, value: T) -> Result<(), SendError<T>> {
    let mut internal = self.internal.lock();
    if internal.receiver_count == 0 {
      return Err(SendError::Closed(value));
    }
    internal.slot = Some(value);
    self.available.notify_one();
    Ok(())
  }

  /// Takes the pending value without blocking.
  pub(crate) fn try_take(&self) -> Result<T, TryRecvError> {
    let mut internal = self.internal.lock();
    if let Some(value) = internal.slot.take() {
      Ok(value)
    } else if internal.producer_dropped {
      Err(TryRecvError::Disconnected)
    } else {
      Err(TryRecvError::Empty)
    }
  }

  /// Blocks the calling thread until a value can be taken or the producer
  /// is gone. The slot lock is released while parked.
  ///
  /// A pending value is always drained before the disconnect is reported.
  pub(crate) fn take_blocking(&self) -> Result<T, RecvError> {
    let mut internal = self.internal.lock();
    loop {
      if let Some(value) = internal.slot.take() {
        return Ok(value);
      }
      if internal.producer_dropped {
        return Err(RecvError::Disconnected);
      }
      self.available.wait(&mut internal);
    }
  }

  /// Blocks until a value can be taken, the producer is gone, or `deadline`
  /// passes. The slot is re-checked after the timed-out wake too, so a value
  /// arriving right at the deadline is still taken.
  pub(crate) fn take_deadline(&self, deadline: Instant) -> Result<T, RecvErrorTimeout> {
    let mut internal = self.internal.lock();
    loop {
      if let Some(value) = internal.slot.take() {
        return Ok(value);
      }
      if internal.producer_dropped {
        return Err(RecvErrorTimeout::Disconnected);
      }
      if self.available.wait_until(&mut internal, deadline).timed_out() {
        return match internal.slot.take() {
          Some(value) => Ok(value),
          None => Err(RecvErrorTimeout::Timeout),
        };
      }
    }
  }

  /// Producer drop path: marks the channel disconnected and wakes every
  /// blocked receiver so each can drain or report the disconnect.
  pub(crate) fn disconnect_producer(&self) {
    let mut internal = self.internal.lock();
    if !internal.producer_dropped {
      internal.producer_dropped = true;
      self.available.notify_all();
    }
  }

  /// Receiver clone path.
  pub(crate) fn add_receiver(&self) {
    self.internal.lock().receiver_count += 1;
  }

  /// Receiver drop path. The producer never blocks, so there is nothing to
  /// wake; the next send simply observes the count.
  pub(crate) fn remove_receiver(&self) {
    let mut internal = self.internal.lock();
    internal.receiver_count = internal.receiver_count.saturating_sub(1);
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.internal.lock().slot.is_none()
  }

  pub(crate) fn is_producer_dropped(&self) -> bool {
    self.internal.lock().producer_dropped
  }

  pub(crate) fn receiver_count(&self) -> usize {
    self.internal.lock().receiver_count
  }
}
