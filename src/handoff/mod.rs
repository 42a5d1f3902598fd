//! A single-slot, last-write-wins blocking handoff channel.
//!
//! The handoff is a rendezvous cell, not a queue: it holds at most one
//! pending value at any time. A send stores its value into the slot,
//! replacing whatever was already resident, and wakes one blocked receiver.
//! A receive blocks until the slot is non-empty, then takes the value out by
//! move. Each published value is therefore delivered to at most one
//! receiver; when receivers compete, the first one through the lock wins and
//! the rest keep waiting.
//!
//! This shape fits "current state" signals, where consumers only ever care
//! about the latest value: overwriting an unconsumed value bounds memory
//! under a slow or absent consumer, at the explicit cost of not delivering
//! every historical value. It is not a general-purpose queue; nothing is
//! ever buffered beyond the one slot.
//!
//! The producing [`Sender`] is a single endpoint and cannot be cloned. The
//! [`Receiver`] can be cloned freely; clones pull from the same slot and
//! compete for each value. Dropping the `Sender` disconnects the channel:
//! blocked receivers drain any pending value first, then observe
//! [`RecvError::Disconnected`] instead of blocking forever.

use crate::error::{RecvError, RecvErrorTimeout, SendError, TryRecvError};

mod shared;

use self::shared::HandoffShared;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The producing end of a handoff cell.
///
/// There is exactly one `Sender` per channel. Sending never blocks: the slot
/// is overwritten if the previous value was not yet consumed.
#[derive(Debug)]
pub struct Sender<T: Send> {
  shared: Arc<HandoffShared<T>>,
  // This PhantomData makes Sender<T> !Sync, which is appropriate as only
  // one thread should use the producer.
  _phantom: PhantomData<*mut ()>,
}

/// The receiving end of a handoff cell.
///
/// Receivers can be cloned to create competing consumers; each published
/// value is taken by at most one of them. A shared `Receiver` may also be
/// used from several threads directly, with the same competition semantics.
#[derive(Debug)]
pub struct Receiver<T: Send> {
  shared: Arc<HandoffShared<T>>,
}

unsafe impl<T: Send> Send for Sender<T> {}

/// Creates a new handoff channel.
///
/// The cell starts empty. The `Sender` is the sole producer; the `Receiver`
/// may be cloned to add competing consumers.
pub fn channel<T: Send>() -> (Sender<T>, Receiver<T>) {
  let shared = Arc::new(HandoffShared::new_internal());
  (
    Sender {
      shared: Arc::clone(&shared),
      _phantom: PhantomData,
    },
    Receiver { shared },
  )
}

impl<T: Send> Sender<T> {
  /// Publishes a value into the slot, replacing any value already resident
  /// (last write wins), and wakes one blocked receiver.
  ///
  /// This never blocks. It fails only if every receiver has been dropped,
  /// in which case the value is handed back in the error.
  pub fn send(&self, value: T) -> Result<(), SendError<T>> {
    self.shared.publish(value)
  }

  /// Returns `true` if all receivers have been dropped, meaning no send can
  /// ever succeed again.
  pub fn is_closed(&self) -> bool {
    self.shared.receiver_count() == 0
  }

  /// Returns `true` if the slot currently holds no pending value.
  pub fn is_empty(&self) -> bool {
    self.shared.is_empty()
  }
}

impl<T: Send> Drop for Sender<T> {
  fn drop(&mut self) {
    // Mark the channel disconnected and wake every blocked receiver so
    // each can drain the slot or report the disconnect.
    self.shared.disconnect_producer();
  }
}

impl<T: Send> Receiver<T> {
  /// Receives a value, blocking the current thread until the slot is
  /// non-empty, then taking the value out by move.
  ///
  /// The wait is predicate-checked: every wake re-inspects the slot, so
  /// spurious wakeups and values stolen by competing receivers simply put
  /// this thread back to sleep.
  ///
  /// # Errors
  ///
  /// Returns [`RecvError::Disconnected`] once the producer has been dropped
  /// and the slot is empty. A pending value is always delivered first.
  pub fn recv(&self) -> Result<T, RecvError> {
    self.shared.take_blocking()
  }

  /// Attempts to take the pending value without blocking.
  pub fn try_recv(&self) -> Result<T, TryRecvError> {
    self.shared.try_take()
  }

  /// Receives a value, blocking for at most `timeout`.
  ///
  /// The deadline is computed once at entry; wakes from competing receivers
  /// or spurious signals do not extend it.
  ///
  /// # Errors
  ///
  /// Returns [`RecvErrorTimeout::Timeout`] if the deadline passes with the
  /// slot still empty, or [`RecvErrorTimeout::Disconnected`] once the
  /// producer is gone and nothing is left to drain.
  pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvErrorTimeout> {
    let deadline = Instant::now() + timeout;
    self.shared.take_deadline(deadline)
  }

  /// Returns `true` if the slot currently holds no pending value.
  pub fn is_empty(&self) -> bool {
    self.shared.is_empty()
  }

  /// Returns `true` if the producer has been dropped. A pending value may
  /// still be drained after this returns `true`.
  pub fn is_disconnected(&self) -> bool {
    self.shared.is_producer_dropped()
  }
}

impl<T: Send> Clone for Receiver<T> {
  fn clone(&self) -> Self {
    self.shared.add_receiver();
    Receiver {
      shared: Arc::clone(&self.shared),
    }
  }
}

impl<T: Send> Drop for Receiver<T> {
  fn drop(&mut self) {
    self.shared.remove_receiver();
  }
}
