use core::fmt;

/// Error returned by [`Sender::send`](crate::handoff::Sender::send) when the
/// value could not be published.
///
/// The unsent value is handed back inside the error.
#[derive(PartialEq, Eq, Clone)]
pub enum SendError<T> {
  /// Every receiver has been dropped; nothing can ever consume the value.
  Closed(T),
}

impl<T> SendError<T> {
  /// Consumes the error, returning the value that could not be sent.
  #[inline]
  pub fn into_inner(self) -> T {
    match self {
      SendError::Closed(v) => v,
    }
  }
}

impl<T> fmt::Debug for SendError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SendError::Closed(_) => write!(f, "SendError::Closed(..)"),
    }
  }
}

impl<T> fmt::Display for SendError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SendError::Closed(_) => write!(f, "channel closed (all receivers dropped)"),
    }
  }
}

impl<T> std::error::Error for SendError<T> {}

/// Error returned by `try_recv` when no value could be taken immediately.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TryRecvError {
  /// The slot is currently empty; the producer is still alive.
  Empty,
  /// The slot is empty and the producer has been dropped.
  Disconnected,
}

impl std::error::Error for TryRecvError {}
impl fmt::Display for TryRecvError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TryRecvError::Empty => write!(f, "channel empty"),
      TryRecvError::Disconnected => write!(f, "channel disconnected (empty and producer dropped)"),
    }
  }
}

/// Error returned by blocking `recv` operations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RecvError {
  /// The slot is empty and the producer has been dropped; no further value
  /// can ever arrive.
  Disconnected,
}

impl std::error::Error for RecvError {}
impl fmt::Display for RecvError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RecvError::Disconnected => write!(f, "channel disconnected (empty and producer dropped)"),
    }
  }
}

/// Error returned by `recv_timeout` operations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RecvErrorTimeout {
  /// The slot is empty and the producer has been dropped.
  Disconnected,
  /// The timeout elapsed before a value became available.
  Timeout,
}

impl std::error::Error for RecvErrorTimeout {}
impl fmt::Display for RecvErrorTimeout {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RecvErrorTimeout::Disconnected => write!(f, "channel disconnected"),
      RecvErrorTimeout::Timeout => write!(f, "receive operation timed out"),
    }
  }
}

/// Error returned by the blocking wait operations on a
/// [`TrafficLight`](crate::light::TrafficLight).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WaitError {
  /// The light's cycling worker is gone (stopped or dropped), so the awaited
  /// phase can never be announced.
  Stopped,
}

impl std::error::Error for WaitError {}
impl fmt::Display for WaitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      WaitError::Stopped => write!(f, "traffic light stopped"),
    }
  }
}
