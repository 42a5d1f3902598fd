mod common;
use common::*;

use stoplight::handoff;
use stoplight::{RecvError, RecvErrorTimeout, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn handoff_smoke() {
  let (tx, rx) = handoff::channel();
  tx.send(10).unwrap();
  assert_eq!(rx.recv().unwrap(), 10);
}

#[test]
fn rapid_sends_leave_only_the_most_recent_value() {
  let (tx, rx) = handoff::channel();

  tx.send(1).unwrap();
  tx.send(2).unwrap();

  // Exactly one receive succeeds, and it returns the second value; the
  // first was replaced and is not separately retrievable.
  assert_eq!(rx.recv().unwrap(), 2);
  assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

  // The same holds for a longer unconsumed burst.
  for v in 0..10 {
    tx.send(v).unwrap();
  }
  assert_eq!(rx.recv().unwrap(), 9);
  assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn consumer_unblocks_only_after_the_delayed_publish() {
  let (tx, rx) = handoff::channel();
  let delay = Duration::from_millis(200);
  let origin = Instant::now();

  let consumer = thread::spawn(move || {
    let value = rx.recv();
    (origin.elapsed(), value)
  });

  // The consumer must still be blocked while the producer sits silent.
  thread::sleep(delay);
  assert!(!consumer.is_finished(), "Consumer should be blocked");
  tx.send(7u32).unwrap();

  let (waited, value) = consumer.join().expect("Consumer panicked");
  assert_eq!(value.unwrap(), 7);
  assert!(
    waited >= delay,
    "consumer returned after {waited:?}, before the {delay:?} publish delay"
  );
}

#[test]
fn competing_consumers_split_the_stream() {
  let (tx, rx) = handoff::channel::<u32>();
  let rx2 = rx.clone();

  let collect = |rx: handoff::Receiver<u32>| {
    thread::spawn(move || {
      let mut seen = Vec::new();
      loop {
        match rx.recv() {
          Ok(v) => seen.push(v),
          Err(RecvError::Disconnected) => return seen,
        }
      }
    })
  };
  let first = collect(rx);
  let second = collect(rx2);

  // Spaced-out sends give whichever consumer is free time to drain the
  // slot, so every value is consumed exactly once by exactly one of them.
  for v in 0..6 {
    tx.send(v).unwrap();
    thread::sleep(Duration::from_millis(50));
  }
  drop(tx);

  let mut merged = first.join().expect("Consumer panicked");
  merged.extend(second.join().expect("Consumer panicked"));
  merged.sort_unstable();
  assert_eq!(merged, (0..6).collect::<Vec<_>>());
}

#[test]
fn disconnect_wakes_every_blocked_consumer() {
  let (tx, rx) = handoff::channel::<u32>();
  let rx2 = rx.clone();

  let first = thread::spawn(move || rx.recv());
  let second = thread::spawn(move || rx2.recv());

  thread::sleep(Duration::from_millis(100));
  drop(tx);

  assert_eq!(first.join().expect("Consumer panicked"), Err(RecvError::Disconnected));
  assert_eq!(second.join().expect("Consumer panicked"), Err(RecvError::Disconnected));
}

#[test]
fn recv_timeout_bounds_the_wait_on_a_silent_producer() {
  let (tx, rx) = handoff::channel::<u32>();

  let started = Instant::now();
  let result = rx.recv_timeout(SHORT_TIMEOUT);
  let elapsed = started.elapsed();

  assert_eq!(result, Err(RecvErrorTimeout::Timeout));
  assert!(elapsed >= SHORT_TIMEOUT, "timed out early after {elapsed:?}");
  assert!(elapsed < LONG_TIMEOUT, "timeout overshot to {elapsed:?}");
  drop(tx);
}

#[test]
fn send_hands_the_value_back_once_receivers_are_gone() {
  let (tx, rx) = handoff::channel();
  drop(rx);

  assert!(tx.is_closed());
  let err = tx.send("lost").unwrap_err();
  assert_eq!(err.into_inner(), "lost");
}

#[test]
fn slot_occupancy_is_visible_from_both_ends() {
  let (tx, rx) = handoff::channel();
  assert!(tx.is_empty());
  assert!(rx.is_empty());

  tx.send(1).unwrap();
  assert!(!tx.is_empty());
  assert!(!rx.is_empty());

  rx.recv().unwrap();
  assert!(tx.is_empty());
  assert!(rx.is_empty());
}
