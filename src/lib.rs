//! A single-slot blocking handoff channel and a traffic light built on it.
//!
//! Stoplight provides two layers. The [`handoff`] module is a generic
//! rendezvous cell: a thread-safe, single-slot channel where a send
//! overwrites any unconsumed value (last write wins) and a receive blocks
//! until a value can be moved out. The [`light`] module runs a
//! [`TrafficLight`] on top of it: a background worker toggles the phase
//! between `Red` and `Green` on a randomized 4-6 second dwell and announces
//! every transition through the handoff, while callers take non-blocking
//! phase snapshots or block until a specific phase is announced.
//!
//! ```no_run
//! use stoplight::TrafficLight;
//! use std::sync::Arc;
//!
//! let light = Arc::new(TrafficLight::new());
//! light.start();
//!
//! let crossing = {
//!   let light = Arc::clone(&light);
//!   std::thread::spawn(move || {
//!     light.wait_for_green().expect("light stopped");
//!     // cross while the light is green
//!   })
//! };
//!
//! crossing.join().unwrap();
//! light.stop();
//! ```

pub mod error;
pub mod handoff;
pub mod light;

// Public re-exports for convenience
pub use error::{RecvError, RecvErrorTimeout, SendError, TryRecvError, WaitError};
pub use light::{Phase, TrafficLight};
