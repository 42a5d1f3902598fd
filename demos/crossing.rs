// demos/crossing.rs
//
// A pedestrian crossing: several pedestrians block on wait_for_green and
// compete for each Green announcement, while a driver polls the snapshot
// without ever touching the announcement channel. Stopping the light
// releases anyone still waiting with an error instead of leaving them
// blocked forever.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use stoplight::TrafficLight;

fn main() {
  println!("--- Traffic light: pedestrians waiting for green ---");

  let light = Arc::new(TrafficLight::new());
  println!("[Light] initial phase: {}", light.current_phase());
  light.start();

  // Each Green announcement is consumed by exactly one waiter, so the
  // pedestrians cross one per green, in whatever order the wakeups land.
  let mut pedestrians = Vec::new();
  for i in 0..3 {
    let light = Arc::clone(&light);
    pedestrians.push(thread::spawn(move || {
      println!("[Pedestrian {}] waiting for green", i);
      match light.wait_for_green() {
        Ok(()) => println!("[Pedestrian {}] got green, crossing", i),
        Err(err) => println!("[Pedestrian {}] giving up: {}", i, err),
      }
    }));
  }

  // The driver only ever takes snapshots.
  let driver = {
    let light = Arc::clone(&light);
    thread::spawn(move || {
      let mut last = light.current_phase();
      println!("[Driver] sees {}", last);
      for _ in 0..30 {
        thread::sleep(Duration::from_millis(500));
        let phase = light.current_phase();
        if phase != last {
          println!("[Driver] light changed: {} -> {}", last, phase);
          last = phase;
        }
      }
    })
  };

  driver.join().unwrap();

  // Shut the light down; pedestrians still waiting observe the stop
  // instead of blocking forever.
  light.stop();
  println!("[Light] stopped; final phase: {}", light.current_phase());

  for pedestrian in pedestrians {
    pedestrian.join().unwrap();
  }
}
