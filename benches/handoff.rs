use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;
use std::thread;
use std::time::{Duration, Instant};

use stoplight::handoff;

const ITEM_VALUE: u64 = 42;

/// Single-thread hot path: the slot lock with no contention.
fn bench_uncontended(c: &mut Criterion) {
  let mut group = c.benchmark_group("handoff_uncontended");
  group.throughput(Throughput::Elements(1));

  group.bench_function("send_then_try_recv", |b| {
    let (tx, rx) = handoff::channel();
    b.iter(|| {
      tx.send(black_box(ITEM_VALUE)).unwrap();
      rx.try_recv().unwrap()
    });
  });

  group.bench_function("send_overwrite", |b| {
    let (tx, _rx) = handoff::channel();
    b.iter(|| tx.send(black_box(ITEM_VALUE)).unwrap());
  });

  group.finish();
}

/// Producer-side throughput while a consumer drains concurrently. The
/// consumer may legitimately observe fewer values than were sent; the slot
/// overwrites, it never buffers.
fn bench_cross_thread(c: &mut Criterion) {
  const BATCH: u64 = 1_000;

  let mut group = c.benchmark_group("handoff_cross_thread");
  group.throughput(Throughput::Elements(BATCH));

  group.bench_function("burst_send_while_draining", |b| {
    b.iter_custom(|iters| {
      let mut total = Duration::ZERO;
      for _ in 0..iters {
        let (tx, rx) = handoff::channel::<u64>();
        let consumer = thread::spawn(move || {
          let mut received = 0u64;
          while rx.recv().is_ok() {
            received += 1;
          }
          received
        });

        let start = Instant::now();
        for v in 0..BATCH {
          tx.send(v).unwrap();
        }
        drop(tx);
        let received = consumer.join().expect("Consumer panicked");
        total += start.elapsed();

        black_box(received);
      }
      total
    });
  });

  group.finish();
}

criterion_group!(benches, bench_uncontended, bench_cross_thread);
criterion_main!(benches);
