// demos/reactor_staging.rs
//! Simulates an acceptor stage handing pending connections to a poller stage

use evring::prelude::*;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// The tiny record an acceptor would stage for the poller threads.
#[derive(Clone, Copy, Default, Debug)]
struct PendingConn {
    fd: i32,
    events: u32,
}

fn main() -> Result<()> {
    println!("=== Reactor Staging Simulation ===\n");

    // Shared "current time" handle, refreshed once per second by a ticker
    // thread instead of living in a global.
    let live_date = LiveSnapshot::new(now_secs());
    let _refresher = live_date.spawn_refresher(Duration::from_secs(1), now_secs);

    // Rings are pooled so capacity grown during a burst is kept for the
    // next connection batch.
    let pool: RingPool<PendingConn> = RingPool::new(PoolConfig {
        ring_capacity: 16,
        max_pool_size: 64,
        min_pool_size: 8,
    });

    let mut stage = Stage::with_config(StageConfig {
        initial_capacity: 16,
        max_staged: 8192,
    });

    let num_batches = 1_000;
    let batch_size = 64;
    let start = Instant::now();

    for batch in 0..num_batches {
        // Accept burst: the acceptor stages a batch of new fds.
        for i in 0..batch_size {
            stage.stage(PendingConn {
                fd: batch * batch_size + i,
                events: 1,
            })?;
        }

        if stage.is_near_full() {
            println!("Batch {}: stage near full, shedding load", batch);
        }

        // Poller tick: drain staged connections into a pooled ring and
        // dispatch them.
        let mut tick_ring = pool.acquire();
        stage.drain_with(|conn| tick_ring.push(conn));
        while let Some(conn) = tick_ring.pop() {
            // Dispatch would register conn.fd with the event engine here.
            std::hint::black_box(conn);
        }

        if batch % 250 == 0 {
            println!("Batch {} dispatched at {}", batch, live_date.load());
        }
    }

    let elapsed = start.elapsed();
    let total = num_batches * batch_size;
    println!("\nDispatched {} connections in {:?}", total, elapsed);
    println!(
        "Average: {:.1} ns per connection",
        elapsed.as_nanos() as f64 / total as f64
    );

    let stage_stats = stage.stats();
    println!("\nStage Statistics:");
    println!("  Staged: {}", stage_stats.staged);
    println!("  Drained: {}", stage_stats.drained);
    println!("  Ring capacity: {}", stage_stats.ring_capacity);

    let pool_stats = pool.stats();
    println!("\nPool Statistics:");
    println!("  Available: {}", pool_stats.available);
    println!("  Allocated: {}", pool_stats.allocated);
    println!("  Acquired: {}", pool_stats.acquired);
    println!("  Returned: {}", pool_stats.returned);
    println!("  Hit rate: {:.1}%", pool_stats.hit_rate());

    Ok(())
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
