//! # Example: fanout_isolation
//!
//! Demonstrates that one subscriber's behavior never leaks into another's
//! feed: a fast consumer, a slow consumer, and a panicking consumer all
//! attach to the same stream, and the writer never waits for any of them.
//!
//! ## Flow
//! ```text
//! write(batch) ─► broadcast ─► [mailbox fast] ─► prints immediately
//!                          ├─► [mailbox slow] ─► 100ms per signal, same order
//!                          └─► [mailbox bad]  ─► panics, torn down alone
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example fanout_isolation
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use eventcast::{Signal, StreamHost, StreamId, Subscribe, SubscribeFn};

/// Simulates an expensive consumer (I/O, batching, etc.).
struct SlowConsumer;

#[async_trait]
impl Subscribe<u32> for SlowConsumer {
    async fn on_signal(&self, signal: &Signal<u32>) {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if let Signal::Next(segment) = signal {
            println!("[slow] caught up to #{}", segment.last().map_or(0, |r| r.sequence));
        }
    }

    fn name(&self) -> &'static str {
        "slow"
    }
}

/// Panics on every event; only its own delivery is torn down.
struct FaultyConsumer;

#[async_trait]
impl Subscribe<u32> for FaultyConsumer {
    async fn on_signal(&self, signal: &Signal<u32>) {
        if let Signal::Next(segment) = signal {
            if !segment.is_empty() {
                panic!("faulty consumer cannot handle events");
            }
        }
    }

    fn name(&self) -> &'static str {
        "faulty"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let host: StreamHost<u32> = StreamHost::new();
    let stream = host.add(StreamId::new("mixed")?)?;

    let fast = SubscribeFn::arc("fast", |signal: Signal<u32>| {
        if let Signal::Next(segment) = signal {
            println!("[fast] got {} events", segment.len());
        }
    });

    let _fast = stream.open_at_end(fast);
    let _slow = stream.open_at_end(Arc::new(SlowConsumer));
    let _faulty = stream.open_at_end(Arc::new(FaultyConsumer));

    // Ten writes; each returns as soon as the batch is appended and posted.
    let started = Instant::now();
    for batch in 0..10u32 {
        stream.write(vec![batch * 2, batch * 2 + 1])?;
    }
    println!("ten writes took {:?} (no subscriber involved)", started.elapsed());

    // The slow consumer drains its backlog in order, at its own pace.
    tokio::time::sleep(Duration::from_millis(1200)).await;

    stream.seal()?;
    tokio::time::sleep(Duration::from_millis(200)).await;
    Ok(())
}
