//! # Example: stream_lifecycle
//!
//! Walks one stream through its whole life: create, subscribe at the start,
//! at the end, and at an exact sequence, write a steady trickle of events,
//! then seal — and show what a deleted stream looks like to subscribers.
//!
//! ## Flow
//! ```text
//! host.add("a") ──► EventStream
//!     ├─► open_at_start(even)     replay-so-far + live feed
//!     ├─► writer task             write_one(i) every 50ms
//!     ├─► open_at_start(odd)      late subscriber, same history
//!     ├─► open_at_end(tail)       live tail only
//!     ├─► open_at(mid)            suffix from half the history
//!     ├─► seal()                  every subscriber completes
//!     └─► host.add("b").delete()  subscribers observe the deleted error
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example stream_lifecycle
//! ```

use std::time::Duration;

use eventcast::{Signal, StreamHost, StreamId, SubscribeFn};

/// A console subscriber that prints each signal under a fixed label.
fn printer(label: &'static str) -> std::sync::Arc<SubscribeFn<impl Fn(Signal<i64>)>> {
    SubscribeFn::arc(label, move |signal: Signal<i64>| match signal {
        Signal::Next(segment) => {
            for record in &segment {
                println!("[{label}] #{} = {}", record.sequence, record.data);
            }
        }
        Signal::Error(error) => println!("[{label}] error: {error}"),
        Signal::Completed => println!("[{label}] completed"),
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let host: StreamHost<i64> = StreamHost::new();
    let stream = host.add(StreamId::new("a")?)?;

    // Subscribe before any events exist: starts with an empty snapshot.
    let _at_start = stream.open_at_start(printer("a.start"));

    // A background writer appending one event at a time.
    let writer = {
        let stream = host.get(&StreamId::new("a")?)?;
        tokio::spawn(async move {
            for i in 0..12 {
                if stream.write_one(i).is_err() {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        })
    };

    tokio::time::sleep(Duration::from_millis(200)).await;

    // A late subscriber replays the history-so-far, then goes live.
    let _late = stream.open_at_start(printer("a.late"));

    // From-now-on subscribers skip the history entirely.
    let _at_end = stream.open_at_end(printer("a.end"));

    // Subscribe from the middle of the recorded history.
    let info = stream.get_info()?;
    let midpoint = info.sequence.unwrap_or(0) / 2;
    let _at_mid = stream.open_at(midpoint, printer("a.mid"));

    writer.await?;

    // Sealing completes every live subscriber and rejects further writes.
    stream.seal()?;
    println!("write after seal: {:?}", stream.write_one(99).err());

    // A deleted stream rejects everything, subscribers included.
    let doomed = host.add(StreamId::new("b")?)?;
    doomed.delete()?;
    let _on_deleted = doomed.open_at_end(printer("b.end"));
    println!("streams left on the host: {}", host.len());

    // Let the detached delivery workers flush before exiting.
    tokio::time::sleep(Duration::from_millis(100)).await;
    Ok(())
}
