//! Demo of a contract-narrowed emitter.
//!
//! Run with `RUST_LOG=debug cargo run --example typed` to see the
//! registry's structured logs.

use emitter_typed::{events, TypedEmitter};
use tracing_subscriber::EnvFilter;

/// Payload delivered when a job finishes.
#[derive(Debug)]
pub struct JobDone {
    pub id: u32,
    pub ok: bool,
}

events! {
    /// Events the demo application understands.
    pub contract AppEvents {
        /// A background job finished.
        JobFinished("job-finished") => JobDone,
        /// The application is shutting down.
        Shutdown("shutdown") => (),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let emitter = TypedEmitter::<AppEvents>::new();

    // A persistent listener.
    emitter
        .on::<JobFinished, _>(|job| {
            println!("job {} finished, ok={}", job.id, job.ok);
        })
        .unwrap();

    // A one-shot listener: gone after the first shutdown event.
    emitter
        .once::<Shutdown, _>(|_| {
            println!("shutting down");
        })
        .unwrap();

    // A listener we unsubscribe before it ever runs.
    let sub = emitter
        .on::<JobFinished, _>(|_| {
            println!("never printed");
        })
        .unwrap();
    sub.unsubscribe();

    emitter.fire::<JobFinished>(&JobDone { id: 1, ok: true });
    emitter.fire::<JobFinished>(&JobDone { id: 2, ok: false });

    emitter.fire::<Shutdown>(&());
    emitter.fire::<Shutdown>(&()); // the once-listener does not run again

    println!(
        "job-finished listeners: {}, shutdown listeners: {}",
        emitter.event_count("job-finished"),
        emitter.event_count("shutdown"),
    );
}
