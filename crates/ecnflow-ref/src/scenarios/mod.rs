//! Offline approval scenarios.
//!
//! Each scenario drives the real controllers against a fresh
//! `InMemoryBackend` and an `InMemoryNotifier`. `play` returns a report for
//! tests; `run_scenario` prints it for the demo CLI.

pub mod approval_flow;
pub mod batch_submit;
pub mod delegate_flow;
pub mod failure_flow;
