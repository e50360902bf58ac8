//! Task lifecycle management.
//!
//! Tasks are created with a validated title, move through a five-state
//! workflow (`Todo`, `InProgress`, `InReview`, `Done`, `Cancelled`), and
//! raise domain events that the service publishes after each successful
//! save. Done and cancelled tasks reject every change except being
//! reopened. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
