//! Shared domain kernel.
//!
//! Capability traits that bounded contexts compose into their own types:
//! identity equality for entities, structural equality for value objects,
//! aggregate roots owning an ordered event log, and the domain-event
//! contract. The event publisher port and its in-process adapters live here
//! too because they are not specific to any one aggregate.
//!
//! - Domain traits in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
