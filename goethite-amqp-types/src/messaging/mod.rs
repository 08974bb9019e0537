//! Types defined in AMQP1.0 specification Part 3: Messaging

pub mod delivery_state;

pub use delivery_state::{Accepted, Modified, Outcome, Rejected, Released};
