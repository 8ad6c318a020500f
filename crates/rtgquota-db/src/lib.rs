// rtgquota-db: async client for the RTG MySQL schema
//
// RTG stores one `router` row per polled device, one `interface` row per
// port, and per-router counter tables (`ifInOctets_<rid>`,
// `ifOutOctets_<rid>`) holding byte deltas for every poll.

pub mod client;
pub mod error;

pub use client::{ConnectOptions, CounterTable, InterfaceRef, RtgClient};
pub use error::Error;
