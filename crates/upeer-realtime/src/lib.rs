//! Realtime chat transports. Two coexist: the push socket and the
//! fixed-interval poller. Polling is authoritative for delivery; the
//! socket is an optional accelerator, made safe by the chat room's
//! id-dedup before render.

pub mod poller;
pub mod socket;

pub use poller::{PollHandle, spawn_poller};
pub use socket::{ChatSocket, RealtimeError};
