//! Optimistic list reconciliation: every list-owning view controller
//! fetches wholesale, then patches its local copy from server-confirmed
//! responses instead of re-fetching after each mutation. Local state is
//! never assumed consistent with the server between explicit syncs.

pub mod board;
pub mod list;
pub mod room;
pub mod roster;
pub mod thread;

pub use board::PostBoard;
pub use list::{Keyed, SyncedList};
pub use room::ChatRoom;
pub use roster::GroupRoster;
pub use thread::{CommentNode, CommentThread, ThreadView};
