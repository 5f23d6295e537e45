//! Stateless wrappers translating one backend resource each into HTTP
//! calls. Every method issues exactly one request; validation is limited
//! to required-field presence and fails before anything goes on the wire.

mod chat;
mod comments;
mod courses;
mod groups;
mod posts;

pub use chat::ChatService;
pub use comments::CommentService;
pub use courses::CourseService;
pub use groups::GroupService;
pub use posts::{PostFilter, PostService};
