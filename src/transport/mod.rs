//! Chat transport
//!
//! Everything between a raw chat update and the core: message formats,
//! access rules, reply rendering and the dispatcher that ties them together.

pub mod access;
pub mod dispatcher;
pub mod messages;
pub mod render;

// Re-export commonly used types
pub use access::AccessPolicy;
pub use dispatcher::Dispatcher;
pub use messages::{InboundMessage, MessageUtils, OutboundReply, TransportResponse};
pub use render::Renderer;
