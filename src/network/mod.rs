//! Network Edge
//!
//! Message shapes and the channel handoffs between the transport and the
//! tick loop. The transport itself (sockets, reconnects, auth) is the
//! host's concern; nothing here performs I/O.

pub mod channel;
pub mod protocol;

pub use channel::{
    intent_channel, position_channel, IntentDrain, IntentOutbox, PositionFeed, PositionInbox,
};
pub use protocol::{ClientMessage, PositionUpdate, ServerMessage};
