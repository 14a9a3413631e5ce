#![deny(missing_docs)]
//! Inclusive Brief runtime.
//!
//! Transport-agnostic message handling: command decoding, the command
//! handlers and the typing indicator loop. Chat platforms plug in through
//! [`ChatTransport`].

/// Command decoding.
pub mod command;
/// Message classification and error containment.
pub mod dispatch;
/// Errors raised while running a command.
pub mod error;
/// The `!analyse` and `!vision` handlers.
pub mod handlers;
/// Platform-neutral inbound message model.
pub mod message;
/// Chat platform abstraction.
pub mod transport;
/// Typing indicator loop.
pub mod typing;

pub use command::Command;
pub use dispatch::{handle_message, HandlerContext, Outcome};
pub use error::CommandError;
pub use message::{Attachment, AuthorId, InboundMessage};
pub use transport::ChatTransport;
