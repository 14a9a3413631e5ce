/// Conversion of Telegram messages into the runtime message model
pub mod inbound;
/// Common messaging utilities (split long messages)
pub mod messaging;
/// `ChatTransport` implementation over the Bot API
pub mod transport;

pub use transport::TelegramTransport;
