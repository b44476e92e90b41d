pub mod app;
pub mod config;
pub mod facade;
pub mod handlers;
pub mod logging;
pub mod telegram;
pub mod transport;

pub use facade::{BotFacade, PollingOptions};
pub use transport::{ChatTransport, TransportError};
