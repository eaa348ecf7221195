//! Text completion adapters

pub mod chat;
pub mod stub;

pub use chat::ChatCompletionClient;
pub use stub::StubCompleter;
