//! Model access: the chat transport and the retrying invoker

pub mod client;
pub mod invoker;

pub use client::{AzureChatClient, ChatRequest, ChatTransport, Message, ResponseFormat};
pub use invoker::ModelInvoker;
