//! zoom-chat-publisher: relays the Zoom meeting chat to an HTTP endpoint.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;

#[cfg(test)]
pub(crate) mod testing;
