//! Chat sinks. Implement ChatSink.

pub mod client;
pub mod dry_run;

pub use client::HttpChatSink;
pub use dry_run::DryRunSink;
