// file: src/delivery/mod.rs
// description: notification delivery module exports
// reference: internal module structure

pub mod smtp;

pub use smtp::{DeliverySink, Envelope, LogSink, SmtpMailer};
