//! # Test Email
//!
//! Sends a campaign preview to a list of addresses through an [`EmailClient`].

pub mod client;
pub mod config;
pub mod errors;
pub mod service;

pub use client::{DeliveryError, EmailClient, SendEmailOutput, SendEmailRequest};
pub use config::TestEmailConfig;
pub use errors::TestEmailError;
pub use service::{SendTestEmailParams, SendTestEmailService};
