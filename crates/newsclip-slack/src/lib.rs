//! Newsclip Slack Delivery
//!
//! Formats a summarized clip into a Slack Block Kit message and posts it to
//! an incoming-webhook URL. The webhook prefix is validated before any
//! network call; delivery is a single POST with no retry.
//!
//! Two strictness contracts:
//!
//! - `SlackClient::send` fails with a typed error carrying the response body
//!   (used by the send endpoints).
//! - `SlackClient::send_test_message` collapses any failure to `false`
//!   (used by integration registration).

#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod message;
pub mod transport;

pub use client::{is_valid_webhook_url, SlackClient, WEBHOOK_PREFIX};
pub use error::DeliveryError;
pub use message::{build_message, test_message, Block, ClipPayload, SlackMessage, TextObject};
pub use transport::{HttpTransport, MockTransport, TransportError, TransportReply, WebhookTransport};
