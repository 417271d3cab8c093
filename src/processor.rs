//! Message processor — gates, classifies, projects, appends, acks.
//!
//! Flow:
//! 1. Allow-list gate — origins without a route are dropped before any
//!    classification is attempted
//! 2. Classify — non-reports dropped silently
//! 3. Project into the sheet's column order with the configured time zone
//! 4. One append attempt per message; failures logged and contained
//! 5. One ack attempt after a successful append; failures swallowed

use std::sync::Arc;

use chrono::Utc;
use chrono_tz::Tz;
use tracing::{debug, error, info};

use crate::channels::{Channel, IncomingMessage};
use crate::registry::OrganizationRegistry;
use crate::report::{self, build_row};
use crate::sheets::RowSink;

/// Reply sent to the driver after a successful append.
const ACK_TEXT: &str = "Отметка принята ✅";

/// Turns routed inbound messages into appended sheet rows.
pub struct MessageProcessor {
    registry: OrganizationRegistry,
    sink: Arc<dyn RowSink>,
    timezone: Tz,
}

impl MessageProcessor {
    pub fn new(registry: OrganizationRegistry, sink: Arc<dyn RowSink>, timezone: Tz) -> Self {
        Self {
            registry,
            sink,
            timezone,
        }
    }

    /// Handle one inbound message end to end.
    ///
    /// Never returns an error: every failure past startup is contained here
    /// so one unlucky message cannot stall the stream behind it.
    pub async fn process(&self, msg: &IncomingMessage, channel: &dyn Channel) {
        if !self.registry.contains(&msg.origin) {
            debug!(
                chat_id = msg.origin.chat_id,
                thread_id = ?msg.origin.thread_id,
                "Ignoring message outside routed origins"
            );
            return;
        }

        let Some(shift_report) = report::classify(&msg.text) else {
            debug!(sender_id = %msg.sender_id, "Message is not a shift report");
            return;
        };

        let organization = self.registry.organization(&msg.origin).unwrap_or_default();
        let now = Utc::now().with_timezone(&self.timezone);
        let row = build_row(&shift_report, &msg.sender_id, organization, now);

        info!(
            sender_id = %msg.sender_id,
            cash = shift_report.cash,
            organization = %organization,
            "Appending shift report"
        );

        match self.sink.append_row(&row).await {
            Ok(()) => {
                // Best-effort ack; a failed reply never affects control flow.
                let _ = channel.reply(msg, ACK_TEXT).await;
            }
            Err(e) => {
                error!(
                    error = %e,
                    sender_id = %msg.sender_id,
                    "Failed to append shift report"
                );
            }
        }
    }
}
