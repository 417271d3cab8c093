//! Origin allow-list and organization lookup.

use std::collections::HashMap;

use crate::error::ConfigError;

/// Where a message came from: chat plus optional forum topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OriginContext {
    pub chat_id: i64,
    pub thread_id: Option<i64>,
}

/// Immutable map from origin context to organization label.
///
/// Doubles as the allow-list: an origin absent from the map is never
/// processed. Built once at startup, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct OrganizationRegistry {
    routes: HashMap<OriginContext, String>,
}

impl OrganizationRegistry {
    /// Parse the `SHIFTLOG_ROUTES` syntax: comma-separated
    /// `chat_id[:thread_id]=organization` entries, e.g.
    /// `-1002360529455:3=333.`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut routes = HashMap::new();

        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (origin, organization) = entry
                .split_once('=')
                .ok_or_else(|| invalid(entry, "expected chat_id[:thread_id]=organization"))?;

            let origin = origin.trim();
            let (chat, thread) = match origin.split_once(':') {
                Some((chat, thread)) => (chat, Some(thread)),
                None => (origin, None),
            };

            let chat_id = chat
                .trim()
                .parse()
                .map_err(|_| invalid(entry, "chat id is not an integer"))?;
            let thread_id = thread
                .map(|t| t.trim().parse())
                .transpose()
                .map_err(|_| invalid(entry, "thread id is not an integer"))?;

            routes.insert(
                OriginContext { chat_id, thread_id },
                organization.trim().to_string(),
            );
        }

        if routes.is_empty() {
            return Err(invalid(raw, "no routes defined"));
        }

        Ok(Self { routes })
    }

    /// Whether messages from this origin are processed at all.
    pub fn contains(&self, origin: &OriginContext) -> bool {
        self.routes.contains_key(origin)
    }

    /// Organization label for an origin. A miss is not an error — the caller
    /// falls back to an empty label.
    pub fn organization(&self, origin: &OriginContext) -> Option<&str> {
        self.routes.get(origin).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn invalid(entry: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: "SHIFTLOG_ROUTES".into(),
        message: format!("{message} in {entry:?}"),
    }
}
