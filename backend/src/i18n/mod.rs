//! Message keys and their localization.
//!
//! Every error raised by the service carries a [`Message`]: a key from
//! [`keys`] plus positional arguments. The English catalog is compiled into
//! the binary and arguments are substituted into `{0}`, `{1}`, ... markers.

pub mod keys;

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

const EN_CATALOG: &str = include_str!("messages_en.properties");

static DEFAULT_SERVICE: Lazy<MessageService> = Lazy::new(MessageService::english);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub key: &'static str,
    pub args: Vec<String>,
}

impl Message {
    pub fn new(key: &'static str) -> Self {
        Message {
            key,
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(key: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Message {
            key,
            args: args.into_iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Localizes against the built-in English catalog.
    pub fn localized(&self) -> LocalizedMessage {
        DEFAULT_SERVICE.localize(self)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{} [{}]", self.key, self.args.join(", "))
        }
    }
}

/// Wire form of a localized message, as returned in error bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedMessage {
    pub message_key: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct MessageService {
    catalog: HashMap<String, String>,
}

impl MessageService {
    pub fn english() -> Self {
        MessageService::from_properties(EN_CATALOG)
    }

    /// Parses `key=value` lines; blank lines and `#` comments are skipped.
    pub fn from_properties(source: &str) -> Self {
        let catalog = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect();
        MessageService { catalog }
    }

    /// Unknown keys localize to the key itself.
    pub fn localize(&self, message: &Message) -> LocalizedMessage {
        let template = self
            .catalog
            .get(message.key)
            .map(String::as_str)
            .unwrap_or(message.key);
        let text = substitute(template, &message.args);
        LocalizedMessage {
            message_key: message.key.to_string(),
            message: text,
        }
    }
}

/// Replaces each `{n}` with the n-th argument in one pass over `template`.
/// Placeholders without a matching argument are kept; argument text is never rescanned.
fn substitute(template: &str, args: &[String]) -> String {
    let mut text = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after.find('}').and_then(|close| {
            let digits = &after[..close];
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            Some((digits.parse::<usize>().ok()?, close))
        });
        match placeholder.and_then(|(index, close)| Some((args.get(index)?, close))) {
            Some((arg, close)) => {
                text.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                text.push('{');
                rest = after;
            }
        }
    }
    text.push_str(rest);
    text
}

impl Default for MessageService {
    fn default() -> Self {
        MessageService::english()
    }
}
