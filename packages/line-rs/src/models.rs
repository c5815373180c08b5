use serde::{Deserialize, Serialize};

/// Body of a webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Message {
        #[serde(rename = "replyToken")]
        reply_token: String,
        message: Message,
        #[serde(default)]
        source: Option<Source>,
        #[serde(default)]
        timestamp: i64,
    },
    /// Follow, unfollow, postback and everything else we do not answer
    #[serde(other)]
    Other,
}

impl Event {
    /// Reply token and text for a text-message event.
    pub fn as_text(&self) -> Option<(&str, &str)> {
        match self {
            Event::Message {
                reply_token,
                message: Message::Text { text, .. },
                ..
            } => Some((reply_token.as_str(), text.as_str())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text {
        #[serde(default)]
        id: String,
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Outgoing message object.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SendMessage {
    Text { text: String },
}

/// Request body for the reply endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyRequest<'a> {
    #[serde(rename = "replyToken")]
    pub reply_token: &'a str,
    pub messages: Vec<SendMessage>,
}
