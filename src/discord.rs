//! Bot-token client for the Discord REST API: the guilds the bot sits in,
//! their text channels, recent messages, and posting as the bot.

use crate::config::DiscordConfig;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::time::Duration;

pub const MESSAGE_LIMIT: u8 = 50;
const CDN_URL: &str = "https://cdn.discordapp.com";

// Guild text, voice, announcement, the three thread kinds and stage channels
// all carry a message stream.
const TEXT_BASED: [u8; 7] = [0, 2, 5, 10, 11, 12, 13];

#[derive(Debug, Deserialize)]
pub struct RawGuild {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub approximate_member_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct RawChannel {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub discriminator: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawAttachment {
    pub url: String,
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct RawMessage {
    pub id: String,
    pub channel_id: String,
    #[serde(default)]
    pub content: String,
    pub author: RawUser,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub attachments: Vec<RawAttachment>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GuildView {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub member_count: u64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ChannelView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AttachmentView {
    pub url: String,
    pub name: String,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: String,
    pub content: String,
    pub author: String,
    pub author_id: String,
    pub timestamp: String,
    pub attachments: Vec<AttachmentView>,
}

pub fn is_text_based(kind: u8) -> bool {
    TEXT_BASED.contains(&kind)
}

pub fn guild_view(guild: RawGuild) -> GuildView {
    let icon = guild
        .icon
        .as_ref()
        .map(|hash| format!("{CDN_URL}/icons/{}/{hash}.png", guild.id));
    GuildView {
        icon,
        member_count: guild.approximate_member_count.unwrap_or(0),
        id: guild.id,
        name: guild.name,
    }
}

pub fn text_channels(channels: Vec<RawChannel>) -> Vec<ChannelView> {
    channels
        .into_iter()
        .filter(|channel| is_text_based(channel.kind))
        .map(|channel| ChannelView {
            id: channel.id,
            name: channel.name.unwrap_or_default(),
            kind: channel.kind,
        })
        .collect()
}

/// `name#1234` for legacy accounts, the bare username once discriminators
/// were retired (reported as `"0"`).
pub fn author_tag(user: &RawUser) -> String {
    match user.discriminator.as_deref() {
        Some(disc) if disc != "0" && !disc.is_empty() => format!("{}#{disc}", user.username),
        _ => user.username.clone(),
    }
}

/// Discord returns newest first; the dashboard reads oldest first.
pub fn message_views(messages: Vec<RawMessage>) -> Vec<MessageView> {
    messages
        .into_iter()
        .rev()
        .map(|message| MessageView {
            author: author_tag(&message.author),
            author_id: message.author.id,
            timestamp: message.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            attachments: message
                .attachments
                .into_iter()
                .map(|attachment| AttachmentView {
                    url: attachment.url,
                    name: attachment.filename,
                })
                .collect(),
            id: message.id,
            content: message.content,
        })
        .collect()
}

/// Body for a bot post, or `None` when there is nothing to send.
pub fn outgoing_message(content: Option<&str>, embed: Option<Value>) -> Option<Value> {
    let mut body = Map::new();
    if let Some(content) = content.filter(|content| !content.is_empty()) {
        body.insert("content".to_string(), json!(content));
    }
    if let Some(embed) = embed.filter(|embed| !embed.is_null()) {
        body.insert("embeds".to_string(), json!([embed]));
    }
    (!body.is_empty()).then_some(Value::Object(body))
}

#[derive(Clone)]
pub struct DiscordClient {
    http: Client,
    base_url: String,
    token: String,
}

impl DiscordClient {
    pub fn new(config: &DiscordConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            token: config.token.clone(),
        })
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(AUTHORIZATION, format!("Bot {}", self.token))
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authed(self.http.get(format!("{}{path}", self.base_url)))
    }

    pub async fn guilds(&self) -> Result<Vec<GuildView>, reqwest::Error> {
        let guilds: Vec<RawGuild> = self
            .get("/users/@me/guilds")
            .query(&[("with_counts", "true")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(guilds.into_iter().map(guild_view).collect())
    }

    pub async fn guild_channels(&self, guild_id: &str) -> Result<Vec<ChannelView>, reqwest::Error> {
        let channels: Vec<RawChannel> = self
            .get(&format!("/guilds/{guild_id}/channels"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(text_channels(channels))
    }

    pub async fn channel(&self, channel_id: &str) -> Result<RawChannel, reqwest::Error> {
        self.get(&format!("/channels/{channel_id}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// The latest [`MESSAGE_LIMIT`] messages, oldest first.
    pub async fn messages(&self, channel_id: &str) -> Result<Vec<MessageView>, reqwest::Error> {
        let messages: Vec<RawMessage> = self
            .get(&format!("/channels/{channel_id}/messages"))
            .query(&[("limit", MESSAGE_LIMIT)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(message_views(messages))
    }

    pub async fn send_message(&self, channel_id: &str, body: &Value) -> Result<RawMessage, reqwest::Error> {
        let url = format!("{}/channels/{channel_id}/messages", self.base_url);
        self.authed(self.http.post(url))
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}
