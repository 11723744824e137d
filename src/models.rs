use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One row of the `server_analytics` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub created_at: DateTime<Utc>,
    pub event_type: String,
    #[serde(default)]
    pub event_data: Option<Value>,
}

impl EventRecord {
    /// The `count` payload carried by `member_count` events.
    ///
    /// Accepts a JSON number or a numeric string; anything else reads as absent.
    pub fn member_count(&self) -> Option<u64> {
        let count = self.event_data.as_ref()?.get("count")?;
        match count {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    WipeCreated,
    TicketCreated,
    TournamentRoleCreated,
    ChannelDeleted,
    MemberCount,
}

impl EventKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "wipe_created" => Some(Self::WipeCreated),
            "ticket_created" => Some(Self::TicketCreated),
            "tournament_role_created" => Some(Self::TournamentRoleCreated),
            "channel_deleted" => Some(Self::ChannelDeleted),
            "member_count" => Some(Self::MemberCount),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WipeCreated => "wipe_created",
            Self::TicketCreated => "ticket_created",
            Self::TournamentRoleCreated => "tournament_role_created",
            Self::ChannelDeleted => "channel_deleted",
            Self::MemberCount => "member_count",
        }
    }
}

/// Per-kind counters. `member_count` holds a running maximum, the rest are tallies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct EventCounts {
    pub wipe_created: u64,
    pub ticket_created: u64,
    pub tournament_role_created: u64,
    pub channel_deleted: u64,
    pub member_count: u64,
}

impl EventCounts {
    pub fn record(&mut self, kind: EventKind, member_count: Option<u64>) {
        let slot = match kind {
            EventKind::MemberCount => {
                self.member_count = self.member_count.max(member_count.unwrap_or(0));
                return;
            }
            EventKind::WipeCreated => &mut self.wipe_created,
            EventKind::TicketCreated => &mut self.ticket_created,
            EventKind::TournamentRoleCreated => &mut self.tournament_role_created,
            EventKind::ChannelDeleted => &mut self.channel_deleted,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// A day bucket (`YYYY-MM-DD`) or, for single-day ranges, a minute bucket
/// (`YYYY-MM-DDTHH:MM`, local wall clock).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineBucket {
    pub date: String,
    #[serde(flatten)]
    pub counts: EventCounts,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub totals: EventCounts,
    pub timeline: Vec<TimelineBucket>,
    pub total: u64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub other_events: BTreeMap<String, u64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub days: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ColorQuery {
    pub r: Option<i64>,
    pub g: Option<i64>,
    pub b: Option<i64>,
    pub hex: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub embed: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessageResponse {
    pub success: bool,
    pub message_id: String,
    pub channel_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangelogEntry {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub added: Vec<String>,
    #[serde(default)]
    pub fixed: Vec<String>,
    #[serde(default)]
    pub changed: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChangelogData {
    pub entries: Vec<ChangelogEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ViewResponse {
    pub success: bool,
    pub views: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MapFile {
    pub id: String,
    pub original_name: String,
    pub storage_path: String,
    pub file_size: u64,
    pub uploaded_at: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub map: MapFile,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub supabase: bool,
    pub discord: bool,
    pub changelog: bool,
    pub timestamp: String,
}
