//! Listing API types.

use serde::{Deserialize, Serialize};

/// Guild-count statistics body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StatsBody {
    /// Number of guilds the bot is currently in
    pub guilds: u64,
}

/// Raw bot record as the listing API returns it. Every field is optional;
/// the upstream payload omits fields freely.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BotPayload {
    #[serde(rename = "Big_desc")]
    pub big_desc: Option<String>,

    #[serde(rename = "Small_desc")]
    pub small_desc: Option<String>,

    pub announcement: Option<String>,
    pub avatar: Option<String>,
    pub id: Option<String>,
    pub bot_name: Option<String>,
    pub status: Option<String>,

    #[serde(default)]
    pub co_owners: Vec<CoOwnerPayload>,

    pub discord: Option<String>,
    pub invite: Option<String>,
    pub lib: Option<String>,
    pub list_date: Option<String>,
    pub owner_id: Option<String>,
    pub owner_name: Option<String>,
    pub prefix: Option<String>,
    pub public_flags: Option<u64>,
    pub servers: Option<u64>,
    pub site: Option<String>,
    pub vanity_url: Option<String>,
}

/// Raw co-owner entry from the upstream `co_owners` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoOwnerPayload {
    /// Legacy discriminator
    pub discriminator: Option<String>,

    /// User ID
    pub id: Option<String>,

    /// Discord public flags bitfield
    pub public_flags: Option<u64>,

    /// Username
    pub username: Option<String>,
}

/// Normalized bot listing record.
///
/// Textual fields default to the literal sentinel `"None"` when the upstream
/// payload omits them or sends an empty value; numeric fields stay optional
/// so a zero server count is not mistaken for an absent one.
#[derive(Debug, Clone, Serialize)]
pub struct BotInfo {
    /// Long description
    pub big_description: String,

    /// Short description
    pub small_description: String,

    /// Current announcement
    pub announcement: String,

    /// Avatar URL or hash
    pub avatar: String,

    /// Bot ID
    pub id: String,

    /// Bot name
    pub name: String,

    /// Listing status
    pub status: String,

    /// Approval state. The upstream record carries a single `status` field;
    /// it is exposed under both names for consumers that read either one.
    pub approval: String,

    /// Support server invite
    pub discord: String,

    /// Bot invite link
    pub invite: String,

    /// Library the bot is written with
    pub library: String,

    /// Date the bot was listed
    pub list_date: String,

    /// Owner's user ID
    pub owner_id: String,

    /// Owner's username
    pub owner_name: String,

    /// Command prefix
    pub prefix: String,

    /// Discord public flags bitfield
    pub public_flags: Option<u64>,

    /// Server count as last reported to the listing service
    pub servers: Option<u64>,

    /// Website URL
    pub site: String,

    /// Vanity URL slug
    pub vanity_url: String,

    /// Normalized co-owner entries
    pub co_owners: Vec<CoOwner>,

    /// Co-owner entries as the upstream sent them. Redundant with
    /// `co_owners`; kept so consumers can read the upstream shape verbatim.
    pub co_owners_raw: Vec<CoOwnerPayload>,
}

/// Normalized co-owner entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoOwner {
    /// Legacy discriminator, `"None"` when absent
    pub discriminator: String,

    /// User ID, `"None"` when absent
    pub id: String,

    /// Discord public flags bitfield
    pub public_flags: Option<u64>,

    /// Username, `"None"` when absent
    pub username: String,
}

/// Sentinel default: absent, null and empty strings all become `"None"`.
fn or_none(value: Option<String>) -> String {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => "None".into(),
    }
}

impl From<CoOwnerPayload> for CoOwner {
    fn from(payload: CoOwnerPayload) -> Self {
        Self {
            discriminator: or_none(payload.discriminator),
            id: or_none(payload.id),
            public_flags: payload.public_flags,
            username: or_none(payload.username),
        }
    }
}

impl From<BotPayload> for BotInfo {
    fn from(payload: BotPayload) -> Self {
        let co_owners = payload.co_owners.iter().cloned().map(CoOwner::from).collect();

        Self {
            big_description: or_none(payload.big_desc),
            small_description: or_none(payload.small_desc),
            announcement: or_none(payload.announcement),
            avatar: or_none(payload.avatar),
            id: or_none(payload.id),
            name: or_none(payload.bot_name),
            status: or_none(payload.status.clone()),
            approval: or_none(payload.status),
            discord: or_none(payload.discord),
            invite: or_none(payload.invite),
            library: or_none(payload.lib),
            list_date: or_none(payload.list_date),
            owner_id: or_none(payload.owner_id),
            owner_name: or_none(payload.owner_name),
            prefix: or_none(payload.prefix),
            public_flags: payload.public_flags,
            servers: payload.servers,
            site: or_none(payload.site),
            vanity_url: or_none(payload.vanity_url),
            co_owners,
            co_owners_raw: payload.co_owners,
        }
    }
}
