use serde::{Deserialize, Serialize};

/// XMPP presence "show" values (RFC 6121 section 4.7.2.1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresenceShow {
    /// Available (no <show/> element -- the default)
    Available,
    /// Free for chat
    Chat,
    /// Away
    Away,
    /// Extended away
    Xa,
    /// Do not disturb
    Dnd,
    /// Unavailable (offline)
    #[default]
    Unavailable,
}

impl PresenceShow {
    pub fn is_online(self) -> bool {
        !matches!(self, PresenceShow::Unavailable)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { attempt: u32 },
}

/// One row in the contact list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDisplayData {
    pub jid: String,
    pub display_name: Option<String>,
    pub presence: PresenceShow,
    pub status: Option<String>,
    pub unread_count: u32,
    pub avatar_path: Option<String>,
    pub is_group_chat: bool,
    pub encryption_enabled: bool,
}

impl ContactDisplayData {
    pub fn new(jid: impl Into<String>) -> Self {
        Self {
            jid: jid.into(),
            ..Default::default()
        }
    }

    /// Roster name if set, otherwise the bare JID.
    pub fn title(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => bare_jid(&self.jid),
        }
    }

    pub fn has_unread(&self) -> bool {
        self.unread_count > 0
    }
}

/// One entry in the account switcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDisplayData {
    pub jid: String,
    pub nickname: Option<String>,
    pub connection: ConnectionState,
    pub enabled: bool,
    pub unread_total: u32,
}

impl AccountDisplayData {
    pub fn new(jid: impl Into<String>) -> Self {
        Self {
            jid: jid.into(),
            enabled: true,
            ..Default::default()
        }
    }

    /// Nickname if set, otherwise the bare JID.
    pub fn label(&self) -> &str {
        match self.nickname.as_deref() {
            Some(nick) if !nick.trim().is_empty() => nick,
            _ => bare_jid(&self.jid),
        }
    }

    pub fn is_online(&self) -> bool {
        self.enabled && self.connection == ConnectionState::Connected
    }
}

fn bare_jid(jid: &str) -> &str {
    jid.split('/').next().unwrap_or(jid)
}
