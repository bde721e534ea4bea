/// Chat platform user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Chat platform channel/chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Chat platform message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a delivered message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// Smart Assembly types the assistant knows by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssemblyKind {
    StorageUnit,
    Turret,
    Gate,
}

impl AssemblyKind {
    pub const ALL: [AssemblyKind; 3] = [
        AssemblyKind::StorageUnit,
        AssemblyKind::Turret,
        AssemblyKind::Gate,
    ];

    /// Accepts the common spellings users type after `smart create`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "ssu" | "storage" | "storage-unit" | "storage_unit" | "storageunit" | "storage unit" => {
                Some(AssemblyKind::StorageUnit)
            }
            "turret" => Some(AssemblyKind::Turret),
            "gate" => Some(AssemblyKind::Gate),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AssemblyKind::StorageUnit => "Storage Unit (SSU)",
            AssemblyKind::Turret => "Turret",
            AssemblyKind::Gate => "Gate",
        }
    }

    /// File-name friendly identifier (used for documentation lookup).
    pub fn slug(self) -> &'static str {
        match self {
            AssemblyKind::StorageUnit => "storage_unit",
            AssemblyKind::Turret => "turret",
            AssemblyKind::Gate => "gate",
        }
    }
}

/// What the user asked to build: a known kind, or whatever they typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssemblyType {
    Known(AssemblyKind),
    Other(String),
}

impl AssemblyType {
    pub fn from_arg(raw: &str) -> Self {
        match AssemblyKind::parse(raw) {
            Some(kind) => AssemblyType::Known(kind),
            None => AssemblyType::Other(raw.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AssemblyType::Known(kind) => kind.display_name(),
            AssemblyType::Other(s) => s,
        }
    }

    pub fn slug(&self) -> String {
        match self {
            AssemblyType::Known(kind) => kind.slug().to_string(),
            AssemblyType::Other(s) => s
                .trim()
                .to_lowercase()
                .chars()
                .map(|c| if c.is_alphanumeric() { c } else { '_' })
                .collect(),
        }
    }
}
