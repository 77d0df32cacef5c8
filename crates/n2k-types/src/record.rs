use serde::{Deserialize, Serialize};

/// The all-zero key. Doubles as the not-found sentinel and as the
/// "any grid" placeholder.
pub const NULL_KEY: &str = "00000000-0000-0000-0000-000000000000";

/// The record stored per avatar.
///
/// The same serialized record is written under two different store keys,
/// once under the avatar name and once under the avatar key, so both
/// lookup directions are single point reads. The apparent redundancy in
/// fields is what makes that possible: whichever key a caller hits, the
/// full triple comes back.
///
/// The wire format is JSON with the short field names `name`, `key` and
/// `grid`; values written by earlier deployments of this service decode
/// unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarRecord {
    /// Avatar display name.
    #[serde(rename = "name")]
    pub avatar_name: String,
    /// 36-character hyphenated key. Some origin systems violate the
    /// variant bits of the canonical form; those values are stored as-is.
    #[serde(rename = "key")]
    pub key: String,
    /// Free-text label naming the origin grid/shard.
    #[serde(rename = "grid", default)]
    pub grid: String,
}

impl AvatarRecord {
    /// Create a record from its three parts.
    pub fn new(
        avatar_name: impl Into<String>,
        key: impl Into<String>,
        grid: impl Into<String>,
    ) -> Self {
        Self {
            avatar_name: avatar_name.into(),
            key: key.into(),
            grid: grid.into(),
        }
    }

    /// The sentinel returned for any lookup that did not produce a record:
    /// empty name, [`NULL_KEY`], empty grid.
    pub fn not_found() -> Self {
        Self {
            avatar_name: String::new(),
            key: NULL_KEY.to_string(),
            grid: String::new(),
        }
    }

    /// Returns `true` if this record is the not-found sentinel.
    pub fn is_not_found(&self) -> bool {
        self.avatar_name.is_empty() && self.key == NULL_KEY
    }

    /// Serialize to the JSON wire format.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode from the JSON wire format.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
