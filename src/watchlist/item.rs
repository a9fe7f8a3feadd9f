//! Watchlist entries and the caller-facing draft they are built from.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::WatchlistError;

/// JSON key of the identity field.
pub const ID_FIELD: &str = "id";
/// JSON key of the insertion timestamp.
pub const ADDED_AT_FIELD: &str = "addedAt";

/// Opaque identifier of a saved pet or product.
///
/// Integer and string ids never compare equal: `1` and `"1"` are
/// different entries. Integers that fit in `i64` are always
/// [`ItemId::Number`]; [`ItemId::Unsigned`] only holds values above
/// `i64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Unsigned(u64),
    Text(String),
}

impl ItemId {
    /// Extract an id from a JSON value. Integers in the `i64` or `u64`
    /// range and strings are accepted.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(Self::Number)
                .or_else(|| n.as_u64().map(Self::from)),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Unsigned(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Parses integers as numeric ids, anything else as text.
impl FromStr for ItemId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Self::Number(n));
        }
        Ok(match s.parse::<u64>() {
            Ok(n) => Self::Unsigned(n),
            Err(_) => Self::Text(s.to_string()),
        })
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for ItemId {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<u32> for ItemId {
    fn from(n: u32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<u64> for ItemId {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Unsigned(n),
        }
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// An item a caller wants to save, before it gets its insertion time.
///
/// Descriptive fields (name, image, price, ...) are copied verbatim into
/// the stored [`WatchlistItem`].
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    id: ItemId,
    fields: Map<String, Value>,
}

impl ItemDraft {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Attach a descriptive field. `id` and `addedAt` are reserved and
    /// silently ignored.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        if !is_reserved(&name) {
            self.fields.insert(name, value.into());
        }
        self
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Human-readable label used in notifications: the `name` field when
    /// it is a string, the id otherwise.
    pub fn label(&self) -> String {
        label_of(&self.id, &self.fields)
    }

    /// Turn the draft into a stored item inserted at `added_at`.
    pub fn into_item(self, added_at: DateTime<Utc>) -> WatchlistItem {
        WatchlistItem {
            id: self.id,
            added_at: Some(added_at),
            fields: self.fields,
        }
    }
}

impl TryFrom<Value> for ItemDraft {
    type Error = WatchlistError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut fields) = value else {
            return Err(WatchlistError::NotAnObject);
        };

        let raw_id = fields.remove(ID_FIELD).ok_or(WatchlistError::MissingId)?;
        let id = ItemId::from_value(&raw_id).ok_or_else(|| WatchlistError::InvalidId {
            value: raw_id.to_string(),
        })?;
        fields.remove(ADDED_AT_FIELD);

        Ok(Self { id, fields })
    }
}

/// One saved entity.
///
/// Serialized as a flat JSON object: `id`, `addedAt` and every
/// descriptive field side by side. `addedAt` is absent only for items
/// hydrated from snapshots that were written without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistItem {
    id: ItemId,
    #[serde(
        rename = "addedAt",
        default,
        skip_serializing_if = "Option::is_none",
        with = "iso8601"
    )]
    added_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl WatchlistItem {
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        self.added_at
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn label(&self) -> String {
        label_of(&self.id, &self.fields)
    }
}

/// Current time at the precision snapshots store (milliseconds).
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn is_reserved(name: &str) -> bool {
    name == ID_FIELD || name == ADDED_AT_FIELD
}

fn label_of(id: &ItemId, fields: &Map<String, Value>) -> String {
    match fields.get("name") {
        Some(Value::String(name)) if !name.is_empty() => name.clone(),
        _ => id.to_string(),
    }
}

/// `addedAt` as an ISO-8601 UTC string with millisecond precision.
mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| {
                DateTime::parse_from_rfc3339(&raw)
                    .map(|ts| ts.with_timezone(&Utc))
                    .map_err(|e| de::Error::custom(format!("invalid addedAt '{}': {}", raw, e)))
            })
            .transpose()
    }
}
