use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Slug identifier for a category (e.g. `audio`).
///
/// Slugs are structural scaffolding: the front end keys navigation on them,
/// so they never change once a category exists.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

/// Slug identifier for a subcategory (e.g. `music-gen`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubcategoryId(pub String);

/// Globally unique tool identifier.
///
/// Stored documents carry two wire forms: a plain integer (`42`) and a
/// string-tagged integer (`"tool-42"`). Identity is the numeric value; the
/// original form is remembered so a load/save cycle does not rewrite entries
/// the run never touched.
#[derive(Clone, Copy, Debug)]
pub struct ToolId {
    value: u64,
    tagged: bool,
}

impl ToolId {
    /// Freshly allocated ids use the plain integer form.
    pub fn new(value: u64) -> Self {
        Self {
            value,
            tagged: false,
        }
    }

    /// String-tagged form (`tool-<n>`).
    pub fn tagged(value: u64) -> Self {
        Self {
            value,
            tagged: true,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn is_tagged(&self) -> bool {
        self.tagged
    }
}

impl PartialEq for ToolId {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for ToolId {}

impl PartialOrd for ToolId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ToolId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for ToolId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tagged {
            write!(f, "tool-{}", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

impl Serialize for ToolId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.tagged {
            serializer.collect_str(&format_args!("tool-{}", self.value))
        } else {
            serializer.serialize_u64(self.value)
        }
    }
}

impl<'de> Deserialize<'de> for ToolId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = ToolId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer or a 'tool-<n>' string")
            }

            fn visit_u64<E>(self, value: u64) -> Result<ToolId, E>
            where
                E: de::Error,
            {
                Ok(ToolId::new(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<ToolId, E>
            where
                E: de::Error,
            {
                u64::try_from(value)
                    .map(ToolId::new)
                    .map_err(|_| E::custom("tool id must not be negative"))
            }

            fn visit_str<E>(self, value: &str) -> Result<ToolId, E>
            where
                E: de::Error,
            {
                let digits = value
                    .strip_prefix("tool-")
                    .ok_or_else(|| E::custom(format!("malformed tool id '{value}'")))?;
                digits
                    .parse::<u64>()
                    .map(ToolId::tagged)
                    .map_err(|_| E::custom(format!("malformed tool id '{value}'")))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Pricing label attached to a tool listing.
///
/// Known variants keep serialization consistent; `Other` preserves the many
/// free-form labels found in stored documents ("Free / Paid", "Subscription",
/// "$249+", ...) verbatim.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Pricing {
    Free,
    Paid,
    Freemium,
    Other(String),
}

impl Pricing {
    pub fn as_str(&self) -> &str {
        match self {
            Pricing::Free => "Free",
            Pricing::Paid => "Paid",
            Pricing::Freemium => "Freemium",
            Pricing::Other(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "Free" => Pricing::Free,
            "Paid" => Pricing::Paid,
            "Freemium" => Pricing::Freemium,
            other => Pricing::Other(other.to_string()),
        }
    }
}

impl Serialize for Pricing {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pricing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}
