//! Swagger document model: just the `definitions` section, which is all the
//! generator reads.
//!
//! Decoding is lenient the same way the rest of the pipeline is: absent or
//! `null` keys become empty values and unrecognized `type`/`format` strings
//! land in an `Other` variant instead of failing.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

pub type Definitions = IndexMap<String, Definition>;
pub type Properties = IndexMap<String, Property>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Spec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub definitions: Definitions,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Definition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub required: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Properties,
}

impl Definition {
    pub fn is_required(&self, field: &str) -> bool {
        self.required.iter().any(|name| name == field)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Property {
    #[serde(rename = "$ref", default, deserialize_with = "null_as_default")]
    pub reference: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub format: PropertyFormat,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: PropertyType,
    /// Element schema; only meaningful for `type: array`.
    #[serde(default)]
    pub items: Option<Box<Property>>,
}

impl Property {
    pub fn is_date_time(&self) -> bool {
        self.kind == PropertyType::String && self.format == PropertyFormat::DateTime
    }

    /// This property followed by its nested `items`, outermost first.
    pub fn walk(&self) -> impl Iterator<Item = &Property> {
        std::iter::successors(Some(self), |prop| prop.items.as_deref())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Integer,
    Number,
    Array,
    Boolean,
    /// `object`, an empty type or anything unrecognized.
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum PropertyFormat {
    #[serde(rename = "int32")]
    Int32,
    #[serde(rename = "int64")]
    Int64,
    #[serde(rename = "date-time")]
    DateTime,
    #[default]
    #[serde(other)]
    Other,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
