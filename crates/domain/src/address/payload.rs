//! Address wire payload.

use common::{AddressId, RegionId};
use serde::{Deserialize, Deserializer, Serialize};

/// The region portion of an address payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionPayload {
    /// Freeform or canonical region name.
    #[serde(default)]
    pub region: Option<String>,

    /// Directory identifier; resolution is attempted only when present.
    #[serde(default)]
    pub region_id: Option<RegionId>,
}

/// Client-facing address shape.
///
/// Used both for inbound create/update bodies and as the outbound DTO.
/// The field set is the closed list of recognized keys; unknown keys in a
/// request body are ignored rather than merged into the aggregate, and
/// internal-only attributes (owner id, raw default flags, timestamps) have
/// no field here at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AddressId>,

    #[serde(default)]
    pub region: RegionPayload,

    /// Ordered street lines; always exactly two entries on the way out.
    #[serde(default)]
    pub street: Vec<String>,

    #[serde(default)]
    pub firstname: Option<String>,

    #[serde(default)]
    pub lastname: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub postcode: Option<String>,

    #[serde(default)]
    pub country_id: Option<String>,

    #[serde(default)]
    pub telephone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Set only by the literal JSON `true`; any other value reads as false.
    #[serde(default, deserialize_with = "strict_flag")]
    pub default_billing: bool,

    /// Set only by the literal JSON `true`; any other value reads as false.
    #[serde(default, deserialize_with = "strict_flag")]
    pub default_shipping: bool,
}

impl AddressPayload {
    /// Joins the street lines into the canonical single-field form,
    /// dropping empty trailing lines.
    pub fn street_joined(&self) -> String {
        let last_filled = self
            .street
            .iter()
            .rposition(|line| !line.trim().is_empty());
        match last_filled {
            Some(idx) => self.street[..=idx].join("\n"),
            None => String::new(),
        }
    }
}

/// Strict boolean: literal `true` sets the flag, anything else (false,
/// null, numbers, strings, absent) reads as false.
fn strict_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(matches!(value, serde_json::Value::Bool(true)))
}
