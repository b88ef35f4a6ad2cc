//! Mosque entry data structures.

use serde::{Deserialize, Deserializer, Serialize};

/// A mosque listing with its iftar metadata and credibility counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mosque {
    /// Unique identifier. Backend rows may carry numeric ids; they are
    /// coerced to strings here so the rest of the crate never re-coerces.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Display name
    pub name: String,

    /// Location label (area or address)
    pub location: String,

    /// Whether the mosque serves biryani at iftar
    #[serde(default)]
    pub has_biryani: bool,

    /// Menu item labels, in serving order
    #[serde(default)]
    pub menu_items: Vec<String>,

    /// Latitude, if the entry has been geotagged
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude, if the entry has been geotagged
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Count of "true" credibility votes, recomputed from the vote table
    #[serde(default)]
    pub true_count: u32,

    /// Count of "fake" credibility votes, recomputed from the vote table
    #[serde(default)]
    pub fake_count: u32,
}

impl Mosque {
    /// Net credibility score, used only for display ordering.
    pub fn net_score(&self) -> i64 {
        i64::from(self.true_count) - i64::from(self.fake_count)
    }

    /// Google Maps search link for the entry's coordinates.
    pub fn map_url(&self) -> Option<String> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(format!(
                "https://www.google.com/maps/search/?api=1&query={lat},{lng}"
            )),
            _ => None,
        }
    }

    /// Format the entry for display using a template.
    ///
    /// Supported placeholders:
    /// - `{id}`, `{name}`, `{location}`, `{menu}`
    /// - `{true_count}`, `{fake_count}`, `{net}`, `{biryani}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{id}", &self.id)
            .replace("{name}", &self.name)
            .replace("{location}", &self.location)
            .replace("{menu}", &self.menu_items.join(", "))
            .replace("{true_count}", &self.true_count.to_string())
            .replace("{fake_count}", &self.fake_count.to_string())
            .replace("{net}", &self.net_score().to_string())
            .replace("{biryani}", if self.has_biryani { "yes" } else { "no" })
    }
}

/// Payload for submitting a new entry. The backend assigns the identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMosque {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub has_biryani: bool,
    #[serde(default)]
    pub menu_items: Vec<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Deserialize an identifier that may arrive as a string or a number.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
