//! Seed data: the bundled mosque list shipped with the client.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Mosque;

/// Root seed data structure: the static entry list used as the base layer
/// (and as the whole dataset when no backend is configured).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    /// Bundled mosque entries
    pub mosques: Vec<Mosque>,
}

impl Seed {
    /// Load seed data from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load seed data or return the bundled default if loading fails.
    ///
    /// A missing file is the normal case and is not warned about.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No seed file at {:?}; using bundled seed data.", path);
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!(
                "Seed load failed from {:?}: {}. Using bundled seed data.",
                path,
                e
            );
            Self::default()
        })
    }

    /// Validate that seed data is usable.
    pub fn validate(&self) -> Result<()> {
        if self.mosques.is_empty() {
            return Err(crate::error::AppError::validation(
                "No mosques defined in seed data",
            ));
        }
        let mut seen = HashSet::new();
        for mosque in &self.mosques {
            if mosque.id.trim().is_empty() {
                return Err(crate::error::AppError::validation(format!(
                    "Seed entry '{}' has an empty id",
                    mosque.name
                )));
            }
            if !seen.insert(mosque.id.as_str()) {
                return Err(crate::error::AppError::validation(format!(
                    "Duplicate seed id '{}'",
                    mosque.id
                )));
            }
            if mosque.name.trim().is_empty() {
                return Err(crate::error::AppError::validation(format!(
                    "Seed entry '{}' has an empty name",
                    mosque.id
                )));
            }
        }
        Ok(())
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            mosques: vec![
                entry(
                    "1",
                    "কান্দিরপাড় জামে মসজিদ",
                    "কান্দিরপাড়",
                    true,
                    &["ছোলা", "পিঁয়াজু", "বেগুনি", "আলুর চপ", "জিলাপি", "শরবত"],
                    23.4606,
                    91.1809,
                ),
                entry(
                    "2",
                    "চকবাজার শাহী মসজিদ",
                    "চকবাজার",
                    false,
                    &["ছোলা", "মুড়ি", "পিঁয়াজু", "খেজুর", "আপেল"],
                    23.4550,
                    91.1850,
                ),
                entry(
                    "3",
                    "টমছম ব্রিজ মসজিদ",
                    "টমছম ব্রিজ",
                    true,
                    &["তেহারি", "বোরহানি", "সালাদ", "খেজুর"],
                    23.4480,
                    91.1750,
                ),
                entry(
                    "4",
                    "পুলিশ লাইন জামে মসজিদ",
                    "পুলিশ লাইন",
                    false,
                    &["খিচুড়ি", "বেগুন ভাজি", "ডিম", "আচার"],
                    23.4650,
                    91.1700,
                ),
                entry(
                    "5",
                    "কুমিল্লা ক্যান্টনমেন্ট কেন্দ্রীয় মসজিদ",
                    "ক্যান্টনমেন্ট",
                    true,
                    &["স্পেশাল হালিম", "ছোলা", "জিলাপি", "জুস", "খেজুর"],
                    23.4800,
                    91.1300,
                ),
                entry(
                    "6",
                    "ময়নামতি ক্যান্টনমেন্ট মসজিদ",
                    "ময়নামতি",
                    false,
                    &["ছোলা", "পিঁয়াজু", "বেগুনি", "শরবত"],
                    23.4900,
                    91.1200,
                ),
            ],
        }
    }
}

fn entry(
    id: &str,
    name: &str,
    location: &str,
    has_biryani: bool,
    menu: &[&str],
    latitude: f64,
    longitude: f64,
) -> Mosque {
    Mosque {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        has_biryani,
        menu_items: menu.iter().map(|s| s.to_string()).collect(),
        latitude: Some(latitude),
        longitude: Some(longitude),
        true_count: 0,
        fake_count: 0,
    }
}
