//! Classifier label -> landmark lookup table
//!
//! The local classifier predicts dataset labels ("tajmahal",
//! "hawa mahal pics"); this table turns them into display names and
//! coordinates. The table is immutable once loaded and must cover every
//! class the classifier can emit, which is checked at startup.

use crate::error::{Error, Result};
use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One row of the lookup table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkEntry {
    /// Classifier label, matched exactly
    pub label: String,
    /// Display name
    pub name: String,
    #[serde(flatten)]
    pub location: Coordinates,
}

/// Labels of the bundled dataset with their landmarks
const BUILTIN: &[(&str, &str, f64, f64)] = &[
    ("Ajanta Caves", "Ajanta Caves", 20.5513, 75.7069),
    ("alai_darwaza", "Alai Darwaza", 28.5242, 77.1857),
    ("alai_minar", "Alai Minar", 28.5258, 77.1853),
    ("basilica_of_bom_jesus", "Basilica Of Bom Jesus", 15.5008, 73.9115),
    ("Charar-E- Sharif", "Charar-i-Sharief", 33.8629, 74.7663),
    ("charminar", "Charminar", 17.3616, 78.4747),
    ("Chhota_Imambara", "Chota Imambada", 26.8745, 80.9045),
    ("Ellora Caves", "Ellora Caves", 20.0268, 75.1771),
    ("Fatehpur Sikri", "Fatehpur Sikri", 27.0945, 77.6679),
    ("Gateway of India", "Gateway of India", 18.9220, 72.8347),
    ("golden temple", "Golden Temple", 31.6200, 74.8765),
    ("hawa mahal pics", "Hawa Mahal", 26.9240, 75.8267),
    ("Humayun_s Tomb", "Humayun's Tomb", 28.5933, 77.2507),
    ("India gate pics", "India Gate", 28.6129, 77.2295),
    ("iron_pillar", "Iron Pillar", 28.5247, 77.1850),
    ("jamali_kamali_tomb", "Jamali Kamali Mosque and Tomb", 28.5196, 77.1871),
    ("Khajuraho", "Khajuraho", 24.8318, 79.9199),
    ("lotus_temple", "Lotus Temple", 28.5535, 77.2588),
    ("mysore_palace", "Mysore Palace", 12.3052, 76.6552),
    ("qutub_minar", "Qutub Minar", 28.5245, 77.1855),
    ("Sun Temple Konark", "Sun Temple Konark", 19.8876, 86.0945),
    ("tajmahal", "Taj Mahal", 27.1751, 78.0421),
    ("tanjavur temple", "Brihadisvara Temple", 11.2062, 79.4488),
    ("victoria memorial", "Victoria Memorial", 22.5448, 88.3426),
];

/// TOML file layout: a list of `[[landmark]]` tables
#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    landmark: Vec<LandmarkEntry>,
}

/// Immutable label -> landmark mapping, sorted by label
#[derive(Debug, Clone)]
pub struct LandmarkTable {
    entries: Vec<LandmarkEntry>,
}

impl LandmarkTable {
    /// Build a table, rejecting duplicate labels and invalid coordinates
    pub fn from_entries(mut entries: Vec<LandmarkEntry>) -> Result<Self> {
        for entry in &entries {
            entry.location.validate().map_err(|e| {
                Error::Config(format!("Landmark '{}' has bad coordinates: {}", entry.label, e))
            })?;
        }

        entries.sort_by(|a, b| a.label.cmp(&b.label));
        if let Some(pair) = entries.windows(2).find(|w| w[0].label == w[1].label) {
            return Err(Error::Config(format!(
                "Duplicate landmark label: {}",
                pair[0].label
            )));
        }

        Ok(Self { entries })
    }

    /// The table for the bundled 24-class dataset
    pub fn builtin() -> Self {
        let mut entries: Vec<LandmarkEntry> = BUILTIN
            .iter()
            .map(|(label, name, lat, lng)| LandmarkEntry {
                label: label.to_string(),
                name: name.to_string(),
                location: Coordinates::new(*lat, *lng),
            })
            .collect();
        entries.sort_by(|a, b| a.label.cmp(&b.label));
        Self { entries }
    }

    /// Parse a TOML table definition
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: TableFile = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse landmark table: {}", e)))?;
        Self::from_entries(file.landmark)
    }

    /// Load a TOML table definition from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read landmark table {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Look up a classifier label
    pub fn get(&self, label: &str) -> Option<&LandmarkEntry> {
        self.entries
            .binary_search_by(|entry| entry.label.as_str().cmp(label))
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Check that every classifier class has an entry
    ///
    /// Reports all missing labels at once.
    pub fn validate_classes<S: AsRef<str>>(&self, classes: &[S]) -> Result<()> {
        let missing: Vec<&str> = classes
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| self.get(c).is_none())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "Classifier labels missing from landmark table: {}",
                missing.join(", ")
            )))
        }
    }

    /// All entries, sorted by label
    pub fn entries(&self) -> &[LandmarkEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
