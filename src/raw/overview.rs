use super::de;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Payload of `GET /api/overview/`.
///
/// Two backend versions are in circulation: the legacy one uses camelCase
/// scalars and `[label, amount]` tuples under `TopProjects`/`TopSectors`
/// keyed `Project1`..; the current one uses snake_case scalars and
/// `{title|name, total_financing}` objects keyed `project1`... Both decode
/// into this single type through serde aliases and [`RankedEntry`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawOverview {
    #[serde(alias = "numProjects", deserialize_with = "de::number")]
    pub number_of_projects: f64,
    #[serde(alias = "totalFinancing", deserialize_with = "de::number")]
    pub total_financing: f64,
    #[serde(alias = "numberEndedProjects", deserialize_with = "de::number")]
    pub number_ended_projects: f64,
    #[serde(alias = "numberProjectsInProgress", deserialize_with = "de::number")]
    pub number_projects_in_progress: f64,
    #[serde(alias = "numberNotStartedProjects", deserialize_with = "de::number")]
    pub number_not_started_projects: f64,
    #[serde(alias = "MiddayFinancing", deserialize_with = "de::number")]
    pub midday_financing: f64,
    #[serde(alias = "MiddleNorthFinancing", deserialize_with = "de::number")]
    pub middle_north_financing: f64,
    #[serde(alias = "numberBigProjects", deserialize_with = "de::number")]
    pub number_big_projects: f64,
    #[serde(alias = "TopProjects", deserialize_with = "de::lenient")]
    pub top_projects: BTreeMap<String, RankedEntry>,
    #[serde(alias = "TopSectors", deserialize_with = "de::lenient")]
    pub top_sectors: BTreeMap<String, RankedEntry>,
}

impl RawOverview {
    /// The n-th (1-based) most financed project, if the payload has it.
    pub fn project(&self, n: usize) -> Option<&RankedEntry> {
        slot(&self.top_projects, "project", n)
    }

    /// The n-th (1-based) most financed sector, if the payload has it.
    pub fn sector(&self, n: usize) -> Option<&RankedEntry> {
        slot(&self.top_sectors, "sector", n)
    }
}

// `Project1` and `project1` name the same slot
fn slot<'a>(
    map: &'a BTreeMap<String, RankedEntry>,
    prefix: &str,
    n: usize,
) -> Option<&'a RankedEntry> {
    let key = format!("{}{}", prefix, n);
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        .map(|(_, v)| v)
}

/// One ranked slot, decoded from either `[label, amount]` or
/// `{"title"|"name": label, "total_financing": amount}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedEntry {
    pub label: Option<String>,
    pub amount: f64,
}

impl<'de> Deserialize<'de> for RankedEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let entry = match &value {
            Value::Array(pair) => RankedEntry {
                label: pair.first().and_then(de::to_text),
                amount: pair.get(1).map(de::to_number).unwrap_or(0.0),
            },
            Value::Object(obj) => RankedEntry {
                label: obj
                    .get("title")
                    .and_then(de::to_text)
                    .or_else(|| obj.get("name").and_then(de::to_text)),
                amount: obj.get("total_financing").map(de::to_number).unwrap_or(0.0),
            },
            _ => RankedEntry::default(),
        };
        Ok(entry)
    }
}
