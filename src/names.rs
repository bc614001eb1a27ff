use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One record of the flat `bsd/invNames.yaml` list. Both fields are
/// mandatory; a record missing either aborts the load.
#[derive(Debug, Deserialize)]
struct NameRecord {
    #[serde(rename = "itemID")]
    item_id: i64,
    #[serde(rename = "itemName")]
    item_name: String,
}

/// Identifier -> display name mapping, loaded once before any tree parsing.
///
/// Every hierarchical entity resolves its display name here; a miss on the
/// required path is fatal because the entity cannot be constructed without
/// a name.
#[derive(Debug, Default)]
pub struct NameDictionary {
    names: HashMap<i64, String>,
}

impl NameDictionary {
    /// Load the dictionary from `bsd/invNames.yaml` under the SDE root.
    /// Replaces any previous contents entirely.
    pub fn load(sde_dir: &Path) -> Result<Self> {
        let path = sde_dir.join("bsd").join("invNames.yaml");
        let file = File::open(&path)
            .with_context(|| format!("Failed to open name dictionary: {:?}", path))?;

        let records: Vec<NameRecord> = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse name dictionary: {:?}", path))?;

        let names = records
            .into_iter()
            .map(|r| (r.item_id, r.item_name))
            .collect();

        Ok(Self { names })
    }

    /// Required lookup: a miss is fatal for the entity being parsed.
    pub fn require(&self, id: i64) -> Result<&str> {
        self.names
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| anyhow!("No display name for identifier {}", id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(i64, &str)]) -> Self {
        Self {
            names: pairs.iter().map(|(id, n)| (*id, n.to_string())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_and_lookup() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("bsd")).unwrap();
        let mut f = File::create(dir.path().join("bsd/invNames.yaml")).unwrap();
        writeln!(f, "- itemID: 10000001\n  itemName: Region1").unwrap();
        writeln!(f, "- itemID: 30000001\n  itemName: System1").unwrap();

        let dict = NameDictionary::load(dir.path()).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.require(10000001).unwrap(), "Region1");
        assert!(dict.require(99).is_err());
    }

    #[test]
    fn test_record_missing_field_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("bsd")).unwrap();
        let mut f = File::create(dir.path().join("bsd/invNames.yaml")).unwrap();
        writeln!(f, "- itemID: 10000001").unwrap();

        assert!(NameDictionary::load(dir.path()).is_err());
    }
}
