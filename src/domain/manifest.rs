use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ReleaseError, Result, ValidationError};

/// Version reported for a record that has no `AssemblyVersion` yet.
pub const UNSET_VERSION: &str = "0.0.0.0";

const ASSEMBLY_VERSION: &str = "AssemblyVersion";
const APPLICABLE_VERSION: &str = "ApplicableVersion";
const TESTING_ASSEMBLY_VERSION: &str = "TestingAssemblyVersion";
const LAST_UPDATE: &str = "LastUpdate";
const DOWNLOAD_LINK_INSTALL: &str = "DownloadLinkInstall";
const DOWNLOAD_LINK_UPDATE: &str = "DownloadLinkUpdate";

/// First record of the plugin manifest served to the plugin repository feed.
///
/// Kept as an ordered JSON object: only the bump fields are ever written,
/// every other key keeps its value, type and position.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestRecord {
    fields: Map<String, Value>,
}

impl ManifestRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String value of `key`, if present and a string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn assembly_version(&self) -> &str {
        self.str_field(ASSEMBLY_VERSION).unwrap_or(UNSET_VERSION)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn set(&mut self, key: &str, value: impl Into<Value>) {
        // Replacing an existing key keeps its position in the object.
        self.fields.insert(key.to_string(), value.into());
    }
}

/// The fields a version bump writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestUpdate {
    pub version: String,
    pub last_update: i64,
    pub download_link: String,
}

/// The whole manifest array; only the first record is interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    record: ManifestRecord,
    rest: Vec<Value>,
}

impl Manifest {
    /// Parses the manifest JSON array.
    pub fn parse(json: &str) -> Result<Self> {
        let mut entries: Vec<Value> = serde_json::from_str(json)?;
        if entries.is_empty() {
            return Err(ReleaseError::manifest("manifest array is empty"));
        }
        let rest = entries.split_off(1);
        let fields = match entries.remove(0) {
            Value::Object(fields) => fields,
            other => {
                return Err(ReleaseError::manifest(format!(
                    "first manifest entry is not an object: {}",
                    other
                )))
            }
        };
        Ok(Manifest {
            record: ManifestRecord { fields },
            rest,
        })
    }

    pub fn record(&self) -> &ManifestRecord {
        &self.record
    }

    /// Currently published version.
    pub fn current_version(&self) -> &str {
        self.record.assembly_version()
    }

    /// Fails when `new_version` is already the published version.
    pub fn ensure_changed(&self, new_version: &str) -> Result<()> {
        if self.current_version() == new_version {
            return Err(ValidationError::ManifestUnchanged {
                current: self.current_version().to_string(),
                new: new_version.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Applies a version bump to the first record.
    pub fn apply(&mut self, update: &ManifestUpdate) -> Result<()> {
        self.ensure_changed(&update.version)?;

        let record = &mut self.record;
        record.set(ASSEMBLY_VERSION, update.version.as_str());
        record.set(APPLICABLE_VERSION, update.version.as_str());
        record.set(TESTING_ASSEMBLY_VERSION, update.version.as_str());
        record.set(LAST_UPDATE, update.last_update);
        record.set(DOWNLOAD_LINK_INSTALL, update.download_link.as_str());
        record.set(DOWNLOAD_LINK_UPDATE, update.download_link.as_str());
        Ok(())
    }

    /// Serializes the array with 4-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let mut entries = Vec::with_capacity(1 + self.rest.len());
        entries.push(Value::Object(self.record.fields.clone()));
        entries.extend(self.rest.iter().cloned());

        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        entries.serialize(&mut ser)?;
        String::from_utf8(out).map_err(|e| ReleaseError::manifest(e.to_string()))
    }
}
