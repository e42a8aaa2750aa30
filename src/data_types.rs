//! Data-Type Selection and Set Resolution
//!
//! A clear operation is requested either for a single data category or for
//! the symbolic "all enabled" selection. Before removal the selection is
//! expanded into a concrete [`DataTypeSet`], consulting the injected
//! enabled-types provider for the "all enabled" case.

use crate::error::HostError;
use crate::host::EnabledTypesProvider;
use crate::options::ClearOptions;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Wire value of the "all enabled" selection sentinel.
const ALL_DATA_TYPES: &str = "allDataTypes";

/// Host-defined category of browsing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "cache")]
    Cache,
    #[serde(rename = "cookies")]
    Cookies,
    #[serde(rename = "downloads")]
    Downloads,
    #[serde(rename = "fileSystems")]
    FileSystems,
    #[serde(rename = "formData")]
    FormData,
    #[serde(rename = "history")]
    History,
    #[serde(rename = "indexedDB")]
    IndexedDb,
    #[serde(rename = "localStorage")]
    LocalStorage,
    #[serde(rename = "passwords")]
    Passwords,
    #[serde(rename = "pluginData")]
    PluginData,
    #[serde(rename = "serviceWorkers")]
    ServiceWorkers,
}

impl DataType {
    /// Wire name of the category, as used by the host removal call and the
    /// localization keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Cookies => "cookies",
            Self::Downloads => "downloads",
            Self::FileSystems => "fileSystems",
            Self::FormData => "formData",
            Self::History => "history",
            Self::IndexedDb => "indexedDB",
            Self::LocalStorage => "localStorage",
            Self::Passwords => "passwords",
            Self::PluginData => "pluginData",
            Self::ServiceWorkers => "serviceWorkers",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cache" => Ok(Self::Cache),
            "cookies" => Ok(Self::Cookies),
            "downloads" => Ok(Self::Downloads),
            "fileSystems" => Ok(Self::FileSystems),
            "formData" => Ok(Self::FormData),
            "history" => Ok(Self::History),
            "indexedDB" => Ok(Self::IndexedDb),
            "localStorage" => Ok(Self::LocalStorage),
            "passwords" => Ok(Self::Passwords),
            "pluginData" => Ok(Self::PluginData),
            "serviceWorkers" => Ok(Self::ServiceWorkers),
            other => Err(format!("Unknown data type: {}", other)),
        }
    }
}

/// A single category or the symbolic "all enabled" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataTypeSelection {
    /// Every currently enabled category; wire value `"allDataTypes"`.
    AllEnabled,
    Single(DataType),
}

impl DataTypeSelection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllEnabled => ALL_DATA_TYPES,
            Self::Single(data_type) => data_type.as_str(),
        }
    }
}

impl Serialize for DataTypeSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DataTypeSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value == ALL_DATA_TYPES {
            return Ok(Self::AllEnabled);
        }
        DataType::from_str(&value)
            .map(Self::Single)
            .map_err(de::Error::custom)
    }
}

/// Unordered set of unique data categories selected for removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTypeSet(BTreeSet<DataType>);

impl DataTypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, data_type: DataType) -> bool {
        self.0.insert(data_type)
    }

    pub fn remove(&mut self, data_type: DataType) -> bool {
        self.0.remove(&data_type)
    }

    pub fn contains(&self, data_type: DataType) -> bool {
        self.0.contains(&data_type)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = DataType> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<DataType> for DataTypeSet {
    fn from_iter<I: IntoIterator<Item = DataType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for DataTypeSet {
    /// Wire shape of the host removal call: a map from category name to
    /// `true` for every included category.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for data_type in &self.0 {
            map.serialize_entry(data_type.as_str(), &true)?;
        }
        map.end()
    }
}

/// Expand a selection into the concrete set of categories to clear.
///
/// The result may be empty only when the selection is `AllEnabled` and the
/// provider itself returns no categories; the orchestrator must not proceed
/// to removal in that case.
pub async fn resolve_data_types(
    selection: DataTypeSelection,
    options: &ClearOptions,
    enabled_types: &dyn EnabledTypesProvider,
) -> Result<DataTypeSet, HostError> {
    match selection {
        DataTypeSelection::Single(data_type) => Ok(DataTypeSet::from_iter([data_type])),
        DataTypeSelection::AllEnabled => {
            let enabled = enabled_types.enabled_data_types(options).await?;
            Ok(enabled.into_iter().collect())
        }
    }
}
