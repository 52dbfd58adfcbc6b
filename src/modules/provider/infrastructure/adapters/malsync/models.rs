//! MALSync response models

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct MalSyncResponse {
    /// Site tag -> entry key -> entry; most sites carry a single entry
    #[serde(rename = "Sites", default)]
    pub sites: BTreeMap<String, BTreeMap<String, MalSyncSite>>,
}

#[derive(Debug, Deserialize)]
pub struct MalSyncSite {
    pub identifier: Option<String>,
    pub url: Option<String>,
}
