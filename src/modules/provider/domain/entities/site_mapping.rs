use serde::{Deserialize, Serialize};

/// One cross-reference entry from the mapping service: a site tag plus that
/// site's identifier for the anime (sometimes a slash-delimited path).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteMapping {
    pub site: String,
    pub identifier: String,
}
