//! Launch record as returned by the launch data provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single launch document.
///
/// Only the fields the service filters on or returns are kept; unknown
/// upstream fields are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    /// Provider-assigned identifier
    pub id: String,
    /// Mission name, e.g. "FalconSat"
    pub name: String,
    #[serde(default)]
    pub flight_number: u32,
    /// Launch time in UTC
    pub date_utc: DateTime<Utc>,
    /// Outcome; `None` while the launch has not happened
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub upcoming: bool,
    #[serde(default)]
    pub details: Option<String>,
}

/// One page of results from the provider's query endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LaunchPage {
    #[serde(default)]
    pub docs: Vec<Launch>,
}
