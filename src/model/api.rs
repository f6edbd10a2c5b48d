//! Shared API envelope types.

use serde::{Deserialize, Serialize};

/// JSON body for error responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// JSON body for simple acknowledgement responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub msg: String,
}

impl MessageDto {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Query parameters of a DataTables server-side request.
///
/// The admin tables (users, audit logs) use the DataTables protocol: the
/// widget sends `draw`, an offset/limit pair, and a global search string,
/// and expects the response to echo `draw` back.
#[derive(Debug, Clone, Deserialize)]
pub struct DataTableQuery {
    #[serde(default)]
    pub draw: u64,
    #[serde(default)]
    pub start: u64,
    #[serde(default = "default_length")]
    pub length: u64,
    #[serde(rename = "search[value]", default)]
    pub search: Option<String>,
}

fn default_length() -> u64 {
    25
}

impl DataTableQuery {
    /// Search filter, normalized so a blank search box means "no filter".
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Response envelope of a DataTables server-side request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTableResponse<T> {
    pub data: Vec<T>,
    pub records_total: u64,
    pub records_filtered: u64,
    pub draw: u64,
}
