use std::collections::HashMap;

/// Offset and limit of a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Page {
    pub offset: u64,
    /// `None` means the page runs to the end of the collection.
    pub limit: Option<u64>,
}

impl Page {
    /// Values that are missing or do not parse fall back to the defaults
    /// instead of failing the request.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            offset: parse_offset(params.get("offset").map(String::as_str)),
            limit: parse_limit(params.get("limit").map(String::as_str)),
        }
    }
}

pub fn parse_offset(value: Option<&str>) -> u64 {
    value
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

pub fn parse_limit(value: Option<&str>) -> Option<u64> {
    value.and_then(|s| s.trim().parse::<u64>().ok())
}
