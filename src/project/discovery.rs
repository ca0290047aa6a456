// src/project/discovery.rs

//! Decoding the plugin's list of operations.
//!
//! Discovery is best effort: malformed output means "no operations", never
//! an error, so a broken plugin cannot take the host tool down with it.

use serde::Deserialize;
use tracing::warn;

/// One operation advertised by the plugin.
///
/// Unknown fields in the plugin's JSON are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OperationDescriptor {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub usage: Option<String>,
}

/// Strict decoding of a JSON array of operations.
pub fn try_decode_operations(bytes: &[u8]) -> serde_json::Result<Vec<OperationDescriptor>> {
    serde_json::from_slice(bytes)
}

/// Decode operations, yielding an empty list if the output is malformed.
pub fn decode_operations(bytes: &[u8]) -> Vec<OperationDescriptor> {
    match try_decode_operations(bytes) {
        Ok(operations) => operations,
        Err(err) => {
            warn!(
                error = %err,
                output_bytes = bytes.len(),
                "plugin printed malformed operation list; treating as empty"
            );
            Vec::new()
        }
    }
}
