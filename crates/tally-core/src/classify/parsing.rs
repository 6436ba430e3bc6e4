//! JSON parsing helpers for classifier responses
//!
//! Models often include extra text before/after the JSON payload, so the
//! parser extracts the outermost object rather than parsing the whole
//! response.

use crate::error::{Error, Result};

use super::RemoteLabel;

/// Parse a raw label from a classifier response
pub fn parse_label(response: &str) -> Result<RemoteLabel> {
    let response = response.trim();

    // Look for a JSON object
    let start = response.find('{');
    let end = response.rfind('}');

    let label: RemoteLabel = match (start, end) {
        (Some(s), Some(e)) if s < e => {
            let json_str = &response[s..=e];
            serde_json::from_str(json_str).map_err(|e| {
                Error::InvalidData(format!(
                    "Invalid JSON from classifier: {} | Raw: {}",
                    e,
                    truncate(json_str)
                ))
            })?
        }
        _ => {
            return Err(Error::InvalidData(format!(
                "No JSON found in classifier response | Raw: {}",
                truncate(response)
            )))
        }
    };

    if !(0.0..=1.0).contains(&label.confidence) {
        return Err(Error::InvalidData(format!(
            "Classifier confidence out of range: {}",
            label.confidence
        )));
    }

    Ok(label)
}

/// Truncate long responses for error messages
fn truncate(s: &str) -> String {
    if s.len() > 200 {
        format!("{}...", &s[..200])
    } else {
        s.to_string()
    }
}
