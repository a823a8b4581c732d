// AgriMind: Response Normalizer
// The single seam defending the rest of the system from the oracle's
// free-text output. Never fails: every call returns a schema-shaped value,
// falling back to the agent's conservative default table when the text is
// unparsable.

use serde::de::DeserializeOwned;

/// Parse raw model text into a payload struct. Missing fields are filled
/// from the schema's default table (container-level serde defaulting on
/// every payload struct); a totally unparsable response yields the full
/// default object.
pub fn normalize<T>(raw: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let json_str = extract_json(raw);
    match serde_json::from_str::<T>(&json_str) {
        Ok(value) => value,
        Err(e) => {
            log::warn!(
                "Failed to parse model response, applying schema defaults: {} (response: {:.200})",
                e,
                raw
            );
            T::default()
        }
    }
}

/// Extract JSON from a response that might be wrapped in markdown code
/// blocks or surrounded by prose.
pub fn extract_json(response: &str) -> String {
    // JSON code fences first
    if let Some(start) = response.find("```json") {
        if let Some(end) = response[start..]
            .find("```\n")
            .or_else(|| response[start..].rfind("```"))
        {
            let json_start = start + 7; // Skip "```json"
            let json_end = start + end;
            if json_start < json_end {
                return response[json_start..json_end].trim().to_string();
            }
        }
    }

    // Generic code fences
    if let Some(start) = response.find("```") {
        let after_start = start + 3;
        // Skip the language identifier if present
        let content_start = response[after_start..]
            .find('\n')
            .map(|i| after_start + i + 1)
            .unwrap_or(after_start);
        if let Some(end) = response[content_start..].find("```") {
            return response[content_start..content_start + end]
                .trim()
                .to_string();
        }
    }

    // Raw JSON object embedded in prose
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if start < end {
                return response[start..=end].to_string();
            }
        }
    }

    response.to_string()
}
