use std::collections::HashMap;

use tracing::warn;

/// Drawn overlay payloads keyed by frame position.
///
/// The editor exports either a JSON object mapping decimal frame indices to
/// data-URI strings, or a single bare data URI that applies to frame 0. Any
/// malformed top-level payload degrades to an empty map; individual entries
/// with unusable keys or values are dropped. Parsing never fails the batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlayMap {
    entries: HashMap<usize, String>,
}

impl OverlayMap {
    /// Map with no overlays.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a map from already-split entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (usize, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Parse the editor's export format.
    ///
    /// Accepts a JSON object (`{"0": "data:image/png;base64,...", ...}`) or a
    /// bare `data:image` URI for frame 0. Anything else, including invalid
    /// JSON, yields an empty map.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::empty();
        }
        if raw.starts_with('{') {
            match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(raw) {
                Ok(object) => {
                    let mut entries = HashMap::with_capacity(object.len());
                    for (key, value) in object {
                        // Only canonical decimal keys ("5", not "05" or "+5")
                        // can name a frame.
                        let pos = match key.parse::<usize>() {
                            Ok(pos) if pos.to_string() == key => pos,
                            _ => {
                                warn!(
                                    "overlay key '{}' is not a frame index, dropping entry",
                                    key
                                );
                                continue;
                            }
                        };
                        match value {
                            serde_json::Value::String(uri) => {
                                entries.insert(pos, uri);
                            }
                            other => {
                                warn!(
                                    "overlay entry for frame {} is {} instead of a string, dropping entry",
                                    pos,
                                    json_kind(&other)
                                );
                            }
                        }
                    }
                    Self { entries }
                }
                Err(err) => {
                    warn!("overlay payload is not valid JSON ({}), dropping all overlays", err);
                    Self::empty()
                }
            }
        } else if raw.starts_with("data:image") {
            Self::from_entries([(0, raw.to_string())])
        } else {
            warn!("overlay payload is neither JSON nor a data URI, dropping all overlays");
            Self::empty()
        }
    }

    /// Overlay payload for frame `pos`, if one was drawn.
    pub fn get(&self, pos: usize) -> Option<&str> {
        self.entries.get(&pos).map(String::as_str)
    }

    /// Number of overlays.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no frame has an overlay.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a bool",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/map.rs"]
mod tests;
