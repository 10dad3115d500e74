//! Events document loading
//!
//! Reads the JSON events input into an in-memory device map. Missing input
//! and malformed content are reported as distinct failures so callers can
//! tell a bad path from a bad file.

use crate::error::{InjectorError, Result};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Parsed events document: device name -> event payload.
///
/// A payload is either a single event object or an array of event objects;
/// the shape is decided per device at traversal time. Iteration follows
/// document order.
pub type EventDocument = Map<String, Value>;

/// Load and parse the events document at `path`.
///
/// Fails with [`InjectorError::InputNotFound`] when the file cannot be
/// opened and [`InjectorError::InvalidFormat`] when the content does not
/// parse as a JSON object.
pub fn load_events(path: &Path) -> Result<EventDocument> {
    let file = File::open(path).map_err(|source| InjectorError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    // Deserializing straight into a map also rejects well-formed JSON whose
    // root is not an object.
    let document: EventDocument =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            InjectorError::InvalidFormat {
                path: path.to_path_buf(),
                source,
            }
        })?;

    debug!(
        "loaded {} device entries from {}",
        document.len(),
        path.display()
    );
    Ok(document)
}
