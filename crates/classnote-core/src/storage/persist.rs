//! Versioned JSON document codec for board scenes.
//!
//! Loading is tolerant: an unreadable document or a schema version other
//! than the current one yields an empty scene rather than an error, and
//! individual objects that fail to decode are dropped while the rest of
//! the document survives.

use crate::objects::{DrawObject, ObjectId};
use crate::scene::{Scene, ViewState};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Current document schema version. Documents with any other version are
/// discarded wholesale on load.
pub const SCHEMA_VERSION: u32 = 2;

/// Storage key for a board's document.
pub fn board_key(board_id: &str) -> String {
    format!("classnote.board.{board_id}")
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    version: u32,
    updated_at: u64,
    objects: &'a [DrawObject],
    view_state: &'a ViewState,
}

#[derive(Deserialize)]
struct DocumentIn {
    version: u32,
    #[serde(default)]
    objects: Vec<serde_json::Value>,
    #[serde(default)]
    view_state: Option<ViewState>,
}

/// Why a load came back empty instead of with the stored scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// The document was not valid JSON or not a document at all.
    Corrupt,
    /// Schema version differed from [`SCHEMA_VERSION`].
    VersionMismatch(u32),
}

/// What happened while decoding a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Objects skipped because they failed to decode or repeated an id.
    pub dropped: usize,
    /// Set when the whole document was discarded.
    pub reset: Option<ResetReason>,
}

/// Serialize a scene into the current document format.
pub fn encode_document(scene: &Scene, updated_at: u64) -> Result<String, serde_json::Error> {
    serde_json::to_string(&DocumentOut {
        version: SCHEMA_VERSION,
        updated_at,
        objects: &scene.objects,
        view_state: &scene.view,
    })
}

/// Decode a stored document into a scene, best effort.
pub fn decode_document(raw: &str) -> (Scene, LoadReport) {
    let mut report = LoadReport::default();

    let doc: DocumentIn = match serde_json::from_str(raw) {
        Ok(doc) => doc,
        Err(err) => {
            log::warn!("discarding unreadable board document: {err}");
            report.reset = Some(ResetReason::Corrupt);
            return (Scene::new(), report);
        }
    };

    if doc.version != SCHEMA_VERSION {
        log::warn!(
            "discarding board document with schema version {} (expected {})",
            doc.version,
            SCHEMA_VERSION
        );
        report.reset = Some(ResetReason::VersionMismatch(doc.version));
        return (Scene::new(), report);
    }

    let mut scene = Scene::new();
    if let Some(view) = doc.view_state {
        scene.view = view;
    }

    let mut seen: HashSet<ObjectId> = HashSet::new();
    for value in doc.objects {
        match serde_json::from_value::<DrawObject>(value) {
            Ok(object) if seen.insert(object.id()) => {
                scene.push(object);
            }
            Ok(object) => {
                log::warn!("dropping object with duplicate id {}", object.id());
                report.dropped += 1;
            }
            Err(err) => {
                log::warn!("dropping undecodable object: {err}");
                report.dropped += 1;
            }
        }
    }

    (scene, report)
}
