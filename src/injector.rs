//! Injecting `audioUrl` references into the quest's scene data.
//!
//! The scene file is TypeScript, but we treat it as opaque text: each dialogue entry has a
//! `bodyAsHtml: 'scenes.<act>.<id>',` marker, and we add an `audioUrl` line right after it.
//!
//! Running the injector twice over the same file inserts the reference twice. Callers who need
//! to re-run should start from a clean copy of the scene file.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, info};

use crate::Result;
use crate::asset::AssetName;
use crate::dialogue::DialogueTable;
use crate::opts::InjectOpts;

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(bodyAsHtml: 'scenes\.(act\d+)\.(d\d+)',)").expect("valid regex")
});

/// Indentation of the inserted line, matching the dialogue object fields in the scene file.
const FIELD_INDENT: &str = "        ";

/// Result of an injection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    /// The rewritten scene document.
    pub content: String,

    /// Number of `audioUrl` lines inserted.
    pub inserted: usize,

    /// Dialogue ids found in markers but missing from the table, in document order.
    pub skipped: Vec<String>,
}

impl Injection {
    pub fn changed(&self) -> bool {
        self.inserted > 0
    }
}

/// Insert an `audioUrl` line after every marker whose dialogue id is in `table`.
///
/// The URL is built from the table's act and speaker, not from the act in the marker.
/// Markers with unknown ids are left exactly as they were.
pub fn inject_audio_urls(scene: &str, table: &DialogueTable<'_>) -> Injection {
    let mut inserted = 0;
    let mut skipped = Vec::new();

    let content = MARKER_RE.replace_all(scene, |caps: &Captures<'_>| {
        let marker = &caps[1];
        let id = &caps[3];

        match table.get(id) {
            Some(record) => {
                inserted += 1;
                let url = AssetName::for_record(record).url();
                format!("{marker}\n{FIELD_INDENT}audioUrl: '{url}',")
            }
            None => {
                debug!(dialogue = id, marker_act = &caps[2], "no audio for dialogue");
                skipped.push(id.to_owned());
                marker.to_owned()
            }
        }
    });

    Injection {
        content: content.into_owned(),
        inserted,
        skipped,
    }
}

/// Rewrite a scene file in place.
pub fn inject_file(path: &Path, table: &DialogueTable<'_>, opts: &InjectOpts) -> Result<Injection> {
    let scene = fs::read_to_string(path)?;
    let injection = inject_audio_urls(&scene, table);

    if opts.dry_run {
        info!(
            file = %path.display(),
            inserted = injection.inserted,
            skipped = injection.skipped.len(),
            "dry run, scene file left unchanged"
        );
        return Ok(injection);
    }

    fs::write(path, &injection.content)?;
    info!(
        file = %path.display(),
        inserted = injection.inserted,
        skipped = injection.skipped.len(),
        "updated scene file with audio urls"
    );

    Ok(injection)
}
