//! The dialogue synthesis batch.
//!
//! One pass over the locale document, strictly sequential:
//! - lines outside the operator's `only` selection are ignored entirely
//! - lines without a speaker in the dialogue table are skipped with a warning
//! - markup is stripped and lines that end up too short are skipped
//! - lines whose asset already exists are skipped without touching the network
//! - everything else waits out the inter-call delay, is synthesized, and is written atomically
//!
//! A failed synthesis call is recorded and the batch moves on. Local I/O failures are fatal.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;

use tracing::{error, info, warn};

use crate::asset::{AUDIO_URL_PREFIX, AssetName};
use crate::dialogue::{DialogueTable, Speaker};
use crate::locale::{LocaleDocument, LocaleEntry};
use crate::markup::{is_speakable, strip_markup};
use crate::opts::SynthesisOpts;
use crate::synth::SpeechSynthesizer;
use crate::voice::voice_id;
use crate::{Error, Result};

/// How much of the cleaned text to echo in logs.
const PREVIEW_CHARS: usize = 80;

/// What happened to one locale entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated,
    /// Dry run: this entry would have been synthesized.
    Planned,
    AlreadyExists,
    TooShort,
    Unmapped,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub act: String,
    pub id: String,
    pub speaker: Option<Speaker>,
    /// Asset filename, known whenever the speaker is.
    pub file_name: Option<String>,
    pub outcome: Outcome,
}

impl EntryReport {
    /// The `audioUrl` for this entry, if it maps to an asset.
    pub fn audio_url(&self) -> Option<String> {
        self.file_name
            .as_ref()
            .map(|name| format!("{AUDIO_URL_PREFIX}/{name}"))
    }
}

/// Per-entry results of a batch, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub entries: Vec<EntryReport>,
}

impl BatchReport {
    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }

    pub fn generated(&self) -> usize {
        self.count(|o| *o == Outcome::Generated)
    }

    pub fn planned(&self) -> usize {
        self.count(|o| *o == Outcome::Planned)
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    /// Entries skipped for any reason (already present, too short, or unmapped).
    pub fn skipped(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                Outcome::AlreadyExists | Outcome::TooShort | Outcome::Unmapped
            )
        })
    }
}

/// A line that survived filtering and needs audio.
struct Job {
    clean: String,
    speaker: Speaker,
    file_name: String,
    path: PathBuf,
}

enum Step {
    Skip(EntryReport),
    Synthesize(EntryReport, Job),
}

fn classify(entry: &LocaleEntry<'_>, table: &DialogueTable<'_>, output_dir: &Path) -> Step {
    let mut report = EntryReport {
        act: entry.act.to_owned(),
        id: entry.id.to_owned(),
        speaker: None,
        file_name: None,
        outcome: Outcome::Unmapped,
    };

    let Some(speaker) = table.speaker(entry.id) else {
        warn!(dialogue = entry.id, act = entry.act, "no speaker mapping");
        return Step::Skip(report);
    };

    let name = AssetName::new(entry.act, entry.id, speaker);
    let file_name = name.file_name();
    report.speaker = Some(speaker);
    report.file_name = Some(file_name.clone());

    let clean = strip_markup(entry.text);
    if !is_speakable(&clean) {
        info!(dialogue = entry.id, "skipping, text too short");
        report.outcome = Outcome::TooShort;
        return Step::Skip(report);
    }

    let path = name.path_in(output_dir);
    if path.exists() {
        info!(file = %file_name, "skipping, already exists");
        report.outcome = Outcome::AlreadyExists;
        return Step::Skip(report);
    }

    Step::Synthesize(
        report,
        Job {
            clean,
            speaker,
            file_name,
            path,
        },
    )
}

/// Walk the batch without calling the synthesis service or writing anything.
///
/// Entries that would be synthesized are reported as [`Outcome::Planned`].
pub fn plan_synthesis(
    doc: &LocaleDocument,
    table: &DialogueTable<'_>,
    opts: &SynthesisOpts,
) -> BatchReport {
    let entries = doc
        .entries()
        .filter(|entry| opts.selects(entry.id))
        .map(|entry| match classify(&entry, table, &opts.output_dir) {
            Step::Skip(report) => report,
            Step::Synthesize(mut report, job) => {
                info!(file = %job.file_name, text = %preview(&job.clean), "would generate");
                report.outcome = Outcome::Planned;
                report
            }
        })
        .collect();

    BatchReport { entries }
}

/// Run the synthesis batch.
pub fn run_synthesis<S: SpeechSynthesizer>(
    doc: &LocaleDocument,
    table: &DialogueTable<'_>,
    synth: &S,
    opts: &SynthesisOpts,
) -> Result<BatchReport> {
    fs::create_dir_all(&opts.output_dir).map_err(|err| {
        Error::msg(format!(
            "failed to create output dir {}: {err}",
            opts.output_dir.display()
        ))
    })?;

    let mut report = BatchReport::default();

    for entry in doc.entries().filter(|entry| opts.selects(entry.id)) {
        let (mut entry_report, job) = match classify(&entry, table, &opts.output_dir) {
            Step::Skip(entry_report) => {
                report.entries.push(entry_report);
                continue;
            }
            Step::Synthesize(entry_report, job) => (entry_report, job),
        };

        if !opts.delay.is_zero() {
            thread::sleep(opts.delay);
        }

        info!(file = %job.file_name, text = %preview(&job.clean), "generating");

        entry_report.outcome = match synth.synthesize(&job.clean, voice_id(job.speaker)) {
            Ok(audio) => {
                write_asset(&job.path, &audio)?;
                info!(file = %job.file_name, bytes = audio.len(), "saved");
                Outcome::Generated
            }
            Err(err) if err.is_service_failure() => {
                match &err {
                    Error::Api { status, message } => {
                        error!(file = %job.file_name, status, message = %message, "synthesis failed")
                    }
                    other => error!(file = %job.file_name, error = %other, "synthesis failed"),
                }
                Outcome::Failed(err.to_string())
            }
            Err(err) => return Err(err),
        };

        report.entries.push(entry_report);
    }

    info!(
        generated = report.generated(),
        failed = report.failed(),
        skipped = report.skipped(),
        "synthesis batch finished"
    );

    Ok(report)
}

/// Write `audio` to `dest` without ever clobbering an existing file.
///
/// Bytes go to a hidden temp file in the same directory first, get synced, and are then renamed
/// into place, so an interrupted run never leaves a truncated asset behind.
pub fn write_asset(dest: &Path, audio: &[u8]) -> Result<()> {
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::Builder::new()
        .prefix(".quest-audio-")
        .suffix(".part")
        .tempfile_in(dir)?;

    tmp.write_all(audio)?;
    tmp.as_file().sync_all()?;
    tmp.persist_noclobber(dest)?;

    Ok(())
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_owned(),
    }
}
