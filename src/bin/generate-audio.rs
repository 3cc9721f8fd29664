// Generates ElevenLabs voice audio for every Da Vinci Trees dialogue line that doesn't have an
// asset yet.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use quest_audio::batch::{BatchReport, plan_synthesis, run_synthesis};
use quest_audio::dialogue::DialogueTable;
use quest_audio::elevenlabs::ElevenLabsClient;
use quest_audio::locale::LocaleDocument;
use quest_audio::logging;
use quest_audio::opts::{DEFAULT_AUDIO_DIR, DEFAULT_LOCALE_PATH, SynthesisOpts};
use quest_audio::synth::ApiKey;

#[derive(Parser, Debug)]
#[command(name = "generate-audio")]
#[command(about = "Generate ElevenLabs dialogue audio for Da Vinci Trees", long_about = None)]
struct Params {
    /// Locale file with the dialogue text.
    #[arg(long = "locale", default_value = DEFAULT_LOCALE_PATH)]
    locale_path: PathBuf,

    /// Directory to write audio assets to (created if missing).
    #[arg(long = "out-dir", default_value = DEFAULT_AUDIO_DIR)]
    out_dir: PathBuf,

    /// Pause before each synthesis request, in milliseconds.
    #[arg(long = "delay-ms", default_value_t = 500)]
    delay_ms: u64,

    /// Only process these dialogue keys (comma-separated, e.g. `d12,d37`). Default: all.
    #[arg(long, value_delimiter = ',')]
    only: Vec<String>,

    /// List the files that would be generated without calling the API.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Print the `audioUrl` line for every mapped dialogue after the run.
    #[arg(long, default_value_t = false)]
    print_urls: bool,
}

fn main() -> Result<()> {
    logging::init();
    let params = Params::parse();

    // The credential check comes first so a misconfigured run does no work at all.
    let api_key = if params.dry_run {
        None
    } else {
        Some(ApiKey::from_env()?)
    };

    let doc = LocaleDocument::load(&params.locale_path)
        .with_context(|| format!("failed to load {}", params.locale_path.display()))?;

    let opts = SynthesisOpts {
        delay: Duration::from_millis(params.delay_ms),
        ..SynthesisOpts::new(&params.out_dir)
    }
    .with_only(&params.only);
    let table = DialogueTable::builtin();

    let report = match api_key {
        None => plan_synthesis(&doc, &table, &opts),
        Some(api_key) => {
            let client = ElevenLabsClient::new(api_key)?;
            run_synthesis(&doc, &table, &client, &opts).with_context(|| {
                format!("synthesis batch aborted in {}", params.out_dir.display())
            })?
        }
    };

    print_summary(&report, params.dry_run);
    if params.print_urls {
        print!("{}", audio_url_lines(&report));
    }

    Ok(())
}

fn print_summary(report: &BatchReport, dry_run: bool) {
    println!();
    if dry_run {
        println!("Would generate {} audio files", report.planned());
    } else {
        println!("Generated {} audio files", report.generated());
        println!("Failed: {}", report.failed());
    }
    println!("Skipped: {}", report.skipped());
}

/// `audioUrl` lines ready to paste into sceneData.ts, one per mapped entry.
fn audio_url_lines(report: &BatchReport) -> String {
    let mut out = String::new();

    for entry in &report.entries {
        let (Some(speaker), Some(url)) = (entry.speaker, entry.audio_url()) else {
            continue;
        };
        out.push_str(&format!(
            "// {}.{} ({})\naudioUrl: '{url}',\n",
            entry.act,
            entry.id,
            speaker.display_name()
        ));
    }

    out
}
