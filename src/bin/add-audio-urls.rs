// Adds `audioUrl` fields to the Da Vinci Trees scene data, one after each dialogue marker
// that has an entry in the dialogue table.
//
// Not idempotent: run it against a scene file that has no audio urls yet.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use quest_audio::dialogue::DialogueTable;
use quest_audio::injector::inject_file;
use quest_audio::logging;
use quest_audio::opts::{DEFAULT_SCENE_PATH, InjectOpts};

#[derive(Parser, Debug)]
#[command(name = "add-audio-urls")]
#[command(about = "Add audioUrl fields to the Da Vinci Trees sceneData.ts", long_about = None)]
struct Params {
    /// Scene data file to rewrite in place.
    #[arg(long = "scene", default_value = DEFAULT_SCENE_PATH)]
    scene_path: PathBuf,

    /// Report how many references would be inserted without writing.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

fn main() -> Result<()> {
    logging::init();
    let params = Params::parse();

    let opts = InjectOpts {
        dry_run: params.dry_run,
    };
    let injection = inject_file(&params.scene_path, &DialogueTable::builtin(), &opts)
        .with_context(|| format!("failed to update {}", params.scene_path.display()))?;

    if !injection.changed() {
        println!(
            "{} already has every audio url",
            params.scene_path.display()
        );
    } else if opts.dry_run {
        println!(
            "would add {} audio urls to {}",
            injection.inserted,
            params.scene_path.display()
        );
    } else {
        println!(
            "✅ updated {} with {} audio urls",
            params.scene_path.display(),
            injection.inserted
        );
    }

    if !injection.skipped.is_empty() {
        println!("    no audio for: {}", injection.skipped.join(", "));
    }

    Ok(())
}
