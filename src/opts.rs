use std::path::PathBuf;
use std::time::Duration;

/// Scene data file the quest engine loads, relative to the quests-app root.
pub const DEFAULT_SCENE_PATH: &str = "src/GAME_DATA/da-vinci-trees/sceneData.ts";

/// English locale file with the dialogue text.
pub const DEFAULT_LOCALE_PATH: &str = "src/GAME_DATA/da-vinci-trees/locales/en.json";

/// Where generated audio assets live.
pub const DEFAULT_AUDIO_DIR: &str = "src/GAME_DATA/da-vinci-trees/assets/audio";

/// Default pause before each synthesis request.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Options for a synthesis batch.
///
/// This is library-level configuration. The `generate-audio` binary maps its flags into this
/// type; tests build it directly.
#[derive(Debug, Clone)]
pub struct SynthesisOpts {
    /// Directory audio assets are written to (created if missing).
    pub output_dir: PathBuf,

    /// Pause before each request to stay under the service's rate limit.
    ///
    /// `Duration::ZERO` disables pacing entirely.
    pub delay: Duration,

    /// Restrict the batch to these dialogue keys. `None` processes every entry.
    ///
    /// Entries outside the selection are not reported at all.
    pub only: Option<Vec<String>>,
}

impl SynthesisOpts {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            delay: DEFAULT_DELAY,
            only: None,
        }
    }

    /// Parse a selection of dialogue keys (`d12, d37`).
    ///
    /// Keys are trimmed and blanks dropped; an empty selection means "everything".
    pub fn with_only<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<String> = keys
            .into_iter()
            .map(|k| k.as_ref().trim().to_owned())
            .filter(|k| !k.is_empty())
            .collect();
        self.only = (!keys.is_empty()).then_some(keys);
        self
    }

    /// Whether a dialogue key falls inside the selection.
    pub fn selects(&self, id: &str) -> bool {
        self.only
            .as_ref()
            .is_none_or(|keys| keys.iter().any(|k| k == id))
    }
}

impl Default for SynthesisOpts {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIO_DIR)
    }
}

/// Options for [`crate::injector::inject_file`].
#[derive(Debug, Clone, Default)]
pub struct InjectOpts {
    /// Report what would change without touching the file.
    pub dry_run: bool,
}
