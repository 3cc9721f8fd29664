use std::fmt;
use std::path::{Path, PathBuf};

use crate::dialogue::{DialogueRecord, Speaker};

/// Quest slug used as the filename prefix for every asset.
pub const QUEST_ID: &str = "da-vinci-trees";

/// Locale suffix for generated assets.
pub const LOCALE: &str = "en";

/// Public path the quest engine serves audio assets from.
pub const AUDIO_URL_PREFIX: &str = "/assets/audio";

/// Deterministic name of one dialogue audio asset.
///
/// Renders as `<quest>_<act>_<id>_<speaker code>_<locale>.mp3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetName<'a> {
    pub quest: &'a str,
    pub act: &'a str,
    pub id: &'a str,
    pub speaker: Speaker,
    pub locale: &'a str,
}

impl<'a> AssetName<'a> {
    /// Asset name for a dialogue line in the quest's default locale.
    pub fn new(act: &'a str, id: &'a str, speaker: Speaker) -> Self {
        Self {
            quest: QUEST_ID,
            act,
            id,
            speaker,
            locale: LOCALE,
        }
    }

    pub fn for_record(record: &'a DialogueRecord) -> Self {
        Self::new(record.act, record.id, record.speaker)
    }

    pub fn file_name(&self) -> String {
        self.to_string()
    }

    /// URL the scene data should reference (`/assets/audio/<file>`).
    pub fn url(&self) -> String {
        format!("{AUDIO_URL_PREFIX}/{self}")
    }

    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

impl fmt::Display for AssetName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}_{}.mp3",
            self.quest,
            self.act,
            self.id,
            self.speaker.code(),
            self.locale
        )
    }
}
