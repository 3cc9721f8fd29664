//! The static dialogue table for the Da Vinci Trees quest.
//!
//! Every spoken line in the quest is identified by a short key (`d12`). The table below records
//! which act the line belongs to and which of the two characters speaks it. Both pipeline jobs
//! key off this table: a line that isn't listed here never gets an audio reference or an asset.

/// One of the two speaking characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    /// Maya, the student (`C1`).
    Maya,
    /// Dr. Reyes, the mentor (`C2`).
    Reyes,
}

impl Speaker {
    /// The character code used in asset filenames.
    pub fn code(self) -> &'static str {
        match self {
            Speaker::Maya => "C1",
            Speaker::Reyes => "C2",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Speaker::Maya => "Maya",
            Speaker::Reyes => "Dr. Reyes",
        }
    }
}

/// A single row of the dialogue table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueRecord {
    /// Dialogue key as it appears in the locale file and scene markers (e.g. `"d12"`).
    pub id: &'static str,

    /// Act label (e.g. `"act1"`).
    pub act: &'static str,

    pub speaker: Speaker,
}

const fn maya(id: &'static str, act: &'static str) -> DialogueRecord {
    DialogueRecord {
        id,
        act,
        speaker: Speaker::Maya,
    }
}

const fn reyes(id: &'static str, act: &'static str) -> DialogueRecord {
    DialogueRecord {
        id,
        act,
        speaker: Speaker::Reyes,
    }
}

// -----------------------------------------------------------------------------
// Dialogue table
//
// Gaps in the numbering (d36, d42, d49, ...) are lines that were cut or moved to
// interactive sections; they intentionally have no audio.
// -----------------------------------------------------------------------------
pub static DIALOGUES: &[DialogueRecord] = &[
    // act1
    maya("d1", "act1"),
    reyes("d2", "act1"),
    maya("d3", "act1"),
    reyes("d4", "act1"),
    maya("d5", "act1"),
    reyes("d6", "act1"),
    maya("d7", "act1"),
    reyes("d8", "act1"),
    maya("d9", "act1"),
    maya("d10", "act1"),
    maya("d11", "act1"),
    reyes("d12", "act1"),
    maya("d13", "act1"),
    reyes("d14", "act1"),
    maya("d15", "act1"),
    reyes("d16", "act1"),
    maya("d17", "act1"),
    reyes("d18", "act1"),
    // act2
    maya("d19", "act2"),
    reyes("d20", "act2"),
    reyes("d21", "act2"),
    maya("d22", "act2"),
    reyes("d23", "act2"),
    maya("d24", "act2"),
    reyes("d25", "act2"),
    maya("d26", "act2"),
    reyes("d27", "act2"),
    reyes("d28", "act2"),
    maya("d29", "act2"),
    reyes("d30", "act2"),
    maya("d31", "act2"),
    reyes("d32", "act2"),
    reyes("d33", "act2"),
    maya("d34", "act2"),
    reyes("d35", "act2"),
    reyes("d37", "act2"),
    maya("d38", "act2"),
    maya("d39", "act2"),
    reyes("d40", "act2"),
    maya("d41", "act2"),
    // act3
    reyes("d43", "act3"),
    maya("d44", "act3"),
    maya("d45", "act3"),
    reyes("d46", "act3"),
    maya("d47", "act3"),
    maya("d48", "act3"),
    reyes("d50", "act3"),
    maya("d51", "act3"),
    reyes("d52", "act3"),
    // act4
    maya("d54", "act4"),
    reyes("d55", "act4"),
    reyes("d56", "act4"),
    maya("d57", "act4"),
    reyes("d58", "act4"),
    maya("d59", "act4"),
    reyes("d60", "act4"),
    // act5
    maya("d64", "act5"),
    reyes("d65", "act5"),
    maya("d67", "act5"),
    reyes("d68", "act5"),
    maya("d69", "act5"),
    maya("d70", "act5"),
    reyes("d71", "act5"),
    reyes("d72", "act5"),
    reyes("d74", "act5"),
    maya("d76", "act5"),
    reyes("d77", "act5"),
    // act6
    maya("d78", "act6"),
    reyes("d79", "act6"),
    maya("d82", "act6"),
    // act7
    maya("d83", "act7"),
    reyes("d84", "act7"),
    maya("d86", "act7"),
    reyes("d87", "act7"),
    maya("d88", "act7"),
    reyes("d89", "act7"),
    maya("d90", "act7"),
];

/// Read-only view over a dialogue table.
///
/// The pipeline jobs take one of these rather than reaching for [`DIALOGUES`] directly, so tests
/// can drive them with a small hand-written table.
#[derive(Debug, Clone, Copy)]
pub struct DialogueTable<'a> {
    records: &'a [DialogueRecord],
}

impl DialogueTable<'static> {
    /// The quest's built-in table.
    pub fn builtin() -> Self {
        Self::new(DIALOGUES)
    }
}

impl<'a> DialogueTable<'a> {
    pub fn new(records: &'a [DialogueRecord]) -> Self {
        Self { records }
    }

    pub fn get(&self, id: &str) -> Option<&'a DialogueRecord> {
        self.records.iter().find(|d| d.id == id)
    }

    pub fn speaker(&self, id: &str) -> Option<Speaker> {
        self.get(id).map(|d| d.speaker)
    }
}

impl Default for DialogueTable<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_table_finds_act_and_speaker() {
        let table = DialogueTable::builtin();
        let d12 = table.get("d12").expect("expected d12 in table");
        assert_eq!(d12.act, "act1");
        assert_eq!(d12.speaker, Speaker::Reyes);
        assert_eq!(d12.speaker.code(), "C2");

        let d90 = table.get("d90").expect("expected d90 in table");
        assert_eq!(d90.act, "act7");
        assert_eq!(d90.speaker, Speaker::Maya);

        assert!(table.get("d36").is_none());
        assert!(table.get("d999").is_none());
    }

    #[test]
    fn dialogue_ids_are_unique() {
        let mut seen = HashSet::new();
        for d in DIALOGUES {
            assert!(seen.insert(d.id), "duplicate dialogue id {}", d.id);
        }
        assert_eq!(DIALOGUES.len(), 77);
    }

    #[test]
    fn every_act_is_well_formed() {
        for d in DIALOGUES {
            assert!(d.act.starts_with("act"), "bad act {}", d.act);
            assert!(d.id.starts_with('d'), "bad id {}", d.id);
            assert!(d.id[1..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn custom_table_only_sees_its_own_records() {
        let records = [maya("d1", "act9")];
        let table = DialogueTable::new(&records);
        assert_eq!(table.get("d1").map(|d| d.act), Some("act9"));
        assert_eq!(table.speaker("d1"), Some(Speaker::Maya));
        assert!(table.get("d2").is_none());
        assert!(DialogueTable::builtin().get("d2").is_some());
    }
}
