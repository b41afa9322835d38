//! Shared pipeline constants.

/// Maximum number of equipped-skill slots carried into a record.
pub const MAX_SKILL_SLOTS: usize = 5;

/// Sentinel skill id marking an empty equipment slot in the save file.
pub const EMPTY_SLOT_SENTINEL: i64 = -1;

/// Default level cap enforced by the post-extraction rules.
pub const DEFAULT_LEVEL_CAP: u32 = 100;

/// Maximum display-name length the record store accepts.
pub const MAX_DISPLAY_NAME_LEN: usize = 32;
