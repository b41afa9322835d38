//! Active skill loadout from the equipment slots.

use serde_json::Value;
use smallvec::SmallVec;

use crate::constants::{EMPTY_SLOT_SENTINEL, MAX_SKILL_SLOTS};
use crate::policy::LoadoutPolicy;

pub const EQUIPPED_SKILLS: &str = "equippedSkills";
pub const SKILL_ID: &str = "skillId";

/// Ordered equipped-skill identifiers, at most [`MAX_SKILL_SLOTS`] of them.
pub type SkillIds = SmallVec<[u32; MAX_SKILL_SLOTS]>;

/// Resolve the equipped skill ids from the document's slot sequence.
///
/// A slot holding the `-1` sentinel is empty. Empty and malformed slots are
/// skipped, equipped ids keep their slot order, and the result is truncated
/// to five. Under [`LoadoutPolicy::ZeroPad`] the result is then padded with
/// `0` to a fixed width of five. An absent or malformed slot array resolves
/// to an empty (or all-zero) loadout rather than failing: a record without a
/// loadout is still a valid death.
#[must_use]
pub fn resolve_loadout(doc: &Value, policy: LoadoutPolicy) -> SkillIds {
    let mut ids = SkillIds::new();
    if let Some(slots) = doc.get(EQUIPPED_SKILLS).and_then(Value::as_array) {
        for slot in slots {
            if ids.len() == MAX_SKILL_SLOTS {
                break;
            }
            let Some(raw) = slot.get(SKILL_ID).and_then(Value::as_i64) else {
                continue;
            };
            if raw == EMPTY_SLOT_SENTINEL {
                continue;
            }
            // Any other negative id is malformed and fails the conversion.
            if let Ok(id) = u32::try_from(raw) {
                ids.push(id);
            }
        }
    }
    if policy == LoadoutPolicy::ZeroPad {
        while ids.len() < MAX_SKILL_SLOTS {
            ids.push(0);
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_with_slots(slots: Value) -> Value {
        json!({ "equippedSkills": slots })
    }

    #[test]
    fn drops_sentinel_and_preserves_order() {
        let doc = doc_with_slots(json!([
            { "skillId": 5 },
            { "skillId": -1 },
            { "skillId": 7 },
        ]));
        let ids = resolve_loadout(&doc, LoadoutPolicy::DropEmpty);
        assert_eq!(ids.as_slice(), &[5, 7]);
    }

    #[test]
    fn zero_pad_variant_pads_to_fixed_width() {
        let doc = doc_with_slots(json!([
            { "skillId": 5 },
            { "skillId": -1 },
            { "skillId": 7 },
        ]));
        let ids = resolve_loadout(&doc, LoadoutPolicy::ZeroPad);
        assert_eq!(ids.as_slice(), &[5, 7, 0, 0, 0]);
    }

    #[test]
    fn truncates_to_five_slots() {
        let doc = doc_with_slots(json!([
            { "skillId": 1 }, { "skillId": 2 }, { "skillId": 3 },
            { "skillId": 4 }, { "skillId": 5 }, { "skillId": 6 },
        ]));
        let ids = resolve_loadout(&doc, LoadoutPolicy::DropEmpty);
        assert_eq!(ids.as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn missing_or_malformed_slots_resolve_empty() {
        assert!(resolve_loadout(&json!({}), LoadoutPolicy::DropEmpty).is_empty());
        let doc = doc_with_slots(json!("not an array"));
        assert!(resolve_loadout(&doc, LoadoutPolicy::DropEmpty).is_empty());
        let doc = doc_with_slots(json!([{ "skillId": "9" }, {}]));
        assert!(resolve_loadout(&doc, LoadoutPolicy::DropEmpty).is_empty());
        let doc = doc_with_slots(json!([]));
        let padded = resolve_loadout(&doc, LoadoutPolicy::ZeroPad);
        assert_eq!(padded.as_slice(), &[0, 0, 0, 0, 0]);
    }
}
