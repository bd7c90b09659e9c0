//! Condensed work state codec.
//!
//! One 32-bit value carries the state of up to 16 sections, two bits per
//! section, section `group * 16 + i` at bit offset `2 * i` (LSB first):
//!
//! | bits | meaning                      |
//! |------|------------------------------|
//! | `00` | off                          |
//! | `01` | on                           |
//! | `10` | error (read as off)          |
//! | `11` | not installed / no such slot |

/// Sections packed into one condensed value.
pub const SECTIONS_PER_GROUP: usize = 16;

const STATE_MASK: u32 = 0b11;
const STATE_ON: u32 = 0b01;
const STATE_NOT_INSTALLED: u32 = 0b11;

/// Number of condensed groups needed to cover `total_sections`.
pub fn group_count(total_sections: usize) -> usize {
    total_sections.div_ceil(SECTIONS_PER_GROUP)
}

/// Packs the states of group `group_index` into a condensed value.
///
/// Slots at or past `total_sections` are written as not installed. Slots below
/// `total_sections` that `states` does not cover read as off.
pub fn encode(states: &[bool], total_sections: usize, group_index: usize) -> u32 {
    encode_with(total_sections, group_index, |section| {
        states.get(section).copied().unwrap_or(false)
    })
}

/// Like [encode], reading each section's state through `state_of`.
pub fn encode_with(
    total_sections: usize,
    group_index: usize,
    mut state_of: impl FnMut(usize) -> bool,
) -> u32 {
    let first = group_index * SECTIONS_PER_GROUP;
    let mut value = 0u32;

    for slot in 0..SECTIONS_PER_GROUP {
        let section = first + slot;
        let bits = if section < total_sections {
            if state_of(section) { STATE_ON } else { 0 }
        } else {
            STATE_NOT_INSTALLED
        };

        value |= bits << (2 * slot);
    }

    value
}

/// Unpacks a condensed value into `states` for group `group_index`.
///
/// Only `01` reads as on. Writing stops at the first slot at or past
/// `total_sections` (or past the end of `states`).
pub fn decode(value: u32, group_index: usize, total_sections: usize, states: &mut [bool]) {
    let first = group_index * SECTIONS_PER_GROUP;
    let limit = total_sections.min(states.len());

    for slot in 0..SECTIONS_PER_GROUP {
        let section = first + slot;
        if section >= limit {
            break;
        }

        states[section] = slot_state(value, slot) == STATE_ON;
    }
}

fn slot_state(value: u32, slot: usize) -> u32 {
    (value >> (2 * slot)) & STATE_MASK
}
