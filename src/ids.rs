//! Object identifier layout.
//!
//! Identifiers are assigned from fixed bands so that the same inputs always
//! yield the same pool. Per-section attributes each own a band of
//! [MAX_SECTIONS] identifiers: section `i` is `SECTION_BASE + i`, its X offset
//! `SECTION_X_OFFSET_BASE + i`, and so on. The first boom uses the fixed
//! boom identifiers; every further boom gets a block of [BOOM_BLOCK_LEN]
//! identifiers starting at [ADDITIONAL_BOOM_BASE].

use crate::condensed::SECTIONS_PER_GROUP;

/// Sections addressable across all booms of one device.
pub const MAX_SECTIONS: usize = 256;
/// Condensed groups needed to cover [MAX_SECTIONS].
pub const MAX_CONDENSED_GROUPS: usize = MAX_SECTIONS / SECTIONS_PER_GROUP;
/// Booms addressable by one device.
pub const MAX_BOOMS: usize = 64;

/// Reserved "no object" reference.
pub const NULL_OBJECT_ID: u16 = 0xFFFF;

pub const DEVICE: u16 = 0;
pub const MAIN_DEVICE_ELEMENT: u16 = 1;
pub const DEVICE_ACTUAL_WORK_STATE: u16 = 2;
pub const REQUEST_DEFAULT_PROCESS_DATA: u16 = 3;
pub const DEVICE_TOTAL_TIME: u16 = 4;
pub const CONNECTOR: u16 = 5;
pub const CONNECTOR_X_OFFSET: u16 = 6;
pub const CONNECTOR_Y_OFFSET: u16 = 7;
pub const CONNECTOR_TYPE: u16 = 8;
pub const MAIN_BOOM: u16 = 9;
// 10 is reserved for a boom level actual work state.
pub const ACTUAL_WORKING_WIDTH: u16 = 11;
pub const AREA_TOTAL: u16 = 12;
pub const SETPOINT_WORK_STATE: u16 = 13;
pub const SECTION_CONTROL_STATE: u16 = 14;
pub const BOOM_X_OFFSET: u16 = 15;
pub const BOOM_Y_OFFSET: u16 = 16;
pub const BOOM_Z_OFFSET: u16 = 17;

pub const SECTION_BASE: u16 = 18;
pub const SECTION_X_OFFSET_BASE: u16 = SECTION_BASE + MAX_SECTIONS as u16;
pub const SECTION_Y_OFFSET_BASE: u16 = SECTION_X_OFFSET_BASE + MAX_SECTIONS as u16;
pub const SECTION_WIDTH_BASE: u16 = SECTION_Y_OFFSET_BASE + MAX_SECTIONS as u16;
pub const ACTUAL_CONDENSED_WORK_STATE_BASE: u16 = SECTION_WIDTH_BASE + MAX_SECTIONS as u16;
pub const SETPOINT_CONDENSED_WORK_STATE_BASE: u16 =
    ACTUAL_CONDENSED_WORK_STATE_BASE + MAX_CONDENSED_GROUPS as u16;

pub const PRODUCT: u16 = SETPOINT_CONDENSED_WORK_STATE_BASE + MAX_CONDENSED_GROUPS as u16;
pub const BIN_CAPACITY: u16 = PRODUCT + 1;
pub const BIN_LEVEL: u16 = PRODUCT + 2;
pub const LIFETIME_APPLICATION_COUNT_TOTAL: u16 = PRODUCT + 3;
pub const PRESCRIPTION_CONTROL_STATE: u16 = PRODUCT + 4;
pub const ACTUAL_CULTURAL_PRACTICE: u16 = PRODUCT + 5;
pub const TARGET_RATE: u16 = PRODUCT + 6;
pub const ACTUAL_RATE: u16 = PRODUCT + 7;

pub const AREA_PRESENTATION: u16 = PRODUCT + 8;
pub const TIME_PRESENTATION: u16 = PRODUCT + 9;
pub const SHORT_WIDTH_PRESENTATION: u16 = PRODUCT + 10;
pub const LONG_WIDTH_PRESENTATION: u16 = PRODUCT + 11;
pub const COUNT_PRESENTATION: u16 = PRODUCT + 12;
pub const COUNT_PER_AREA_PRESENTATION: u16 = PRODUCT + 13;

/// First identifier of the block belonging to the second boom.
pub const ADDITIONAL_BOOM_BASE: u16 = COUNT_PER_AREA_PRESENTATION + 1;
/// Identifiers reserved per additional boom.
pub const BOOM_BLOCK_LEN: u16 = 8 + 2 * MAX_CONDENSED_GROUPS as u16;

pub fn section(index: usize) -> u16 {
    band(SECTION_BASE, index, MAX_SECTIONS)
}

pub fn section_x_offset(index: usize) -> u16 {
    band(SECTION_X_OFFSET_BASE, index, MAX_SECTIONS)
}

pub fn section_y_offset(index: usize) -> u16 {
    band(SECTION_Y_OFFSET_BASE, index, MAX_SECTIONS)
}

pub fn section_width(index: usize) -> u16 {
    band(SECTION_WIDTH_BASE, index, MAX_SECTIONS)
}

fn band(base: u16, index: usize, len: usize) -> u16 {
    debug_assert!(index < len, "index {index} outside band of {len}");
    base + index as u16
}

/// Identifiers of the objects owned by one boom element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoomIds {
    pub element: u16,
    pub x_offset: u16,
    pub y_offset: u16,
    pub z_offset: u16,
    pub working_width: u16,
    pub area_total: u16,
    pub setpoint_work_state: u16,
    pub section_control_state: u16,
    actual_condensed_base: u16,
    setpoint_condensed_base: u16,
}

impl BoomIds {
    /// Identifiers for the boom at position `boom_index` in the builder input.
    pub fn for_boom(boom_index: usize) -> Self {
        if boom_index == 0 {
            return BoomIds {
                element: MAIN_BOOM,
                x_offset: BOOM_X_OFFSET,
                y_offset: BOOM_Y_OFFSET,
                z_offset: BOOM_Z_OFFSET,
                working_width: ACTUAL_WORKING_WIDTH,
                area_total: AREA_TOTAL,
                setpoint_work_state: SETPOINT_WORK_STATE,
                section_control_state: SECTION_CONTROL_STATE,
                actual_condensed_base: ACTUAL_CONDENSED_WORK_STATE_BASE,
                setpoint_condensed_base: SETPOINT_CONDENSED_WORK_STATE_BASE,
            };
        }

        debug_assert!(boom_index < MAX_BOOMS, "boom index {boom_index} out of range");
        let base = ADDITIONAL_BOOM_BASE + (boom_index as u16 - 1) * BOOM_BLOCK_LEN;
        BoomIds {
            element: base,
            x_offset: base + 1,
            y_offset: base + 2,
            z_offset: base + 3,
            working_width: base + 4,
            area_total: base + 5,
            setpoint_work_state: base + 6,
            section_control_state: base + 7,
            actual_condensed_base: base + 8,
            setpoint_condensed_base: base + 8 + MAX_CONDENSED_GROUPS as u16,
        }
    }

    pub fn actual_condensed(&self, group_index: usize) -> u16 {
        band(self.actual_condensed_base, group_index, MAX_CONDENSED_GROUPS)
    }

    pub fn setpoint_condensed(&self, group_index: usize) -> u16 {
        band(self.setpoint_condensed_base, group_index, MAX_CONDENSED_GROUPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_layout() {
        assert_eq!(SECTION_BASE, 18);
        assert_eq!(section(255), 273);
        assert_eq!(section_x_offset(0), 274);
        assert_eq!(section_y_offset(0), 530);
        assert_eq!(section_width(0), 786);
        assert_eq!(ACTUAL_CONDENSED_WORK_STATE_BASE, 1042);
        assert_eq!(SETPOINT_CONDENSED_WORK_STATE_BASE, 1058);
        assert_eq!(PRODUCT, 1074);
        assert_eq!(COUNT_PER_AREA_PRESENTATION, 1087);
    }

    #[test]
    fn test_section_bands_do_not_overlap() {
        assert!(section(MAX_SECTIONS - 1) < section_x_offset(0));
        assert!(section_x_offset(MAX_SECTIONS - 1) < section_y_offset(0));
        assert!(section_y_offset(MAX_SECTIONS - 1) < section_width(0));
        assert!(section_width(MAX_SECTIONS - 1) < ACTUAL_CONDENSED_WORK_STATE_BASE);
    }

    #[test]
    fn test_first_boom_uses_fixed_ids() {
        let ids = BoomIds::for_boom(0);
        assert_eq!(ids.element, MAIN_BOOM);
        assert_eq!(ids.actual_condensed(1), ACTUAL_CONDENSED_WORK_STATE_BASE + 1);
        assert_eq!(ids.setpoint_condensed(15), PRODUCT - 1);
    }

    #[test]
    fn test_additional_boom_blocks_are_disjoint() {
        let second = BoomIds::for_boom(1);
        let third = BoomIds::for_boom(2);

        assert_eq!(second.element, ADDITIONAL_BOOM_BASE);
        assert_eq!(second.setpoint_condensed(MAX_CONDENSED_GROUPS - 1) + 1, third.element);
    }

    #[test]
    fn test_last_boom_block_fits_below_null_id() {
        let last = BoomIds::for_boom(MAX_BOOMS - 1);
        assert!(last.setpoint_condensed(MAX_CONDENSED_GROUPS - 1) < NULL_OBJECT_ID);
    }
}
