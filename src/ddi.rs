//! Data description indices (ISO 11783-11) used by the pool and the dispatcher.
//!
//! Values are opaque to this crate: they are only branched on and written into
//! process data objects, never derived.

pub const SETPOINT_VOLUME_PER_AREA_APPLICATION_RATE: u16 = 1;
pub const ACTUAL_VOLUME_PER_AREA_APPLICATION_RATE: u16 = 2;
pub const ACTUAL_WORKING_WIDTH: u16 = 67;
pub const MAXIMUM_COUNT_CONTENT: u16 = 73;
pub const ACTUAL_COUNT_CONTENT: u16 = 76;
pub const TOTAL_AREA: u16 = 116;
pub const EFFECTIVE_TOTAL_TIME: u16 = 119;
pub const DEVICE_ELEMENT_OFFSET_X: u16 = 134;
pub const DEVICE_ELEMENT_OFFSET_Y: u16 = 135;
pub const DEVICE_ELEMENT_OFFSET_Z: u16 = 136;
pub const ACTUAL_WORK_STATE: u16 = 141;
pub const CONNECTOR_TYPE: u16 = 157;
pub const PRESCRIPTION_CONTROL_STATE: u16 = 158;
pub const SECTION_CONTROL_STATE: u16 = 160;
/// First of 16 consecutive "actual condensed work state" DDIs (sections 1-16).
pub const ACTUAL_CONDENSED_WORK_STATE_1_16: u16 = 161;
pub const ACTUAL_CULTURAL_PRACTICE: u16 = 179;
pub const SETPOINT_WORK_STATE: u16 = 289;
/// First of 16 consecutive "setpoint condensed work state" DDIs (sections 1-16).
pub const SETPOINT_CONDENSED_WORK_STATE_1_16: u16 = 290;
pub const LIFETIME_APPLICATION_TOTAL_COUNT: u16 = 326;
pub const REQUEST_DEFAULT_PROCESS_DATA: u16 = 57343;

/// Number of DDIs in each condensed work state family.
pub const CONDENSED_FAMILY_LEN: u16 = 16;

/// Returns the group index if `ddi` is one of the actual condensed work state DDIs.
pub fn actual_condensed_group(ddi: u16) -> Option<usize> {
    family_offset(ddi, ACTUAL_CONDENSED_WORK_STATE_1_16)
}

/// Returns the group index if `ddi` is one of the setpoint condensed work state DDIs.
pub fn setpoint_condensed_group(ddi: u16) -> Option<usize> {
    family_offset(ddi, SETPOINT_CONDENSED_WORK_STATE_1_16)
}

/// Whether a fixed dispatcher handler serves `ddi`, leaving it unusable for a rate.
pub fn is_reserved(ddi: u16) -> bool {
    matches!(
        ddi,
        MAXIMUM_COUNT_CONTENT
            | ACTUAL_COUNT_CONTENT
            | ACTUAL_WORKING_WIDTH
            | DEVICE_ELEMENT_OFFSET_X
            | DEVICE_ELEMENT_OFFSET_Y
            | ACTUAL_WORK_STATE
            | PRESCRIPTION_CONTROL_STATE
            | SECTION_CONTROL_STATE
            | SETPOINT_WORK_STATE
            | REQUEST_DEFAULT_PROCESS_DATA
    ) || actual_condensed_group(ddi).is_some()
        || setpoint_condensed_group(ddi).is_some()
}

/// Setpoint and actual rate DDIs starting at `setpoint`, if both are free.
pub fn rate_pair(setpoint: u16) -> Option<(u16, u16)> {
    let actual = setpoint.checked_add(1)?;
    (!is_reserved(setpoint) && !is_reserved(actual)).then_some((setpoint, actual))
}

fn family_offset(ddi: u16, base: u16) -> Option<usize> {
    let offset = ddi.checked_sub(base)?;
    (offset < CONDENSED_FAMILY_LEN).then_some(offset as usize)
}
