//! Section control state shared between the operator side and the task controller.

use crate::{
    errors::InitError,
    ids::MAX_SECTIONS,
    pool::ObjectPool,
};

/// Working width reported when nothing else is configured, in millimeters.
pub const DEFAULT_WORKING_WIDTH_MM: i32 = 15000;

/// Per-section switch and setpoint states plus the device level control flags.
///
/// The two per-section collections are sized once by [SectionControlState::new]
/// and never resized. Out-of-range indices read as off and writes to them are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionControlState {
    switch_states: Vec<bool>,
    setpoint_states: Vec<bool>,
    auto_mode: bool,
    target_rate: i32,
    setpoint_work_state: bool,
    working_width_mm: i32,
}

impl SectionControlState {
    /// Creates a state for `number_of_sections` sections, all off, manual mode.
    pub fn new(number_of_sections: usize) -> Result<Self, InitError> {
        if number_of_sections == 0 {
            return Err(InitError::NoSections);
        }
        if number_of_sections > MAX_SECTIONS {
            return Err(InitError::TooManySections(number_of_sections));
        }

        Ok(Self {
            switch_states: vec![false; number_of_sections],
            setpoint_states: vec![false; number_of_sections],
            auto_mode: false,
            target_rate: 0,
            setpoint_work_state: false,
            working_width_mm: DEFAULT_WORKING_WIDTH_MM,
        })
    }

    /// Sizes the state from the section elements found in `pool`.
    pub fn from_pool(pool: &ObjectPool) -> Result<Self, InitError> {
        Self::new(pool.section_count())
    }

    pub fn with_working_width(mut self, working_width_mm: i32) -> Self {
        self.working_width_mm = working_width_mm;
        self
    }

    pub fn number_of_sections(&self) -> usize {
        self.switch_states.len()
    }

    /// State the section is actually in: the setpoint in auto mode, the manual switch otherwise.
    pub fn section_actual_state(&self, index: usize) -> bool {
        if self.auto_mode {
            self.section_setpoint_state(index)
        } else {
            self.section_switch_state(index)
        }
    }

    pub fn section_setpoint_state(&self, index: usize) -> bool {
        self.setpoint_states.get(index).copied().unwrap_or(false)
    }

    pub fn section_switch_state(&self, index: usize) -> bool {
        self.switch_states.get(index).copied().unwrap_or(false)
    }

    pub fn set_section_switch_state(&mut self, index: usize, on: bool) {
        if let Some(state) = self.switch_states.get_mut(index) {
            *state = on;
        }
    }

    pub fn set_section_setpoint_state(&mut self, index: usize, on: bool) {
        if let Some(state) = self.setpoint_states.get_mut(index) {
            *state = on;
        }
    }

    /// Setpoint states, for decoding condensed setpoint commands in place.
    pub(crate) fn setpoint_states_mut(&mut self) -> &mut [bool] {
        &mut self.setpoint_states
    }

    pub fn actual_sections_on(&self) -> usize {
        (0..self.number_of_sections())
            .filter(|&index| self.section_actual_state(index))
            .count()
    }

    pub fn any_section_on(&self) -> bool {
        (0..self.number_of_sections()).any(|index| self.section_actual_state(index))
    }

    /// The target rate while any section is on, zero otherwise.
    pub fn actual_rate(&self) -> i32 {
        if self.any_section_on() { self.target_rate } else { 0 }
    }

    pub fn target_rate(&self) -> i32 {
        self.target_rate
    }

    pub fn set_target_rate(&mut self, rate: i32) {
        self.target_rate = rate;
    }

    pub fn setpoint_work_state(&self) -> bool {
        self.setpoint_work_state
    }

    pub fn set_setpoint_work_state(&mut self, on: bool) {
        self.setpoint_work_state = on;
    }

    pub fn is_auto_mode(&self) -> bool {
        self.auto_mode
    }

    pub fn set_auto_mode(&mut self, auto_mode: bool) {
        self.auto_mode = auto_mode;
    }

    /// Section control state as reported on the bus (1 in auto mode).
    pub fn section_control_state(&self) -> i32 {
        self.auto_mode as i32
    }

    /// Prescription control state; follows the same auto mode flag.
    pub fn prescription_control_state(&self) -> i32 {
        self.auto_mode as i32
    }

    pub fn working_width_mm(&self) -> i32 {
        self.working_width_mm
    }
}
