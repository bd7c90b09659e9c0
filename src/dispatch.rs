//! Process variable dispatch: answers value requests and applies value commands
//! from the task controller against a [SectionControlState].
//!
//! Each recognized DDI maps to a [Handler]. Condensed work state requests are
//! resolved against the sections of the boom whose element number they carry;
//! every other request is served from the one state of the device.

use std::{
    collections::BTreeMap,
    ops::Range,
    sync::{Arc, Mutex, PoisonError},
};

use tracing::{debug, trace, warn};

use crate::{
    condensed::{self, SECTIONS_PER_GROUP},
    ddi,
    errors::DispatchError,
    ids,
    object::{ElementType, Object},
    pool::ObjectPool,
    state::SectionControlState,
};

/// Reported bin capacity, in seeds.
pub const BIN_CAPACITY_COUNT: i32 = 200_000;
/// Reported bin level, in seeds.
pub const BIN_LEVEL_COUNT: i32 = 150_000;

/// What a recognized DDI reads from or writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Read only; always the same value.
    Constant(i32),
    /// Auto mode flag as 0/1; writable.
    SectionControlState,
    /// Auto mode flag as 0/1; writable.
    PrescriptionControlState,
    /// Condensed actual states of one group; read only.
    ActualCondensed(usize),
    /// Condensed setpoint states of one group; writable.
    SetpointCondensed(usize),
    ActualRate,
    /// Target rate; writable.
    SetpointRate,
    /// 1 while any section is on.
    ActualWorkState,
    WorkingWidth,
    /// Write only.
    SetpointWorkState,
}

impl Handler {
    pub fn is_readable(&self) -> bool {
        !matches!(self, Handler::SetpointWorkState)
    }

    pub fn is_writable(&self) -> bool {
        matches!(
            self,
            Handler::SectionControlState
                | Handler::PrescriptionControlState
                | Handler::SetpointCondensed(_)
                | Handler::SetpointRate
                | Handler::SetpointWorkState
        )
    }

    fn condensed_group(&self) -> Option<usize> {
        match *self {
            Handler::ActualCondensed(group) | Handler::SetpointCondensed(group) => Some(group),
            _ => None,
        }
    }

    /// `sections` is the range of state indices condensed values cover.
    fn read(&self, state: &SectionControlState, sections: Range<usize>) -> i32 {
        let first = sections.start;
        match *self {
            Handler::Constant(value) => value,
            Handler::SectionControlState => state.section_control_state(),
            Handler::PrescriptionControlState => state.prescription_control_state(),
            Handler::ActualCondensed(group) => {
                condensed::encode_with(sections.len(), group, |s| state.section_actual_state(first + s))
                    as i32
            }
            Handler::SetpointCondensed(group) => {
                condensed::encode_with(sections.len(), group, |s| {
                    state.section_setpoint_state(first + s)
                }) as i32
            }
            Handler::ActualRate => state.actual_rate(),
            Handler::SetpointRate => state.target_rate(),
            Handler::ActualWorkState => state.any_section_on() as i32,
            Handler::WorkingWidth => state.working_width_mm(),
            Handler::SetpointWorkState => 0,
        }
    }

    fn write(&self, state: &mut SectionControlState, sections: Range<usize>, value: i32) {
        match *self {
            Handler::SectionControlState | Handler::PrescriptionControlState => {
                state.set_auto_mode(value != 0)
            }
            Handler::SetpointCondensed(group) => {
                let total = sections.len();
                condensed::decode(value as u32, group, total, &mut state.setpoint_states_mut()[sections]);
            }
            Handler::SetpointRate => state.set_target_rate(value),
            Handler::SetpointWorkState => state.set_setpoint_work_state(value == 1),
            _ => {}
        }
    }
}

/// DDI to [Handler] table plus the policy for DDIs it does not know.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    handlers: BTreeMap<u16, Handler>,
    /// Boom element number to the state indices of its sections.
    booms: BTreeMap<u16, Range<usize>>,
    claim_unknown: bool,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Dispatcher for volume per area application rates.
    ///
    /// Condensed work state covers every section of the state regardless of
    /// element number. Pools built with another rate DDI or more than one boom
    /// want [Dispatcher::for_pool].
    pub fn new() -> Self {
        Self::with_rates(
            ddi::SETPOINT_VOLUME_PER_AREA_APPLICATION_RATE,
            ddi::ACTUAL_VOLUME_PER_AREA_APPLICATION_RATE,
        )
    }

    /// Dispatcher whose rate DDIs are `setpoint_rate_ddi` and the actual rate right after it.
    pub fn with_rate_ddi(setpoint_rate_ddi: u16) -> Result<Self, DispatchError> {
        let (setpoint, actual) = ddi::rate_pair(setpoint_rate_ddi)
            .ok_or(DispatchError::InvalidRateDdi(setpoint_rate_ddi))?;
        Ok(Self::with_rates(setpoint, actual))
    }

    /// Dispatcher matching a built pool: its rate DDIs and the sections of each boom.
    pub fn for_pool(pool: &ObjectPool) -> Result<Self, DispatchError> {
        let setpoint_rate_ddi = pool
            .get_by_id(ids::TARGET_RATE)
            .and_then(Object::as_process_data)
            .map_or(ddi::SETPOINT_VOLUME_PER_AREA_APPLICATION_RATE, |pd| pd.ddi);
        let mut dispatcher = Self::with_rate_ddi(setpoint_rate_ddi)?;

        let sections = pool
            .elements()
            .filter(|element| element.element_type == ElementType::Section);
        for (index, section) in sections.enumerate() {
            let Ok(boom) = pool.element(section.parent_id) else {
                continue;
            };
            dispatcher
                .booms
                .entry(boom.element_number)
                .and_modify(|range| range.end = index + 1)
                .or_insert(index..index + 1);
        }

        debug!(
            setpoint_rate_ddi,
            booms = dispatcher.booms.len(),
            "dispatcher configured from pool"
        );
        Ok(dispatcher)
    }

    fn with_rates(setpoint_rate_ddi: u16, actual_rate_ddi: u16) -> Self {
        let mut handlers = BTreeMap::from([
            (ddi::MAXIMUM_COUNT_CONTENT, Handler::Constant(BIN_CAPACITY_COUNT)),
            (ddi::ACTUAL_COUNT_CONTENT, Handler::Constant(BIN_LEVEL_COUNT)),
            (ddi::SECTION_CONTROL_STATE, Handler::SectionControlState),
            (ddi::PRESCRIPTION_CONTROL_STATE, Handler::PrescriptionControlState),
            (ddi::ACTUAL_WORK_STATE, Handler::ActualWorkState),
            (ddi::DEVICE_ELEMENT_OFFSET_X, Handler::Constant(0)),
            (ddi::DEVICE_ELEMENT_OFFSET_Y, Handler::Constant(0)),
            (ddi::REQUEST_DEFAULT_PROCESS_DATA, Handler::Constant(0)),
            (ddi::ACTUAL_WORKING_WIDTH, Handler::WorkingWidth),
            (ddi::SETPOINT_WORK_STATE, Handler::SetpointWorkState),
        ]);

        for group in 0..ddi::CONDENSED_FAMILY_LEN {
            handlers.insert(
                ddi::ACTUAL_CONDENSED_WORK_STATE_1_16 + group,
                Handler::ActualCondensed(group as usize),
            );
            handlers.insert(
                ddi::SETPOINT_CONDENSED_WORK_STATE_1_16 + group,
                Handler::SetpointCondensed(group as usize),
            );
        }

        handlers.insert(setpoint_rate_ddi, Handler::SetpointRate);
        handlers.insert(actual_rate_ddi, Handler::ActualRate);

        Self {
            handlers,
            booms: BTreeMap::new(),
            claim_unknown: true,
        }
    }

    /// Whether requests for unknown DDIs are answered (with 0) instead of declined.
    ///
    /// Claiming is right when this is the only handler registered with the
    /// task controller client; decline when other handlers follow.
    pub fn claim_unknown(mut self, claim_unknown: bool) -> Self {
        self.claim_unknown = claim_unknown;
        self
    }

    pub fn handler(&self, ddi: u16) -> Option<Handler> {
        self.handlers.get(&ddi).copied()
    }

    /// State indices covered by condensed values addressed to `element_number`.
    pub fn sections(&self, state: &SectionControlState, element_number: u16) -> Range<usize> {
        let total = state.number_of_sections();
        match self.booms.get(&element_number) {
            Some(range) => range.start.min(total)..range.end.min(total),
            None => 0..total,
        }
    }

    fn check_group(
        &self,
        handler: Handler,
        sections: &Range<usize>,
        element_number: u16,
        ddi: u16,
    ) {
        let Some(group) = handler.condensed_group() else {
            return;
        };
        if group * SECTIONS_PER_GROUP >= sections.len() {
            warn!(
                element_number,
                ddi,
                group,
                sections = sections.len(),
                "condensed work state group past the last section"
            );
        }
    }

    /// Answers a value request. `None` means the request is declined.
    pub fn read(&self, state: &SectionControlState, element_number: u16, ddi: u16) -> Option<i32> {
        match self.handler(ddi) {
            Some(handler) if handler.is_readable() => {
                let sections = self.sections(state, element_number);
                self.check_group(handler, &sections, element_number, ddi);
                let value = handler.read(state, sections);
                trace!(element_number, ddi, value, "value request");
                Some(value)
            }
            _ => {
                trace!(element_number, ddi, "value request for unhandled ddi");
                self.claim_unknown.then_some(0)
            }
        }
    }

    /// Applies a value command. Returns whether the command was claimed.
    pub fn write(
        &self,
        state: &mut SectionControlState,
        element_number: u16,
        ddi: u16,
        value: i32,
    ) -> bool {
        match self.handler(ddi) {
            Some(handler) if handler.is_writable() => {
                let sections = self.sections(state, element_number);
                self.check_group(handler, &sections, element_number, ddi);
                handler.write(state, sections, value);
                debug!(element_number, ddi, value, "value command applied");
                true
            }
            Some(_) => {
                warn!(element_number, ddi, value, "ignoring value command for read only ddi");
                self.claim_unknown
            }
            None => {
                debug!(element_number, ddi, value, "ignoring value command for unknown ddi");
                self.claim_unknown
            }
        }
    }

    /// Binds this dispatcher to `state` for the duration of a session.
    pub fn bind<'a>(&'a self, state: &'a mut SectionControlState) -> BoundDispatcher<'a> {
        BoundDispatcher {
            dispatcher: self,
            state,
        }
    }
}

/// Callbacks a task controller client invokes for process data.
pub trait ValueHandler {
    /// Value request for `ddi` on element `element_number`. `None` declines it.
    fn request_value(&mut self, element_number: u16, ddi: u16) -> Option<i32>;

    /// Value command for `ddi` on element `element_number`. Returns whether it was claimed.
    fn command_value(&mut self, element_number: u16, ddi: u16, value: i32) -> bool;
}

/// A [Dispatcher] with exclusive access to the state it serves.
pub struct BoundDispatcher<'a> {
    dispatcher: &'a Dispatcher,
    state: &'a mut SectionControlState,
}

impl BoundDispatcher<'_> {
    pub fn state(&self) -> &SectionControlState {
        &*self.state
    }
}

impl ValueHandler for BoundDispatcher<'_> {
    fn request_value(&mut self, element_number: u16, ddi: u16) -> Option<i32> {
        self.dispatcher.read(self.state, element_number, ddi)
    }

    fn command_value(&mut self, element_number: u16, ddi: u16, value: i32) -> bool {
        self.dispatcher.write(self.state, element_number, ddi, value)
    }
}

/// A [Dispatcher] serving a state that other threads also hold.
///
/// Every callback locks the state for its whole duration.
#[derive(Debug, Clone)]
pub struct SharedDispatcher {
    dispatcher: Dispatcher,
    state: Arc<Mutex<SectionControlState>>,
}

impl SharedDispatcher {
    pub fn new(dispatcher: Dispatcher, state: Arc<Mutex<SectionControlState>>) -> Self {
        Self { dispatcher, state }
    }

    pub fn state(&self) -> Arc<Mutex<SectionControlState>> {
        Arc::clone(&self.state)
    }
}

impl ValueHandler for SharedDispatcher {
    fn request_value(&mut self, element_number: u16, ddi: u16) -> Option<i32> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        self.dispatcher.read(&state, element_number, ddi)
    }

    fn command_value(&mut self, element_number: u16, ddi: u16, value: i32) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        self.dispatcher.write(&mut state, element_number, ddi, value)
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{BoomConfig, DeviceIdentity, build};

    use super::*;

    fn state(sections: usize) -> SectionControlState {
        SectionControlState::new(sections).unwrap()
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_constant_reads() {
        let dispatcher = Dispatcher::new();
        let state = state(4);

        assert_eq!(dispatcher.read(&state, 0, ddi::MAXIMUM_COUNT_CONTENT), Some(200_000));
        assert_eq!(dispatcher.read(&state, 0, ddi::ACTUAL_COUNT_CONTENT), Some(150_000));
        assert_eq!(dispatcher.read(&state, 0, ddi::DEVICE_ELEMENT_OFFSET_X), Some(0));
        assert_eq!(dispatcher.read(&state, 0, ddi::REQUEST_DEFAULT_PROCESS_DATA), Some(0));
        assert_eq!(dispatcher.read(&state, 0, ddi::ACTUAL_WORKING_WIDTH), Some(15000));
    }

    #[test]
    fn test_unknown_ddi_is_claimed_by_default() {
        let dispatcher = Dispatcher::new();
        let mut state = state(4);

        assert_eq!(dispatcher.read(&state, 3, 0x4242), Some(0));
        assert!(dispatcher.write(&mut state, 3, 0x4242, 7));
        assert_eq!(state, self::state(4));
    }

    #[test]
    fn test_unknown_ddi_can_be_declined() {
        let dispatcher = Dispatcher::new().claim_unknown(false);
        let mut state = state(4);

        assert_eq!(dispatcher.read(&state, 3, 0x4242), None);
        assert!(!dispatcher.write(&mut state, 3, 0x4242, 7));
        assert_eq!(dispatcher.read(&state, 3, ddi::SECTION_CONTROL_STATE), Some(0));
    }

    #[test]
    fn test_control_state_writes_set_auto_mode() {
        let dispatcher = Dispatcher::new();
        let mut state = state(4);

        dispatcher.write(&mut state, 0, ddi::SECTION_CONTROL_STATE, 1);
        assert!(state.is_auto_mode());
        assert_eq!(dispatcher.read(&state, 0, ddi::PRESCRIPTION_CONTROL_STATE), Some(1));

        dispatcher.write(&mut state, 0, ddi::PRESCRIPTION_CONTROL_STATE, 0);
        assert!(!state.is_auto_mode());
        assert_eq!(dispatcher.read(&state, 0, ddi::SECTION_CONTROL_STATE), Some(0));
    }

    #[test]
    fn test_setpoint_condensed_write_then_read() {
        init_tracing();
        let dispatcher = Dispatcher::new();
        let mut state = state(10);

        // sections 0 and 2 on, the rest off
        assert!(dispatcher.write(&mut state, 0, ddi::SETPOINT_CONDENSED_WORK_STATE_1_16, 0b01_00_01));
        assert!(state.section_setpoint_state(0));
        assert!(!state.section_setpoint_state(1));
        assert!(state.section_setpoint_state(2));

        let value = dispatcher
            .read(&state, 0, ddi::SETPOINT_CONDENSED_WORK_STATE_1_16)
            .unwrap() as u32;
        assert_eq!(value, 0xFFF0_0011);
    }

    #[test]
    fn test_actual_condensed_follows_auto_mode() {
        let dispatcher = Dispatcher::new();
        let mut state = state(16);
        state.set_section_setpoint_state(0, true);
        state.set_section_switch_state(1, true);

        state.set_auto_mode(true);
        let auto = dispatcher.read(&state, 0, ddi::ACTUAL_CONDENSED_WORK_STATE_1_16);
        assert_eq!(auto, Some(0b01));

        state.set_auto_mode(false);
        let manual = dispatcher.read(&state, 0, ddi::ACTUAL_CONDENSED_WORK_STATE_1_16);
        assert_eq!(manual, Some(0b01_00));
    }

    #[test]
    fn test_actual_condensed_is_read_only() {
        init_tracing();
        let dispatcher = Dispatcher::new();
        let mut state = state(4);
        state.set_auto_mode(true);

        dispatcher.write(&mut state, 0, ddi::ACTUAL_CONDENSED_WORK_STATE_1_16, 0x5555_5555);

        assert_eq!(state.actual_sections_on(), 0);
        assert!(!state.section_setpoint_state(0));
    }

    #[test]
    fn test_condensed_group_past_sections() {
        let dispatcher = Dispatcher::new();
        let mut state = state(4);

        let value = dispatcher.read(&state, 0, ddi::ACTUAL_CONDENSED_WORK_STATE_1_16 + 1);
        assert_eq!(value, Some(-1));

        dispatcher.write(&mut state, 0, ddi::SETPOINT_CONDENSED_WORK_STATE_1_16 + 1, 0x5555_5555);
        assert_eq!(state, self::state(4));
    }

    #[test]
    fn test_rate_gate() {
        let dispatcher = Dispatcher::new();
        let mut state = state(4);

        dispatcher.write(&mut state, 0, ddi::SETPOINT_VOLUME_PER_AREA_APPLICATION_RATE, 2500);
        assert_eq!(dispatcher.read(&state, 0, ddi::SETPOINT_VOLUME_PER_AREA_APPLICATION_RATE), Some(2500));
        assert_eq!(dispatcher.read(&state, 0, ddi::ACTUAL_VOLUME_PER_AREA_APPLICATION_RATE), Some(0));
        assert_eq!(dispatcher.read(&state, 0, ddi::ACTUAL_WORK_STATE), Some(0));

        state.set_section_switch_state(2, true);
        assert_eq!(dispatcher.read(&state, 0, ddi::ACTUAL_VOLUME_PER_AREA_APPLICATION_RATE), Some(2500));
        assert_eq!(dispatcher.read(&state, 0, ddi::ACTUAL_WORK_STATE), Some(1));
    }

    #[test]
    fn test_custom_rate_ddi() {
        let dispatcher = Dispatcher::with_rate_ddi(11).unwrap();
        let mut state = state(1);
        state.set_section_switch_state(0, true);

        dispatcher.write(&mut state, 0, 11, 40);
        assert_eq!(dispatcher.read(&state, 0, 12), Some(40));
        assert_eq!(dispatcher.handler(ddi::ACTUAL_VOLUME_PER_AREA_APPLICATION_RATE), None);
    }

    #[test]
    fn test_rate_ddi_overflow_is_rejected() {
        assert_eq!(
            Dispatcher::with_rate_ddi(u16::MAX).unwrap_err(),
            DispatchError::InvalidRateDdi(u16::MAX)
        );
    }

    #[test]
    fn test_rate_ddi_cannot_replace_fixed_handlers() {
        assert!(Dispatcher::with_rate_ddi(ddi::SECTION_CONTROL_STATE - 1).is_err());
        assert!(Dispatcher::with_rate_ddi(ddi::ACTUAL_CONDENSED_WORK_STATE_1_16).is_err());
        assert_eq!(
            Dispatcher::new().handler(ddi::SECTION_CONTROL_STATE),
            Some(Handler::SectionControlState)
        );
    }

    #[test]
    fn test_fixed_handlers_are_reserved() {
        let dispatcher = Dispatcher::new();
        let rates = [
            ddi::SETPOINT_VOLUME_PER_AREA_APPLICATION_RATE,
            ddi::ACTUAL_VOLUME_PER_AREA_APPLICATION_RATE,
        ];

        for code in dispatcher.handlers.keys().copied().filter(|code| !rates.contains(code)) {
            assert!(ddi::is_reserved(code), "ddi {code} is not reserved");
        }
    }

    #[test]
    fn test_for_pool_uses_pool_rate_ddis() {
        let boom = BoomConfig {
            target_rate_ddi: 11,
            ..Default::default()
        };
        let pool = build(&[boom], &DeviceIdentity::new(0, "Seeder")).unwrap();
        let dispatcher = Dispatcher::for_pool(&pool).unwrap();
        let mut state = SectionControlState::from_pool(&pool).unwrap();
        state.set_section_switch_state(0, true);

        assert!(dispatcher.write(&mut state, 13, 11, 750));
        assert_eq!(dispatcher.read(&state, 13, 12), Some(750));
        assert_eq!(dispatcher.handler(ddi::SETPOINT_VOLUME_PER_AREA_APPLICATION_RATE), None);
    }

    #[test]
    fn test_condensed_state_per_boom() {
        let booms = [
            BoomConfig {
                number_of_sections: 4,
                ..Default::default()
            },
            BoomConfig {
                number_of_sections: 3,
                ..Default::default()
            },
        ];
        let pool = build(&booms, &DeviceIdentity::new(0, "Sprayer")).unwrap();
        let dispatcher = Dispatcher::for_pool(&pool).unwrap();
        let mut state = SectionControlState::from_pool(&pool).unwrap();

        // element numbers: root 0, connector 1, booms 2 and 7
        let (first_boom, second_boom) = (2, 7);
        assert_eq!(dispatcher.sections(&state, first_boom), 0..4);
        assert_eq!(dispatcher.sections(&state, second_boom), 4..7);
        assert_eq!(dispatcher.sections(&state, 0), 0..7);

        state.set_section_switch_state(0, true);
        let actual = |state: &SectionControlState, element| {
            dispatcher.read(state, element, ddi::ACTUAL_CONDENSED_WORK_STATE_1_16).unwrap() as u32
        };
        assert_eq!(actual(&state, first_boom), 0xFFFF_FF01);
        assert_eq!(actual(&state, second_boom), 0xFFFF_FFC0);

        state.set_section_switch_state(5, true);
        assert_eq!(actual(&state, second_boom), 0xFFFF_FFC4);

        assert!(dispatcher.write(&mut state, second_boom, ddi::SETPOINT_CONDENSED_WORK_STATE_1_16, 0b01));
        assert!(state.section_setpoint_state(4));
        assert!(!state.section_setpoint_state(0));
        assert!(!state.section_setpoint_state(5));
    }

    #[test]
    fn test_condensed_group_past_boom_sections() {
        init_tracing();
        let booms = [
            BoomConfig {
                number_of_sections: 20,
                ..Default::default()
            },
            BoomConfig {
                number_of_sections: 3,
                ..Default::default()
            },
        ];
        let pool = build(&booms, &DeviceIdentity::new(0, "Sprayer")).unwrap();
        let dispatcher = Dispatcher::for_pool(&pool).unwrap();
        let mut state = SectionControlState::from_pool(&pool).unwrap();
        let second_boom = pool.element(crate::ids::BoomIds::for_boom(1).element).unwrap().element_number;

        let second_group = ddi::ACTUAL_CONDENSED_WORK_STATE_1_16 + 1;
        assert_eq!(dispatcher.read(&state, second_boom, second_group), Some(-1));
        assert_ne!(dispatcher.read(&state, 2, second_group), Some(-1));

        let before = state.clone();
        dispatcher.write(&mut state, second_boom, ddi::SETPOINT_CONDENSED_WORK_STATE_1_16 + 1, 0x5555_5555);
        assert_eq!(state, before);
    }

    #[test]
    fn test_setpoint_work_state_is_write_only() {
        let dispatcher = Dispatcher::new().claim_unknown(false);
        let mut state = state(1);

        assert!(dispatcher.write(&mut state, 0, ddi::SETPOINT_WORK_STATE, 1));
        assert!(state.setpoint_work_state());
        assert_eq!(dispatcher.read(&state, 0, ddi::SETPOINT_WORK_STATE), None);

        dispatcher.write(&mut state, 0, ddi::SETPOINT_WORK_STATE, 2);
        assert!(!state.setpoint_work_state());
    }

    #[test]
    fn test_bound_dispatcher() {
        let dispatcher = Dispatcher::new();
        let mut state = state(2);

        {
            let mut bound = dispatcher.bind(&mut state);
            assert!(bound.command_value(2, ddi::SECTION_CONTROL_STATE, 1));
            assert!(bound.command_value(2, ddi::SETPOINT_CONDENSED_WORK_STATE_1_16, 0b01_01));
            assert_eq!(bound.request_value(2, ddi::ACTUAL_WORK_STATE), Some(1));
            assert!(bound.state().is_auto_mode());
        }

        assert_eq!(state.actual_sections_on(), 2);
    }

    #[test]
    fn test_shared_dispatcher() {
        let shared = Arc::new(Mutex::new(state(3)));
        let mut handler = SharedDispatcher::new(Dispatcher::new(), Arc::clone(&shared));

        let worker = std::thread::spawn(move || {
            handler.command_value(0, ddi::SETPOINT_VOLUME_PER_AREA_APPLICATION_RATE, 99)
        });
        assert!(worker.join().unwrap());

        assert_eq!(shared.lock().unwrap().target_rate(), 99);
    }
}
