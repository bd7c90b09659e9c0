//! Builds the device descriptor object pool for a sprayer/seeder style implement.
//!
//! The tree is always:
//!
//! ```text
//! Device
//! └── Device element (root)
//!     ├── Connector
//!     ├── Boom (one Function element per boom configuration)
//!     │   └── Section × n
//!     └── Product (Bin, parented to the first boom when there is one)
//! ```
//!
//! Identifiers come from [crate::ids], so identical inputs produce identical
//! pools, down to the order of every child reference list.

use tracing::{debug, info};

use crate::{
    condensed::{self, SECTIONS_PER_GROUP},
    ddi,
    errors::BuildError,
    ids::{self, BoomIds, MAX_BOOMS, MAX_SECTIONS, NULL_OBJECT_ID},
    object::{
        Device, DeviceElement, DeviceProcessData, DeviceProperty, DeviceValuePresentation,
        ElementType, Object, properties, triggers,
    },
    pool::ObjectPool,
    serialize,
};

/// English, decimal point, 12 hour time, ddmmyyyy, imperial units.
pub const LOCALIZATION_LABEL: [u8; 7] = [b'e', b'n', 0b0101_0000, 0x00, 0b0101_0101, 0b0101_0101, 0xFF];
pub const SOFTWARE_VERSION: &str = "1.0.0";
pub const SERIAL_NUMBER: &str = "123";
pub const DEFAULT_DEVICE_VERSION: &str = "1.0.0";

/// Fore/aft offset of every section relative to the boom, in millimeters.
pub const SECTION_OFFSET_X_MM: i32 = -20;
/// Widest boom whose section offsets fit a signed 32-bit millimeter value.
pub const MAX_BOOM_WIDTH_MM: u32 = i32::MAX as u32;
const CONNECTOR_TYPE_VALUE: i32 = 9;
const CULTURAL_PRACTICE_VALUE: i32 = 6;

/// Configuration of one working-section group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoomConfig {
    /// DDI of the setpoint application rate; the actual rate uses the next DDI.
    pub target_rate_ddi: u16,
    /// Carried for the task controller client; not used in the pool layout.
    pub rate_channel_count: u8,
    /// Carried for the task controller client; not used in the pool layout.
    pub supports_prescription_control: bool,
    pub number_of_sections: u16,
    pub supports_section_control: bool,
    pub boom_width_mm: u32,
}

impl Default for BoomConfig {
    fn default() -> Self {
        Self {
            target_rate_ddi: ddi::SETPOINT_VOLUME_PER_AREA_APPLICATION_RATE,
            rate_channel_count: 8,
            supports_prescription_control: true,
            number_of_sections: 10,
            supports_section_control: true,
            boom_width_mm: 15000,
        }
    }
}

impl BoomConfig {
    /// Width of each section. Integer division; the remainder is not assigned.
    pub fn section_width_mm(&self) -> i32 {
        if self.number_of_sections == 0 {
            return 0;
        }
        saturate(i64::from(self.boom_width_mm / u32::from(self.number_of_sections)))
    }

    /// Lateral offset of section `index` from the boom center, in millimeters.
    ///
    /// Saturates for booms wider than [MAX_BOOM_WIDTH_MM], which [build] rejects.
    pub fn section_offset_y_mm(&self, index: u16) -> i32 {
        let width = i64::from(self.section_width_mm());
        saturate(-i64::from(self.boom_width_mm) / 2 + i64::from(index) * width + width / 2)
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Identity the device presents to the task controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// 64-bit ISO NAME of the working set master.
    pub name: u64,
    pub device_name: String,
    pub device_version: String,
}

impl DeviceIdentity {
    pub fn new(name: u64, device_name: impl Into<String>) -> Self {
        Self {
            name,
            device_name: device_name.into(),
            device_version: DEFAULT_DEVICE_VERSION.to_string(),
        }
    }

    pub fn with_version(mut self, device_version: impl Into<String>) -> Self {
        self.device_version = device_version.into();
        self
    }

    /// The NAME as the 8 opaque identity bytes carried by the device object.
    pub fn client_identity(&self) -> [u8; 8] {
        self.name.to_le_bytes()
    }
}

/// Collects boom configurations and builds the pool.
#[derive(Debug, Clone)]
pub struct PoolBuilder {
    identity: DeviceIdentity,
    booms: Vec<BoomConfig>,
}

impl PoolBuilder {
    pub fn new(identity: DeviceIdentity) -> Self {
        Self {
            identity,
            booms: Vec::new(),
        }
    }

    pub fn boom(mut self, boom: BoomConfig) -> Self {
        self.booms.push(boom);
        self
    }

    pub fn booms(mut self, booms: impl IntoIterator<Item = BoomConfig>) -> Self {
        self.booms.extend(booms);
        self
    }

    /// Builds the pool. Fails if the booms need more identifiers than the bands hold.
    pub fn build(&self) -> Result<ObjectPool, BuildError> {
        build(&self.booms, &self.identity)
    }
}

/// Builds the complete object pool for `booms`, in input order.
pub fn build(booms: &[BoomConfig], identity: &DeviceIdentity) -> Result<ObjectPool, BuildError> {
    if booms.len() > MAX_BOOMS {
        return Err(BuildError::TooManyBooms(booms.len()));
    }

    let total_sections: usize = booms.iter().map(|b| b.number_of_sections as usize).sum();
    if total_sections > MAX_SECTIONS {
        return Err(BuildError::TooManySections(total_sections));
    }

    if let Some(boom) = booms.iter().find(|b| b.boom_width_mm > MAX_BOOM_WIDTH_MM) {
        return Err(BuildError::BoomTooWide(boom.boom_width_mm));
    }

    let target_rate_ddi = booms
        .first()
        .map_or(ddi::SETPOINT_VOLUME_PER_AREA_APPLICATION_RATE, |b| b.target_rate_ddi);
    let rate_ddis =
        ddi::rate_pair(target_rate_ddi).ok_or(BuildError::InvalidRateDdi(target_rate_ddi))?;

    let mut assembly = Assembly::default();

    assembly.add_device(identity)?;
    assembly.add_connector()?;

    let mut first_section = 0usize;
    for (boom_index, boom) in booms.iter().enumerate() {
        assembly.add_boom(boom_index, boom, first_section)?;
        first_section += boom.number_of_sections as usize;
    }

    let bin_parent = if booms.is_empty() {
        ids::MAIN_DEVICE_ELEMENT
    } else {
        ids::MAIN_BOOM
    };
    assembly.add_bin(bin_parent, rate_ddis)?;

    assembly.add_presentations()?;
    let pool = assembly.link()?;

    info!(
        objects = pool.len(),
        booms = booms.len(),
        sections = total_sections,
        "object pool built"
    );

    Ok(pool)
}

/// Pool under construction plus the bookkeeping needed to link it.
#[derive(Default)]
struct Assembly {
    pool: ObjectPool,
    element_number: u16,
    /// Element id and the ids it owns, in creation order.
    ownership: Vec<(u16, Vec<u16>)>,
}

impl Assembly {
    fn add_device(&mut self, identity: &DeviceIdentity) -> Result<(), BuildError> {
        self.pool.add(Object::Device(Device {
            id: ids::DEVICE,
            designator: self.designator(ids::DEVICE, &identity.device_name)?,
            software_version: SOFTWARE_VERSION.to_string(),
            serial_number: SERIAL_NUMBER.to_string(),
            structure_label: identity.device_version.clone(),
            localization_label: LOCALIZATION_LABEL,
            client_identity: identity.client_identity(),
        }))?;

        self.begin_element(
            ids::MAIN_DEVICE_ELEMENT,
            &identity.device_name,
            ElementType::Device,
            ids::DEVICE,
        )?;
        self.process_data(
            ids::DEVICE_ACTUAL_WORK_STATE,
            "Actual Work State",
            ddi::ACTUAL_WORK_STATE,
            properties::MEMBER_OF_DEFAULT_SET,
            triggers::ON_CHANGE,
            NULL_OBJECT_ID,
        )?;
        self.process_data(
            ids::REQUEST_DEFAULT_PROCESS_DATA,
            "Request Default PD",
            ddi::REQUEST_DEFAULT_PROCESS_DATA,
            0,
            triggers::TOTAL,
            NULL_OBJECT_ID,
        )?;
        self.process_data(
            ids::DEVICE_TOTAL_TIME,
            "Total Time",
            ddi::EFFECTIVE_TOTAL_TIME,
            properties::MEMBER_OF_DEFAULT_SET | properties::SETTABLE,
            triggers::TOTAL,
            ids::TIME_PRESENTATION,
        )?;
        self.end_element();
        Ok(())
    }

    fn add_connector(&mut self) -> Result<(), BuildError> {
        self.begin_element(
            ids::CONNECTOR,
            "Connector",
            ElementType::Connector,
            ids::MAIN_DEVICE_ELEMENT,
        )?;
        self.process_data(
            ids::CONNECTOR_X_OFFSET,
            "Connector X",
            ddi::DEVICE_ELEMENT_OFFSET_X,
            properties::SETTABLE,
            0,
            ids::SHORT_WIDTH_PRESENTATION,
        )?;
        self.process_data(
            ids::CONNECTOR_Y_OFFSET,
            "Connector Y",
            ddi::DEVICE_ELEMENT_OFFSET_Y,
            properties::SETTABLE,
            0,
            ids::SHORT_WIDTH_PRESENTATION,
        )?;
        self.property(
            ids::CONNECTOR_TYPE,
            "Type",
            ddi::CONNECTOR_TYPE,
            CONNECTOR_TYPE_VALUE,
            NULL_OBJECT_ID,
        )?;
        self.end_element();
        Ok(())
    }

    fn add_boom(
        &mut self,
        boom_index: usize,
        boom: &BoomConfig,
        first_section: usize,
    ) -> Result<(), BuildError> {
        let boom_ids = BoomIds::for_boom(boom_index);
        debug!(
            boom = boom_index,
            element = boom_ids.element,
            sections = boom.number_of_sections,
            width_mm = boom.boom_width_mm,
            "adding boom"
        );

        self.begin_element(
            boom_ids.element,
            "Boom",
            ElementType::Function,
            ids::MAIN_DEVICE_ELEMENT,
        )?;
        for (id, designator, offset_ddi) in [
            (boom_ids.x_offset, "Offset X", ddi::DEVICE_ELEMENT_OFFSET_X),
            (boom_ids.y_offset, "Offset Y", ddi::DEVICE_ELEMENT_OFFSET_Y),
            (boom_ids.z_offset, "Offset Z", ddi::DEVICE_ELEMENT_OFFSET_Z),
        ] {
            self.property(id, designator, offset_ddi, 0, ids::SHORT_WIDTH_PRESENTATION)?;
        }
        self.process_data(
            boom_ids.working_width,
            "Actual Working Width",
            ddi::ACTUAL_WORKING_WIDTH,
            properties::MEMBER_OF_DEFAULT_SET,
            triggers::ON_CHANGE,
            ids::LONG_WIDTH_PRESENTATION,
        )?;
        self.process_data(
            boom_ids.area_total,
            "Area Total",
            ddi::TOTAL_AREA,
            properties::MEMBER_OF_DEFAULT_SET,
            triggers::TOTAL,
            ids::AREA_PRESENTATION,
        )?;
        self.process_data(
            boom_ids.setpoint_work_state,
            "Setpoint Work State",
            ddi::SETPOINT_WORK_STATE,
            properties::MEMBER_OF_DEFAULT_SET | properties::SETTABLE,
            triggers::ON_CHANGE,
            NULL_OBJECT_ID,
        )?;

        if boom.supports_section_control {
            self.process_data(
                boom_ids.section_control_state,
                "Section Control State",
                ddi::SECTION_CONTROL_STATE,
                properties::MEMBER_OF_DEFAULT_SET | properties::SETTABLE,
                triggers::ON_CHANGE | triggers::TIME_INTERVAL,
                NULL_OBJECT_ID,
            )?;

            for group in 0..condensed::group_count(boom.number_of_sections as usize) {
                let (first, last) = (group * SECTIONS_PER_GROUP + 1, (group + 1) * SECTIONS_PER_GROUP);
                self.process_data(
                    boom_ids.actual_condensed(group),
                    &format!("Actual Work State {}-{}", first, last),
                    ddi::ACTUAL_CONDENSED_WORK_STATE_1_16 + group as u16,
                    properties::MEMBER_OF_DEFAULT_SET,
                    triggers::ON_CHANGE,
                    NULL_OBJECT_ID,
                )?;
                self.process_data(
                    boom_ids.setpoint_condensed(group),
                    &format!("Setpoint Work State {}-{}", first, last),
                    ddi::SETPOINT_CONDENSED_WORK_STATE_1_16 + group as u16,
                    properties::MEMBER_OF_DEFAULT_SET | properties::SETTABLE,
                    triggers::ON_CHANGE,
                    NULL_OBJECT_ID,
                )?;
            }
        }
        self.end_element();

        let section_width = boom.section_width_mm();
        for i in 0..boom.number_of_sections {
            let section = first_section + i as usize;
            let offset_y = boom.section_offset_y_mm(i);

            self.begin_element(
                ids::section(section),
                &format!("Section {}", section),
                ElementType::Section,
                boom_ids.element,
            )?;
            self.property(
                ids::section_x_offset(section),
                "Offset X",
                ddi::DEVICE_ELEMENT_OFFSET_X,
                SECTION_OFFSET_X_MM,
                ids::SHORT_WIDTH_PRESENTATION,
            )?;
            self.property(
                ids::section_y_offset(section),
                "Offset Y",
                ddi::DEVICE_ELEMENT_OFFSET_Y,
                offset_y,
                ids::SHORT_WIDTH_PRESENTATION,
            )?;
            self.property(
                ids::section_width(section),
                "Width",
                ddi::ACTUAL_WORKING_WIDTH,
                section_width,
                ids::SHORT_WIDTH_PRESENTATION,
            )?;
            self.end_element();

            debug!(section, offset_y, width = section_width, "adding section");
        }

        Ok(())
    }

    fn add_bin(&mut self, parent_id: u16, rate_ddis: (u16, u16)) -> Result<(), BuildError> {
        let (target_rate_ddi, actual_rate_ddi) = rate_ddis;
        self.begin_element(ids::PRODUCT, "Product", ElementType::Bin, parent_id)?;
        self.process_data(
            ids::BIN_CAPACITY,
            "Bin Capacity",
            ddi::MAXIMUM_COUNT_CONTENT,
            properties::MEMBER_OF_DEFAULT_SET,
            triggers::ON_CHANGE | triggers::TIME_INTERVAL,
            ids::COUNT_PRESENTATION,
        )?;
        self.process_data(
            ids::BIN_LEVEL,
            "Bin Level",
            ddi::ACTUAL_COUNT_CONTENT,
            properties::MEMBER_OF_DEFAULT_SET | properties::SETTABLE,
            triggers::ON_CHANGE | triggers::TIME_INTERVAL,
            ids::COUNT_PRESENTATION,
        )?;
        self.process_data(
            ids::LIFETIME_APPLICATION_COUNT_TOTAL,
            "Lifetime Total Count",
            ddi::LIFETIME_APPLICATION_TOTAL_COUNT,
            properties::MEMBER_OF_DEFAULT_SET,
            triggers::TOTAL,
            ids::COUNT_PRESENTATION,
        )?;
        self.process_data(
            ids::PRESCRIPTION_CONTROL_STATE,
            "Rx Control State",
            ddi::PRESCRIPTION_CONTROL_STATE,
            properties::MEMBER_OF_DEFAULT_SET | properties::SETTABLE,
            triggers::ON_CHANGE | triggers::TIME_INTERVAL,
            NULL_OBJECT_ID,
        )?;
        self.property(
            ids::ACTUAL_CULTURAL_PRACTICE,
            "Operation Type",
            ddi::ACTUAL_CULTURAL_PRACTICE,
            CULTURAL_PRACTICE_VALUE,
            NULL_OBJECT_ID,
        )?;
        self.process_data(
            ids::TARGET_RATE,
            "Target Rate",
            target_rate_ddi,
            properties::MEMBER_OF_DEFAULT_SET | properties::SETTABLE,
            triggers::ON_CHANGE,
            ids::COUNT_PER_AREA_PRESENTATION,
        )?;
        self.process_data(
            ids::ACTUAL_RATE,
            "Actual Rate",
            actual_rate_ddi,
            properties::MEMBER_OF_DEFAULT_SET,
            triggers::ON_CHANGE | triggers::TIME_INTERVAL,
            ids::COUNT_PER_AREA_PRESENTATION,
        )?;
        self.end_element();
        Ok(())
    }

    fn add_presentations(&mut self) -> Result<(), BuildError> {
        for (id, designator, scale, decimal_digits) in [
            (ids::SHORT_WIDTH_PRESENTATION, "mm", 1.0, 0),
            (ids::LONG_WIDTH_PRESENTATION, "m", 0.001, 0),
            (ids::AREA_PRESENTATION, "m^2", 1.0, 0),
            (ids::COUNT_PRESENTATION, "seeds", 1.0, 0),
            (ids::TIME_PRESENTATION, "minutes", 1.0, 1),
            (ids::COUNT_PER_AREA_PRESENTATION, "seeds/ha", 1.0, 0),
        ] {
            self.pool
                .add(Object::DeviceValuePresentation(DeviceValuePresentation {
                    id,
                    designator: designator.to_string(),
                    offset: 0,
                    scale,
                    decimal_digits,
                }))?;
        }
        Ok(())
    }

    /// Writes every element's owned ids into its child list and hands the pool out.
    fn link(mut self) -> Result<ObjectPool, BuildError> {
        for (element_id, owned) in std::mem::take(&mut self.ownership) {
            for child in owned {
                self.pool.add_child(element_id, child)?;
            }
        }
        Ok(self.pool)
    }

    fn begin_element(
        &mut self,
        id: u16,
        designator: &str,
        element_type: ElementType,
        parent_id: u16,
    ) -> Result<(), BuildError> {
        self.pool.add(Object::DeviceElement(DeviceElement {
            id,
            designator: self.designator(id, designator)?,
            element_type,
            element_number: self.element_number,
            parent_id,
            children: Vec::new(),
        }))?;
        self.ownership.push((id, Vec::new()));
        Ok(())
    }

    fn designator(&self, object_id: u16, designator: &str) -> Result<String, BuildError> {
        let max = serialize::max_designator_len(self.pool.version());
        if designator.len() > max {
            return Err(BuildError::DesignatorTooLong {
                object_id,
                len: designator.len(),
                max,
            });
        }
        Ok(designator.to_string())
    }

    fn end_element(&mut self) {
        self.element_number += 1;
    }

    fn own(&mut self, id: u16) {
        if let Some((_, owned)) = self.ownership.last_mut() {
            owned.push(id);
        }
    }

    fn process_data(
        &mut self,
        id: u16,
        designator: &str,
        ddi: u16,
        properties: u8,
        trigger_methods: u8,
        presentation_id: u16,
    ) -> Result<(), BuildError> {
        self.pool.add(Object::DeviceProcessData(DeviceProcessData {
            id,
            designator: self.designator(id, designator)?,
            ddi,
            properties,
            trigger_methods,
            presentation_id,
        }))?;
        self.own(id);
        Ok(())
    }

    fn property(
        &mut self,
        id: u16,
        designator: &str,
        ddi: u16,
        value: i32,
        presentation_id: u16,
    ) -> Result<(), BuildError> {
        self.pool.add(Object::DeviceProperty(DeviceProperty {
            id,
            designator: self.designator(id, designator)?,
            ddi,
            value,
            presentation_id,
        }))?;
        self.own(id);
        Ok(())
    }
}
