//! Typed objects of a device descriptor object pool.

/// Kind tag of an [Object].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Device,
    DeviceElement,
    DeviceProcessData,
    DeviceProperty,
    DeviceValuePresentation,
}

/// A single pool object. Every variant carries its unique identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Device(Device),
    DeviceElement(DeviceElement),
    DeviceProcessData(DeviceProcessData),
    DeviceProperty(DeviceProperty),
    DeviceValuePresentation(DeviceValuePresentation),
}

impl Object {
    pub fn id(&self) -> u16 {
        match self {
            Object::Device(o) => o.id,
            Object::DeviceElement(o) => o.id,
            Object::DeviceProcessData(o) => o.id,
            Object::DeviceProperty(o) => o.id,
            Object::DeviceValuePresentation(o) => o.id,
        }
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Device(_) => ObjectType::Device,
            Object::DeviceElement(_) => ObjectType::DeviceElement,
            Object::DeviceProcessData(_) => ObjectType::DeviceProcessData,
            Object::DeviceProperty(_) => ObjectType::DeviceProperty,
            Object::DeviceValuePresentation(_) => ObjectType::DeviceValuePresentation,
        }
    }

    pub fn designator(&self) -> &str {
        match self {
            Object::Device(o) => &o.designator,
            Object::DeviceElement(o) => &o.designator,
            Object::DeviceProcessData(o) => &o.designator,
            Object::DeviceProperty(o) => &o.designator,
            Object::DeviceValuePresentation(o) => &o.designator,
        }
    }

    pub fn as_element(&self) -> Option<&DeviceElement> {
        match self {
            Object::DeviceElement(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_process_data(&self) -> Option<&DeviceProcessData> {
        match self {
            Object::DeviceProcessData(pd) => Some(pd),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&DeviceProperty> {
        match self {
            Object::DeviceProperty(property) => Some(property),
            _ => None,
        }
    }
}

/// Root object describing the implement as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: u16,
    pub designator: String,
    pub software_version: String,
    pub serial_number: String,
    /// Changes whenever the pool structure changes; 7 bytes on the wire.
    pub structure_label: String,
    pub localization_label: [u8; 7],
    /// Opaque client identity (the ISO NAME).
    pub client_identity: [u8; 8],
}

/// Element type tag carried by a [DeviceElement]. Discriminants are the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ElementType {
    Device = 1,
    Function = 2,
    Bin = 3,
    Section = 4,
    Unit = 5,
    Connector = 6,
    NavigationReference = 7,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceElement {
    pub id: u16,
    pub designator: String,
    pub element_type: ElementType,
    /// Unique, sequential per element.
    pub element_number: u16,
    /// Object id of the parent element, or the device object for the root element.
    pub parent_id: u16,
    /// Identifiers of owned process data, properties and presentations.
    pub children: Vec<u16>,
}

impl DeviceElement {
    pub fn add_child(&mut self, child_id: u16) {
        self.children.push(child_id);
    }
}

/// Bits of [DeviceProcessData::properties].
pub mod properties {
    pub const MEMBER_OF_DEFAULT_SET: u8 = 0x01;
    pub const SETTABLE: u8 = 0x02;
    pub const CONTROL_SOURCE: u8 = 0x04;
}

/// Bits of [DeviceProcessData::trigger_methods].
pub mod triggers {
    pub const TIME_INTERVAL: u8 = 0x01;
    pub const DISTANCE_INTERVAL: u8 = 0x02;
    pub const THRESHOLD_LIMITS: u8 = 0x04;
    pub const ON_CHANGE: u8 = 0x08;
    pub const TOTAL: u8 = 0x10;
}

/// A variable value exchanged with the task controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProcessData {
    pub id: u16,
    pub designator: String,
    pub ddi: u16,
    pub properties: u8,
    pub trigger_methods: u8,
    pub presentation_id: u16,
}

/// A fixed value describing the device, such as a geometry offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProperty {
    pub id: u16,
    pub designator: String,
    pub ddi: u16,
    pub value: i32,
    pub presentation_id: u16,
}

/// Linear scaling used to display a value: `(raw + offset) * scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceValuePresentation {
    pub id: u16,
    pub designator: String,
    pub offset: i32,
    pub scale: f32,
    pub decimal_digits: u8,
}
