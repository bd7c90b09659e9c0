//! Binary form of an object pool (ISO 11783-10 device descriptor records).
//!
//! Each object becomes one record: a three letter table id followed by its
//! attributes, integers little-endian, strings prefixed with a u8 length.
//!
//! | record | attributes |
//! |--------|------------|
//! | `DVC`  | id, designator, software version, NAME, serial number, structure label, localization label |
//! | `DET`  | id, type, designator, element number, parent id, child count, child ids |
//! | `DPD`  | id, DDI, properties, trigger methods, designator, presentation id |
//! | `DPT`  | id, DDI, value, designator, presentation id |
//! | `DVP`  | id, offset, scale, decimal digits, designator |

use crate::{
    errors::SerializeError,
    object::{
        Device, DeviceElement, DeviceProcessData, DeviceProperty, DeviceValuePresentation, Object,
    },
    pool::ObjectPool,
};

/// Longest designator or version string accepted by version 3 pools.
pub const MAX_DESIGNATOR_LEN: usize = 32;
/// Longest designator accepted by version 4 and later pools.
pub const MAX_DESIGNATOR_LEN_V4: usize = 128;
const LABEL_LEN: usize = 7;

/// Longest designator a pool of `version` can carry.
pub fn max_designator_len(version: u8) -> usize {
    if version >= 4 {
        MAX_DESIGNATOR_LEN_V4
    } else {
        MAX_DESIGNATOR_LEN
    }
}

impl ObjectPool {
    /// Serializes every object in insertion order.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializeError> {
        let mut writer = Writer::new(self.version());
        for object in self.iter() {
            writer.object(object)?;
        }
        Ok(writer.buf)
    }
}

struct Writer {
    buf: Vec<u8>,
    version: u8,
}

impl Writer {
    fn new(version: u8) -> Self {
        Self {
            buf: Vec::new(),
            version,
        }
    }

    fn object(&mut self, object: &Object) -> Result<(), SerializeError> {
        match object {
            Object::Device(device) => self.device(device),
            Object::DeviceElement(element) => self.element(element),
            Object::DeviceProcessData(pd) => self.process_data(pd),
            Object::DeviceProperty(property) => self.property(property),
            Object::DeviceValuePresentation(presentation) => self.presentation(presentation),
        }
    }

    fn device(&mut self, device: &Device) -> Result<(), SerializeError> {
        self.table(b"DVC", device.id);
        self.string(device.id, &device.designator)?;
        self.string(device.id, &device.software_version)?;
        self.buf.extend_from_slice(&device.client_identity);
        self.string(device.id, &device.serial_number)?;
        self.label(device.id, device.structure_label.as_bytes())?;
        self.buf.extend_from_slice(&device.localization_label);
        if self.version >= 4 {
            // extended structure label, unused
            self.buf.push(0);
        }
        Ok(())
    }

    fn element(&mut self, element: &DeviceElement) -> Result<(), SerializeError> {
        let child_count = u16::try_from(element.children.len())
            .map_err(|_| SerializeError::TooManyChildren(element.id))?;

        self.table(b"DET", element.id);
        self.buf.push(element.element_type as u8);
        self.string(element.id, &element.designator)?;
        self.u16(element.element_number);
        self.u16(element.parent_id);
        self.u16(child_count);
        for &child in &element.children {
            self.u16(child);
        }
        Ok(())
    }

    fn process_data(&mut self, pd: &DeviceProcessData) -> Result<(), SerializeError> {
        self.table(b"DPD", pd.id);
        self.u16(pd.ddi);
        self.buf.push(pd.properties);
        self.buf.push(pd.trigger_methods);
        self.string(pd.id, &pd.designator)?;
        self.u16(pd.presentation_id);
        Ok(())
    }

    fn property(&mut self, property: &DeviceProperty) -> Result<(), SerializeError> {
        self.table(b"DPT", property.id);
        self.u16(property.ddi);
        self.buf.extend_from_slice(&property.value.to_le_bytes());
        self.string(property.id, &property.designator)?;
        self.u16(property.presentation_id);
        Ok(())
    }

    fn presentation(&mut self, presentation: &DeviceValuePresentation) -> Result<(), SerializeError> {
        self.table(b"DVP", presentation.id);
        self.buf.extend_from_slice(&presentation.offset.to_le_bytes());
        self.buf.extend_from_slice(&presentation.scale.to_le_bytes());
        self.buf.push(presentation.decimal_digits);
        self.string(presentation.id, &presentation.designator)?;
        Ok(())
    }

    fn table(&mut self, table_id: &[u8; 3], object_id: u16) {
        self.buf.extend_from_slice(table_id);
        self.u16(object_id);
    }

    fn u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn string(&mut self, object_id: u16, value: &str) -> Result<(), SerializeError> {
        let max = max_designator_len(self.version);
        let bytes = value.as_bytes();
        if bytes.len() > max {
            return Err(SerializeError::StringTooLong {
                object_id,
                len: bytes.len(),
                max,
            });
        }

        self.buf.push(bytes.len() as u8);
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Fixed width label, space padded.
    fn label(&mut self, object_id: u16, value: &[u8]) -> Result<(), SerializeError> {
        if value.len() > LABEL_LEN {
            return Err(SerializeError::StringTooLong {
                object_id,
                len: value.len(),
                max: LABEL_LEN,
            });
        }

        self.buf.extend_from_slice(value);
        self.buf.extend(std::iter::repeat_n(b' ', LABEL_LEN - value.len()));
        Ok(())
    }
}
