//! Deserializable implement description.
//!
//! These types describe the implement the pool is built for. They are meant
//! to be read from a configuration file shipped with the application and then
//! converted into [crate::builder] inputs. Missing boom fields take the same
//! defaults as [BoomConfig::default].

use serde::{Deserialize, Serialize};

use crate::builder::{BoomConfig, DEFAULT_DEVICE_VERSION, DeviceIdentity, PoolBuilder};

/// Top level implement description.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ImplementDef {
    /// Designator of the device object.
    pub device_name: String,
    /// Structure label; change it whenever the booms change.
    #[serde(default = "default_device_version")]
    pub device_version: String,
    /// 64-bit ISO NAME of the working set master.
    pub name: u64,
    /// Working-section groups, in the order they appear in the pool.
    #[serde(default)]
    pub booms: Vec<BoomConfigDef>,
}

/// One working-section group.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct BoomConfigDef {
    pub target_rate_ddi: u16,
    pub rate_channel_count: u8,
    pub supports_prescription_control: bool,
    pub number_of_sections: u16,
    pub supports_section_control: bool,
    pub boom_width_mm: u32,
}

impl Default for BoomConfigDef {
    fn default() -> Self {
        BoomConfig::default().into()
    }
}

fn default_device_version() -> String {
    DEFAULT_DEVICE_VERSION.to_string()
}

impl From<BoomConfigDef> for BoomConfig {
    fn from(value: BoomConfigDef) -> Self {
        BoomConfig {
            target_rate_ddi: value.target_rate_ddi,
            rate_channel_count: value.rate_channel_count,
            supports_prescription_control: value.supports_prescription_control,
            number_of_sections: value.number_of_sections,
            supports_section_control: value.supports_section_control,
            boom_width_mm: value.boom_width_mm,
        }
    }
}

impl From<BoomConfig> for BoomConfigDef {
    fn from(value: BoomConfig) -> Self {
        BoomConfigDef {
            target_rate_ddi: value.target_rate_ddi,
            rate_channel_count: value.rate_channel_count,
            supports_prescription_control: value.supports_prescription_control,
            number_of_sections: value.number_of_sections,
            supports_section_control: value.supports_section_control,
            boom_width_mm: value.boom_width_mm,
        }
    }
}

impl From<ImplementDef> for PoolBuilder {
    fn from(value: ImplementDef) -> Self {
        let identity =
            DeviceIdentity::new(value.name, value.device_name).with_version(value.device_version);
        PoolBuilder::new(identity).booms(value.booms.into_iter().map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use crate::{errors::BuildError, state::SectionControlState};

    use super::*;

    #[test]
    fn test_boom_defaults() {
        let def: BoomConfigDef = serde_json::from_str("{}").unwrap();
        assert_eq!(BoomConfig::from(def), BoomConfig::default());
    }

    #[test]
    fn test_partial_boom() {
        let def: BoomConfigDef =
            serde_json::from_str(r#"{ "number_of_sections": 24, "boom_width_mm": 36000 }"#).unwrap();
        let boom = BoomConfig::from(def);

        assert_eq!(boom.number_of_sections, 24);
        assert_eq!(boom.section_width_mm(), 1500);
        assert!(boom.supports_section_control);
    }

    #[test]
    fn test_implement_to_pool() {
        let json = r#"{
            "device_name": "Seeder",
            "name": 12345,
            "booms": [
                { "number_of_sections": 8 },
                { "number_of_sections": 4, "supports_section_control": false }
            ]
        }"#;

        let def: ImplementDef = serde_json::from_str(json).unwrap();
        assert_eq!(def.device_version, DEFAULT_DEVICE_VERSION);

        let pool = PoolBuilder::from(def).build().unwrap();
        let state = SectionControlState::from_pool(&pool).unwrap();
        assert_eq!(state.number_of_sections(), 12);
    }

    #[test]
    fn test_out_of_range_rate_ddi_fails_to_build() {
        let json = r#"{
            "device_name": "Seeder",
            "name": 1,
            "booms": [{ "target_rate_ddi": 65535 }]
        }"#;

        let def: ImplementDef = serde_json::from_str(json).unwrap();
        assert_eq!(
            PoolBuilder::from(def).build(),
            Err(BuildError::InvalidRateDdi(u16::MAX))
        );
    }

    #[test]
    fn test_missing_name_is_an_error() {
        let result = serde_json::from_str::<ImplementDef>(r#"{ "device_name": "Seeder" }"#);
        assert!(result.is_err());
    }
}
