//! # tc-ddop
//!
//! Device descriptor object pool and section control process data for an
//! ISO 11783 Task Controller client.
//!
//! Build the object pool once from boom configurations, size a
//! [state::SectionControlState] from it, then let the task controller client
//! drive a [dispatch::Dispatcher] with value requests and commands. Condensed
//! work state DDIs pack 16 sections per 32-bit value via [condensed].
//!
//! ## Example
//!
//! ```
//! use tc_ddop::builder::{BoomConfig, DeviceIdentity, PoolBuilder};
//! use tc_ddop::dispatch::{Dispatcher, ValueHandler};
//! use tc_ddop::state::SectionControlState;
//! use tc_ddop::ddi;
//!
//! let pool = PoolBuilder::new(DeviceIdentity::new(0xA000_8200_0012_3456, "Sprayer"))
//!     .boom(BoomConfig { number_of_sections: 10, ..Default::default() })
//!     .build()
//!     .unwrap();
//!
//! let mut state = SectionControlState::from_pool(&pool).unwrap();
//! let dispatcher = Dispatcher::for_pool(&pool).unwrap();
//! let mut handler = dispatcher.bind(&mut state);
//!
//! handler.command_value(2, ddi::SECTION_CONTROL_STATE, 1);
//! handler.command_value(2, ddi::SETPOINT_CONDENSED_WORK_STATE_1_16, 0b01);
//! assert_eq!(handler.request_value(2, ddi::ACTUAL_CONDENSED_WORK_STATE_1_16), Some(0xFFF0_0001u32 as i32));
//! ```

pub mod builder;
pub mod condensed;
pub mod ddi;
pub mod dispatch;
pub mod errors;
pub mod ids;
pub mod object;
pub mod pool;
pub mod serialize;
pub mod state;

#[cfg(feature = "serde")]
pub mod serde;
