// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smobot Lib - A Rust library to read and control Smobot grill controllers.
//!
//! The Smobot exposes a small HTTP API on the local network. This library
//! reads its status into a typed [`SmobotStatus`] and sends new temperature
//! setpoints after checking them against the supported range.
//!
//! # Status Interpretation
//!
//! The device reports seventeen raw fields. [`SmobotStatus`] keeps them all
//! and applies the device conventions on top:
//!
//! - **Food probes** report `999` when unplugged, exposed as `None`
//! - **Control-loop fields** (setpoint, damper, lid, PID terms) only mean
//!   something while the controller is [`DeviceState::Active`] and are `None`
//!   otherwise
//! - **Everything else** stays reachable through [`SmobotStatus::raw`]
//!
//! # Quick Start
//!
//! ```no_run
//! use smobot_lib::Smobot;
//!
//! #[tokio::main]
//! async fn main() -> smobot_lib::Result<()> {
//!     let smobot = Smobot::new("192.168.1.60")?;
//!
//!     // Fetched on first use, cached afterwards
//!     let status = smobot.status().await?;
//!     println!("{} at {}", status.state(), status.grill_temp());
//!
//!     // Force a new reading
//!     let status = smobot.update_status().await?;
//!     if let Some(setpoint) = status.setpoint() {
//!         println!("cooking towards {setpoint}");
//!     }
//!
//!     // Values outside 180-600 are rejected without contacting the device
//!     smobot.post_setpoint(225).await?;
//!
//!     smobot.close();
//!     Ok(())
//! }
//! ```

#[cfg(feature = "http")]
mod device;
pub mod error;
#[cfg(feature = "http")]
pub mod protocol;
pub mod response;
pub mod types;

#[cfg(feature = "http")]
pub use device::Smobot;
pub use error::{Error, LookupError, ParseError, ProtocolError, Result, ValueError};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use response::{PidCoefficients, RawValue, SmobotStatus, StatusField};
pub use types::{DeviceState, Setpoint};
