// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Smobot device control.
//!
//! # Types
//!
//! - [`DeviceState`] - Inactive/Active/Unknown operating state
//! - [`Setpoint`] - Target grill temperature (180-600)

mod device_state;
mod setpoint;

pub use device_state::DeviceState;
pub use setpoint::Setpoint;
