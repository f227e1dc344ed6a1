// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating state reported by the controller.

use std::fmt;

/// Operating state decoded from the raw `ds` status field.
///
/// The device only documents `0` and `1`. Every other value, including the
/// `-1` sentinel, decodes to [`DeviceState::Unknown`].
///
/// # Examples
///
/// ```
/// use smobot_lib::types::DeviceState;
///
/// assert_eq!(DeviceState::from_raw(0), DeviceState::Inactive);
/// assert_eq!(DeviceState::from_raw(1), DeviceState::Active);
/// assert_eq!(DeviceState::from_raw(-1), DeviceState::Unknown);
/// assert_eq!(DeviceState::from_raw(5), DeviceState::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceState {
    /// The controller is idle; control-loop fields are meaningless.
    Inactive,
    /// The controller is actively driving the grill towards its setpoint.
    Active,
    /// Any raw value the device does not document.
    Unknown,
}

impl DeviceState {
    /// Decodes a raw state value. Never fails.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Inactive,
            1 => Self::Active,
            _ => Self::Unknown,
        }
    }

    /// Returns `true` when the device is actively cooking.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns the lowercase name of the state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<i32> for DeviceState {
    fn from(raw: i32) -> Self {
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_values() {
        assert_eq!(DeviceState::from(0), DeviceState::Inactive);
        assert_eq!(DeviceState::from(1), DeviceState::Active);
    }

    #[test]
    fn undocumented_values_are_unknown() {
        for raw in [-1, 2, 5, 999, i32::MIN, i32::MAX] {
            assert_eq!(DeviceState::from_raw(raw), DeviceState::Unknown);
        }
    }

    #[test]
    fn only_active_is_active() {
        assert!(DeviceState::Active.is_active());
        assert!(!DeviceState::Inactive.is_active());
        assert!(!DeviceState::Unknown.is_active());
    }

    #[test]
    fn display() {
        assert_eq!(DeviceState::Active.to_string(), "active");
        assert_eq!(DeviceState::Inactive.to_string(), "inactive");
        assert_eq!(DeviceState::Unknown.to_string(), "unknown");
    }
}
