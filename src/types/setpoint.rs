// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Setpoint type for grill temperature control.
//!
//! The device accepts any integer and silently coerces values it does not
//! like, so the only range protection is the one enforced here.

use std::fmt;

use crate::error::ValueError;

/// Target grill temperature accepted by the device (180-600).
///
/// The device never reports which unit it is configured for, so the value is
/// kept as an opaque bounded integer. The default firmware range matches
/// degrees Fahrenheit.
///
/// # Examples
///
/// ```
/// use smobot_lib::types::Setpoint;
///
/// let sp = Setpoint::new(225).unwrap();
/// assert_eq!(sp.value(), 225);
///
/// assert_eq!(Setpoint::MIN.value(), 180);
/// assert_eq!(Setpoint::MAX.value(), 600);
///
/// // Bounds are inclusive
/// assert!(Setpoint::new(179).is_err());
/// assert!(Setpoint::new(601).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Setpoint(i32);

impl Setpoint {
    /// Lowest setpoint the client will send.
    pub const MIN: Self = Self(180);

    /// Highest setpoint the client will send.
    pub const MAX: Self = Self(600);

    /// Creates a new setpoint.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside 180-600.
    pub fn new(value: i32) -> Result<Self, ValueError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: Self::MIN.0,
                max: Self::MAX.0,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Returns the setpoint value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Setpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Setpoint {
    type Error = ValueError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setpoint_valid_values() {
        for v in 180..=600 {
            assert_eq!(Setpoint::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn setpoint_rejects_values_just_outside_range() {
        assert_eq!(
            Setpoint::new(179),
            Err(ValueError::OutOfRange {
                min: 180,
                max: 600,
                actual: 179
            })
        );
        assert!(Setpoint::new(601).is_err());
        assert!(Setpoint::new(0).is_err());
        assert!(Setpoint::new(-225).is_err());
        assert!(Setpoint::new(i32::MIN).is_err());
        assert!(Setpoint::new(i32::MAX).is_err());
    }

    #[test]
    fn setpoint_display() {
        assert_eq!(Setpoint::new(225).unwrap().to_string(), "225");
    }

    #[test]
    fn setpoint_try_from() {
        let sp: Setpoint = 300i32.try_into().unwrap();
        assert_eq!(sp.value(), 300);
        assert!(Setpoint::try_from(700).is_err());
    }
}
