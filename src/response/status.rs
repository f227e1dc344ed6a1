// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status response parsing.
//!
//! `GET /ajax/smobot` returns one flat JSON object with seventeen terse keys:
//!
//! ```text
//! {"time":"00:00:00","grl":22,"fd1":999,"fd2":999,"err":999,"p":999,"i":999,
//!  "d":999,"dpr":999,"ld":1,"set":220,"ds":0,"sot":0,"kp":110,"ki":50,
//!  "kd":100,"flg":0}
//! ```
//!
//! [`SmobotStatus`] stores those values untouched under descriptive names and
//! layers the device's conventions on top: the `999` "no probe" sentinel and
//! fields that only carry meaning while the controller is active.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::Deserialize;

use crate::error::{LookupError, ParseError};
use crate::types::DeviceState;

/// Raw value reported by a food probe with nothing plugged in.
pub const PROBE_DISCONNECTED: i32 = 999;

/// One immutable reading of the controller status.
///
/// Deserialization requires all seventeen device fields and rejects any
/// extra ones, so a snapshot is never partially populated.
///
/// # Examples
///
/// ```
/// use smobot_lib::response::SmobotStatus;
/// use smobot_lib::types::DeviceState;
///
/// let status = SmobotStatus::from_json(r#"{
///     "time": "12:00:00", "grl": 200, "fd1": 999, "fd2": 150,
///     "err": 0, "p": 0, "i": 0, "d": 0, "dpr": 50, "ld": 0,
///     "set": 225, "ds": 1, "sot": 0, "kp": 110, "ki": 50, "kd": 100, "flg": 0
/// }"#).unwrap();
///
/// assert_eq!(status.state(), DeviceState::Active);
/// assert_eq!(status.grill_temp(), 200);
/// assert_eq!(status.food_probe_1(), None);
/// assert_eq!(status.food_probe_2(), Some(150));
/// assert_eq!(status.setpoint(), Some(225));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmobotStatus {
    time: String,
    #[serde(rename = "grl")]
    grill_temp: i32,
    #[serde(rename = "set")]
    setpoint: i32,
    #[serde(rename = "fd1")]
    food_probe_1: i32,
    #[serde(rename = "fd2")]
    food_probe_2: i32,
    #[serde(rename = "dpr")]
    damper: i32,
    #[serde(rename = "ld")]
    lid: i32,
    #[serde(rename = "ds")]
    state: i32,
    sot: i32,
    #[serde(rename = "flg")]
    flags: i32,

    // PID state and coefficients
    err: i32,
    p: i32,
    i: i32,
    d: i32,
    kp: i32,
    ki: i32,
    kd: i32,
}

impl SmobotStatus {
    /// Parses a status snapshot from the JSON body of `GET /ajax/smobot`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the body is not a JSON object holding
    /// exactly the seventeen status fields with the expected types.
    pub fn from_json(body: &str) -> Result<Self, ParseError> {
        serde_json::from_str(body).map_err(Into::into)
    }

    /// Returns the decoded operating state.
    #[must_use]
    pub const fn state(&self) -> DeviceState {
        DeviceState::from_raw(self.state)
    }

    /// Returns the grill temperature. Valid in every state.
    #[must_use]
    pub const fn grill_temp(&self) -> i32 {
        self.grill_temp
    }

    /// Returns the target temperature, if the controller is active.
    #[must_use]
    pub const fn setpoint(&self) -> Option<i32> {
        self.when_active(self.setpoint)
    }

    /// Returns the first food probe reading, if a probe is attached.
    #[must_use]
    pub const fn food_probe_1(&self) -> Option<i32> {
        probe_reading(self.food_probe_1)
    }

    /// Returns the second food probe reading, if a probe is attached.
    #[must_use]
    pub const fn food_probe_2(&self) -> Option<i32> {
        probe_reading(self.food_probe_2)
    }

    /// Returns the damper position, if the controller is active.
    #[must_use]
    pub const fn damper(&self) -> Option<i32> {
        self.when_active(self.damper)
    }

    /// Returns the lid flag, if the controller is active.
    #[must_use]
    pub const fn lid(&self) -> Option<i32> {
        self.when_active(self.lid)
    }

    /// Returns the proportional term of the control loop, if active.
    #[must_use]
    pub const fn pid_p(&self) -> Option<i32> {
        self.when_active(self.p)
    }

    /// Returns the integral term of the control loop, if active.
    #[must_use]
    pub const fn pid_i(&self) -> Option<i32> {
        self.when_active(self.i)
    }

    /// Returns the derivative term of the control loop, if active.
    #[must_use]
    pub const fn pid_d(&self) -> Option<i32> {
        self.when_active(self.d)
    }

    /// Returns the PID tuning coefficients.
    ///
    /// Unlike the loop terms, the device reports these in every state.
    #[must_use]
    pub const fn pid_coefficients(&self) -> PidCoefficients {
        PidCoefficients {
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
        }
    }

    /// Returns the device clock as reported (`HH:MM:SS`).
    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Parses the device clock, returning `None` if it is not `HH:MM:SS`.
    #[must_use]
    pub fn clock_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.time, "%H:%M:%S").ok()
    }

    /// Returns the stored value of a field by name.
    ///
    /// Only the descriptive keys (`grill_temp`, `food_probe_1`, `flags`, ...)
    /// are known; the device's terse wire names (`grl`, `fd1`, ...) are not.
    /// This is the way to read fields without a dedicated accessor such as
    /// `err`, `sot` and `flags`, and to read gated fields regardless of state.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::UnknownField` for any other name.
    ///
    /// # Examples
    ///
    /// ```
    /// use smobot_lib::response::{RawValue, SmobotStatus};
    ///
    /// # let status = SmobotStatus::from_json(r#"{
    /// #     "time": "12:00:00", "grl": 200, "fd1": 999, "fd2": 150,
    /// #     "err": 0, "p": 0, "i": 0, "d": 0, "dpr": 50, "ld": 0,
    /// #     "set": 225, "ds": 0, "sot": 0, "kp": 110, "ki": 50, "kd": 100, "flg": 4
    /// # }"#).unwrap();
    /// assert_eq!(status.raw("flags").unwrap(), RawValue::Integer(4));
    /// assert_eq!(status.raw("setpoint").unwrap(), RawValue::Integer(225));
    /// assert!(status.raw("set").is_err());
    /// assert!(status.raw("humidity").is_err());
    /// ```
    pub fn raw(&self, name: &str) -> Result<RawValue<'_>, LookupError> {
        name.parse::<StatusField>().map(|field| self.field(field))
    }

    /// Returns the stored value of a field.
    #[must_use]
    pub fn field(&self, field: StatusField) -> RawValue<'_> {
        let value = match field {
            StatusField::Time => return RawValue::Text(&self.time),
            StatusField::GrillTemp => self.grill_temp,
            StatusField::Setpoint => self.setpoint,
            StatusField::FoodProbe1 => self.food_probe_1,
            StatusField::FoodProbe2 => self.food_probe_2,
            StatusField::Damper => self.damper,
            StatusField::Lid => self.lid,
            StatusField::State => self.state,
            StatusField::Sot => self.sot,
            StatusField::Flags => self.flags,
            StatusField::PidError => self.err,
            StatusField::P => self.p,
            StatusField::I => self.i,
            StatusField::D => self.d,
            StatusField::Kp => self.kp,
            StatusField::Ki => self.ki,
            StatusField::Kd => self.kd,
        };
        RawValue::Integer(value)
    }

    const fn when_active(&self, value: i32) -> Option<i32> {
        if self.state().is_active() {
            Some(value)
        } else {
            None
        }
    }
}

const fn probe_reading(raw: i32) -> Option<i32> {
    if raw == PROBE_DISCONNECTED {
        None
    } else {
        Some(raw)
    }
}

/// PID tuning coefficients reported by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PidCoefficients {
    /// Proportional gain.
    pub kp: i32,
    /// Integral gain.
    pub ki: i32,
    /// Derivative gain.
    pub kd: i32,
}

/// A value stored in a [`SmobotStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue<'a> {
    /// The device clock, the only textual field.
    Text(&'a str),
    /// Every other field.
    Integer(i32),
}

impl RawValue<'_> {
    /// Returns the integer value, or `None` for text.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Returns the text value, or `None` for integers.
    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(*s),
            Self::Integer(_) => None,
        }
    }
}

impl fmt::Display for RawValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(v) => write!(f, "{v}"),
        }
    }
}

/// The seventeen fields of a status snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusField {
    /// Device clock.
    Time,
    /// Grill temperature.
    GrillTemp,
    /// Target temperature.
    Setpoint,
    /// First food probe.
    FoodProbe1,
    /// Second food probe.
    FoodProbe2,
    /// Damper position.
    Damper,
    /// Lid open/closed flag.
    Lid,
    /// Operating state.
    State,
    /// Unlabeled field reported by the device.
    Sot,
    /// Flags bitfield.
    Flags,
    /// Control-loop error term.
    PidError,
    /// Proportional term.
    P,
    /// Integral term.
    I,
    /// Derivative term.
    D,
    /// Proportional gain.
    Kp,
    /// Integral gain.
    Ki,
    /// Derivative gain.
    Kd,
}

impl StatusField {
    /// All fields, in storage order.
    pub const ALL: [Self; 17] = [
        Self::Time,
        Self::GrillTemp,
        Self::Setpoint,
        Self::FoodProbe1,
        Self::FoodProbe2,
        Self::Damper,
        Self::Lid,
        Self::State,
        Self::Sot,
        Self::Flags,
        Self::PidError,
        Self::P,
        Self::I,
        Self::D,
        Self::Kp,
        Self::Ki,
        Self::Kd,
    ];

    /// Returns the descriptive key used by [`SmobotStatus::raw`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::GrillTemp => "grill_temp",
            Self::Setpoint => "setpoint",
            Self::FoodProbe1 => "food_probe_1",
            Self::FoodProbe2 => "food_probe_2",
            Self::Damper => "damper",
            Self::Lid => "lid",
            Self::State => "state",
            Self::Sot => "sot",
            Self::Flags => "flags",
            Self::PidError => "err",
            Self::P => "p",
            Self::I => "i",
            Self::D => "d",
            Self::Kp => "kp",
            Self::Ki => "ki",
            Self::Kd => "kd",
        }
    }

    /// Returns the key the device uses in its JSON payload.
    ///
    /// Wire names are not accepted by [`SmobotStatus::raw`].
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::GrillTemp => "grl",
            Self::Setpoint => "set",
            Self::FoodProbe1 => "fd1",
            Self::FoodProbe2 => "fd2",
            Self::Damper => "dpr",
            Self::Lid => "ld",
            Self::State => "ds",
            Self::Flags => "flg",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for StatusField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusField {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| LookupError::UnknownField(s.to_string()))
    }
}
