// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport for communicating with Smobot devices.
//!
//! The device exposes a tiny HTTP API under `/ajax/`:
//!
//! - `GET /ajax/smobot` returns the status as a flat JSON object
//! - `POST /ajax/setgrillset` with `setpoint=<value>` changes the target
//!   temperature and answers with plain text

mod http;

pub use http::{HttpClient, HttpConfig};
