// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level client for a Smobot grill controller.

use parking_lot::RwLock;

use crate::error::Error;
use crate::protocol::{HttpClient, HttpConfig};
use crate::response::SmobotStatus;
use crate::types::Setpoint;

/// Endpoint returning the status snapshot.
const STATUS_ENDPOINT: &str = "smobot";
/// Endpoint accepting a new setpoint.
const SETPOINT_ENDPOINT: &str = "setgrillset";

/// A Smobot reachable on the local network.
///
/// The client owns one reusable HTTP session and the most recently fetched
/// [`SmobotStatus`]. Creating it performs no I/O. Requests are never retried;
/// every failure is returned to the caller.
///
/// Methods take `&self`, but overlapping calls on one client are not
/// coordinated: the last completed refresh wins the cache.
///
/// # Examples
///
/// ```no_run
/// use smobot_lib::Smobot;
///
/// # async fn example() -> smobot_lib::Result<()> {
/// let smobot = Smobot::new("192.168.1.60")?;
///
/// let status = smobot.status().await?;
/// println!("grill at {}", status.grill_temp());
/// if let Some(probe) = status.food_probe_1() {
///     println!("probe 1 at {probe}");
/// }
///
/// let ack = smobot.post_setpoint(225).await?;
/// assert_eq!(ack, "OK");
///
/// smobot.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Smobot {
    address: String,
    client: HttpClient,
    status: RwLock<Option<SmobotStatus>>,
}

impl Smobot {
    /// Creates a client for the Smobot at `address` with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the address is empty or the HTTP session cannot be
    /// created.
    pub fn new(address: impl Into<String>) -> Result<Self, Error> {
        Self::with_config(HttpConfig::new(address))
    }

    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP session cannot be
    /// created.
    pub fn with_config(config: HttpConfig) -> Result<Self, Error> {
        let address = config.host().to_string();
        let client = config.into_client().map_err(Error::Protocol)?;

        tracing::debug!(address = %address, base_url = %client.base_url(), "Created Smobot client");

        Ok(Self {
            address,
            client,
            status: RwLock::new(None),
        })
    }

    /// Returns the address the client was created with.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the API base URL, `http://<address>/ajax/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Returns the cached status without contacting the device.
    #[must_use]
    pub fn cached_status(&self) -> Option<SmobotStatus> {
        self.status.read().clone()
    }

    /// Returns the cached status, fetching it first if none is cached.
    ///
    /// Once a snapshot exists this never contacts the device again, however
    /// old the snapshot is. Use [`update_status`](Self::update_status) to
    /// force a refresh.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`update_status`](Self::update_status) when a
    /// fetch is needed.
    pub async fn status(&self) -> Result<SmobotStatus, Error> {
        if let Some(status) = self.cached_status() {
            tracing::trace!(address = %self.address, "Serving cached status");
            return Ok(status);
        }
        self.update_status().await
    }

    /// Fetches a fresh status from the device and replaces the cache.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the request fails or the device answers
    /// with a non-success status, and `Error::Parse` if the body is not a
    /// complete status object. The cache is left untouched on error.
    pub async fn update_status(&self) -> Result<SmobotStatus, Error> {
        let body = self.client.get(STATUS_ENDPOINT).await?;
        let status = SmobotStatus::from_json(&body)?;

        tracing::debug!(
            address = %self.address,
            state = %status.state(),
            grill_temp = status.grill_temp(),
            "Updated status"
        );

        *self.status.write() = Some(status.clone());
        Ok(status)
    }

    /// Sends a new target temperature and returns the device's plain-text
    /// acknowledgment verbatim.
    ///
    /// The device accepts any value and silently coerces it, so the range
    /// check happens here, before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if `value` is outside 180-600 (no request is
    /// made), or `Error::Protocol` if the request fails.
    pub async fn post_setpoint(&self, value: i32) -> Result<String, Error> {
        let setpoint = Setpoint::new(value).inspect_err(|e| {
            tracing::warn!(address = %self.address, error = %e, "Rejected setpoint");
        })?;
        self.set_setpoint(setpoint).await
    }

    /// Sends an already validated target temperature.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the request fails.
    pub async fn set_setpoint(&self, setpoint: Setpoint) -> Result<String, Error> {
        let value = setpoint.to_string();
        let ack = self
            .client
            .post_form(SETPOINT_ENDPOINT, &[("setpoint", &value)])
            .await?;
        Ok(ack)
    }

    /// Releases the HTTP session.
    ///
    /// Dropping the client has the same effect.
    pub fn close(self) {
        tracing::debug!(address = %self.address, "Closing Smobot client");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProtocolError, ValueError};

    #[test]
    fn new_builds_base_url() {
        let smobot = Smobot::new("192.168.1.60").unwrap();
        assert_eq!(smobot.address(), "192.168.1.60");
        assert_eq!(smobot.base_url(), "http://192.168.1.60/ajax/");
        assert!(smobot.cached_status().is_none());
    }

    #[test]
    fn empty_address_is_rejected() {
        assert!(matches!(
            Smobot::new(""),
            Err(Error::Protocol(ProtocolError::InvalidAddress(_)))
        ));
    }

    #[tokio::test]
    async fn out_of_range_setpoint_fails_before_any_request() {
        // Nothing listens on this address; reaching the network would fail
        // with a protocol error instead.
        let smobot = Smobot::new("127.0.0.1:9").unwrap();

        for value in [i32::MIN, -1, 0, 179, 601, 1000, i32::MAX] {
            let err = smobot.post_setpoint(value).await.unwrap_err();
            assert!(matches!(
                err,
                Error::Value(ValueError::OutOfRange { min: 180, max: 600, actual }) if actual == value
            ));
        }
    }
}
