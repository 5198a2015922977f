use serde::{Deserialize, Serialize};

use crate::firmware::Firmware;
use crate::normalize::Record;

/// A board variant of a device model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    boardconfig: String,
    platform: Option<String>,
    cpid: Option<String>,
    bdid: Option<String>,
}

impl Board {
    /// Returns the board configuration (e.g. `D421AP`).
    #[must_use]
    pub fn boardconfig(&self) -> &str {
        &self.boardconfig
    }

    /// Returns the platform codename.
    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Returns the chip identifier.
    #[must_use]
    pub fn cpid(&self) -> Option<&str> {
        self.cpid.as_deref()
    }

    /// Returns the board identifier.
    #[must_use]
    pub fn bdid(&self) -> Option<&str> {
        self.bdid.as_deref()
    }
}

impl Record for Board {
    const NAME: &'static str = "Board";
}

/// A device model together with every firmware released for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    name: String,
    identifier: String,
    boardconfig: String,
    platform: String,
    cpid: String,
    bdid: String,
    firmwares: Vec<Firmware>,
    #[serde(default)]
    boards: Vec<Board>,
}

impl Device {
    /// Returns the marketing name (e.g. `iPhone 11`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the model identifier (e.g. `iPhone12,1`).
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the board configuration.
    #[must_use]
    pub fn boardconfig(&self) -> &str {
        &self.boardconfig
    }

    /// Returns the platform codename (e.g. `t8030`).
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Returns the chip identifier.
    #[must_use]
    pub fn cpid(&self) -> &str {
        &self.cpid
    }

    /// Returns the board identifier.
    #[must_use]
    pub fn bdid(&self) -> &str {
        &self.bdid
    }

    /// Returns the firmwares in the order reported by the service.
    #[must_use]
    pub fn firmwares(&self) -> &[Firmware] {
        &self.firmwares
    }

    /// Returns the supported board variants.
    #[must_use]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }
}

impl Record for Device {
    const NAME: &'static str = "Device";
}
