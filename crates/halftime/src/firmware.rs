use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

use crate::normalize::Record;

/// An `IPSW` firmware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Firmware {
    identifier: String,
    buildid: String,
    version: String,
    url: String,
    filesize: u64,
    sha1sum: String,
    md5sum: String,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_optional")]
    releasedate: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_optional")]
    uploaddate: Option<DateTime<Utc>>,
    signed: bool,
}

impl Firmware {
    /// Returns the identifier of the target device (e.g. `iPhone12,1`).
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the build string (e.g. `19A5297e`).
    #[must_use]
    pub fn buildid(&self) -> &str {
        &self.buildid
    }

    /// Returns the operating system version (e.g. `15.0`).
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the download link.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub const fn filesize(&self) -> u64 {
        self.filesize
    }

    /// Returns the `SHA-1` digest of the file.
    #[must_use]
    pub fn sha1sum(&self) -> &str {
        &self.sha1sum
    }

    /// Returns the `MD5` digest of the file.
    #[must_use]
    pub fn md5sum(&self) -> &str {
        &self.md5sum
    }

    /// Returns the release instant.
    ///
    /// If [`None`], the service does not know it.
    #[must_use]
    pub const fn releasedate(&self) -> Option<DateTime<Utc>> {
        self.releasedate
    }

    /// Returns the upload instant.
    ///
    /// If [`None`], the service does not know it.
    #[must_use]
    pub const fn uploaddate(&self) -> Option<DateTime<Utc>> {
        self.uploaddate
    }

    /// Checks whether the firmware is still signed, and hence installable.
    #[must_use]
    pub const fn signed(&self) -> bool {
        self.signed
    }
}

impl Record for Firmware {
    const NAME: &'static str = "Firmware";
}

/// An over-the-air update.
///
/// Delta updates can only be installed on top of the prerequisite build.
/// Full updates have no prerequisites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtaFirmware {
    identifier: String,
    buildid: String,
    version: String,
    url: String,
    filesize: u64,
    prerequisitebuildid: Option<String>,
    prerequisiteversion: Option<String>,
    release_type: String,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_optional")]
    uploaddate: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_optional")]
    releasedate: Option<DateTime<Utc>>,
    signed: bool,
}

impl OtaFirmware {
    /// Returns the identifier of the target device.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the build string.
    #[must_use]
    pub fn buildid(&self) -> &str {
        &self.buildid
    }

    /// Returns the operating system version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the download link.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the payload size in bytes.
    #[must_use]
    pub const fn filesize(&self) -> u64 {
        self.filesize
    }

    /// Returns the build a device must run to receive this update.
    #[must_use]
    pub fn prerequisitebuildid(&self) -> Option<&str> {
        self.prerequisitebuildid.as_deref()
    }

    /// Returns the version a device must run to receive this update.
    #[must_use]
    pub fn prerequisiteversion(&self) -> Option<&str> {
        self.prerequisiteversion.as_deref()
    }

    /// Returns the release channel tag, such as a public or beta channel.
    #[must_use]
    pub fn release_type(&self) -> &str {
        &self.release_type
    }

    /// Returns the upload instant.
    #[must_use]
    pub const fn uploaddate(&self) -> Option<DateTime<Utc>> {
        self.uploaddate
    }

    /// Returns the release instant.
    #[must_use]
    pub const fn releasedate(&self) -> Option<DateTime<Utc>> {
        self.releasedate
    }

    /// Checks whether the update is still signed.
    #[must_use]
    pub const fn signed(&self) -> bool {
        self.signed
    }
}

impl Record for OtaFirmware {
    const NAME: &'static str = "OtaFirmware";
}
