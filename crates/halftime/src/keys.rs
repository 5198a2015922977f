use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

use crate::normalize::Record;

/// Decryption material for a single firmware image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    image: String,
    filename: String,
    kbag: String,
    key: String,
    iv: String,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_optional")]
    date: Option<DateTime<Utc>>,
}

impl Key {
    /// Returns the image name (e.g. `GlyphCharging`).
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns the full path of the image inside the firmware archive.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the wrapped key blob.
    #[must_use]
    pub fn kbag(&self) -> &str {
        &self.kbag
    }

    /// Returns the unwrapped key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the initialization vector.
    #[must_use]
    pub fn iv(&self) -> &str {
        &self.iv
    }

    /// Returns the instant the key was added.
    #[must_use]
    pub const fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }
}

impl Record for Key {
    const NAME: &'static str = "Key";
}

/// The decryption keys of a firmware build for a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet {
    identifier: String,
    buildid: String,
    codename: String,
    baseband: Option<String>,
    updateramdiskexists: bool,
    restoreramdiskexists: bool,
    #[serde(default)]
    keys: Vec<Key>,
}

impl KeySet {
    /// Returns the device identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the build string.
    #[must_use]
    pub fn buildid(&self) -> &str {
        &self.buildid
    }

    /// Returns the firmware codename.
    #[must_use]
    pub fn codename(&self) -> &str {
        &self.codename
    }

    /// Returns the baseband identifier.
    ///
    /// If [`None`], the device has no cellular baseband.
    #[must_use]
    pub fn baseband(&self) -> Option<&str> {
        self.baseband.as_deref()
    }

    /// Checks whether the firmware ships an update RAM disk.
    #[must_use]
    pub const fn updateramdiskexists(&self) -> bool {
        self.updateramdiskexists
    }

    /// Checks whether the firmware ships a restore RAM disk.
    #[must_use]
    pub const fn restoreramdiskexists(&self) -> bool {
        self.restoreramdiskexists
    }

    /// Returns the per-image keys.
    ///
    /// Device-level listings may omit them, in which case the slice is
    /// empty.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }
}

impl Record for KeySet {
    const NAME: &'static str = "KeySet";
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use serde_json::{Value, json};

    use crate::error::{NormalizationCause, NormalizationError};
    use crate::normalize::{normalize, normalize_list};

    use super::KeySet;

    fn key_payload(image: &str) -> Value {
        json!({
            "image": image,
            "filename": format!("Firmware/all_flash/{image}.im4p"),
            "kbag": "kbag",
            "key": "key",
            "iv": "iv",
            "date": "2021-09-21T08:30:00Z",
        })
    }

    fn keyset_payload(keys: Option<Value>) -> Value {
        let mut payload = json!({
            "identifier": "iPhone12,1",
            "buildid": "19A346",
            "codename": "Sky",
            "baseband": null,
            "updateramdiskexists": true,
            "restoreramdiskexists": false,
        });
        if let Some(keys) = keys {
            payload["keys"] = keys;
        }
        payload
    }

    #[test]
    fn keyset_with_keys() {
        let keyset = normalize::<KeySet>(keyset_payload(Some(json!([
            key_payload("GlyphCharging"),
            key_payload("iBoot"),
            key_payload("LLB"),
        ]))))
        .unwrap();

        assert_eq!(keyset.identifier(), "iPhone12,1");
        assert_eq!(keyset.buildid(), "19A346");
        assert_eq!(keyset.codename(), "Sky");
        assert_eq!(keyset.baseband(), None);
        assert!(keyset.updateramdiskexists());
        assert!(!keyset.restoreramdiskexists());

        let images: Vec<&str> = keyset.keys().iter().map(|key| key.image()).collect();
        assert_eq!(images, ["GlyphCharging", "iBoot", "LLB"]);

        let key = &keyset.keys()[1];
        assert_eq!(key.filename(), "Firmware/all_flash/iBoot.im4p");
        assert_eq!(key.kbag(), "kbag");
        assert_eq!(key.key(), "key");
        assert_eq!(key.iv(), "iv");
        assert_eq!(
            key.date(),
            Some(Utc.with_ymd_and_hms(2021, 9, 21, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn device_level_keysets() {
        let keysets = normalize_list::<KeySet>(json!([
            keyset_payload(None),
            keyset_payload(Some(json!([]))),
        ]))
        .unwrap();

        assert_eq!(keysets.len(), 2);
        assert!(keysets.iter().all(|keyset| keyset.keys().is_empty()));
    }

    #[test]
    fn broken_key() {
        let mut broken = key_payload("iBoot");
        broken.as_object_mut().unwrap().remove("iv");

        assert_eq!(
            normalize::<KeySet>(keyset_payload(Some(json!([broken])))),
            Err(NormalizationError::new(
                "KeySet",
                "keys[0].iv",
                NormalizationCause::Missing
            ))
        );
    }
}
