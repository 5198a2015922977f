/// The method of a request.
///
/// Every operation of the service is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET` request.
    Get,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Get => "GET",
        }
        .fmt(f)
    }
}

/// The payload shape an operation expects from the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadShape {
    /// A `json` document.
    Json,
    /// Plain text.
    Text,
}

/// A logical operation of the service.
///
/// It is a declarative triple made of a [`Method`], an endpoint path, and
/// the expected [`PayloadShape`]. Caller-supplied identifiers are
/// substituted into the path verbatim, without any validation or escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operation {
    method: Method,
    path: String,
    shape: PayloadShape,
}

impl Operation {
    /// Device lookup: `/device/{identifier}`.
    #[must_use]
    pub fn device(identifier: &str) -> Self {
        Self::json(format!("/device/{identifier}"))
    }

    /// Firmware lookup: `/ipsw/{identifier}/{buildid}`.
    #[must_use]
    pub fn firmware(identifier: &str, buildid: &str) -> Self {
        Self::json(format!("/ipsw/{identifier}/{buildid}"))
    }

    /// Firmwares-by-version lookup: `/ipsw/{version}`.
    #[must_use]
    pub fn firmwares_by_version(version: &str) -> Self {
        Self::json(format!("/ipsw/{version}"))
    }

    /// Device keys lookup: `/keys/device/{identifier}`.
    #[must_use]
    pub fn device_keys(identifier: &str) -> Self {
        Self::json(format!("/keys/device/{identifier}"))
    }

    /// Firmware keys lookup: `/keys/ipsw/{identifier}/{buildid}`.
    #[must_use]
    pub fn firmware_keys(identifier: &str, buildid: &str) -> Self {
        Self::json(format!("/keys/ipsw/{identifier}/{buildid}"))
    }

    /// Over-the-air update lookup: `/ota/{identifier}/{buildid}`.
    #[must_use]
    pub fn ota(identifier: &str, buildid: &str) -> Self {
        Self::json(format!("/ota/{identifier}/{buildid}"))
    }

    /// Over-the-air updates-by-version lookup: `/ota/{version}`.
    #[must_use]
    pub fn otas_by_version(version: &str) -> Self {
        Self::json(format!("/ota/{version}"))
    }

    /// Over-the-air update documentation:
    /// `/ota/documentation/{identifier}/{version}`.
    #[must_use]
    pub fn ota_documentation(identifier: &str, version: &str) -> Self {
        Self {
            method: Method::Get,
            path: format!("/ota/documentation/{identifier}/{version}"),
            shape: PayloadShape::Text,
        }
    }

    /// Returns the operation [`Method`].
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Returns the endpoint path, always starting with a slash.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the expected [`PayloadShape`].
    #[must_use]
    pub const fn shape(&self) -> PayloadShape {
        self.shape
    }

    /// Joins the endpoint path to the given base address.
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}", slash_end(base), slash_start(&self.path))
    }

    const fn json(path: String) -> Self {
        Self {
            method: Method::Get,
            path,
            shape: PayloadShape::Json,
        }
    }
}

fn slash_end(s: &str) -> &str {
    if s.len() > 1 && s.ends_with('/') {
        &s[..s.len() - 1]
    } else {
        s
    }
}

fn slash_start(s: &str) -> &str {
    if s.len() > 1 && s.starts_with('/') {
        &s[1..]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::{Method, Operation, PayloadShape};

    const BASE: &str = "https://api.ipsw.me/v4";
    const BASE_WITH_SLASH: &str = "https://api.ipsw.me/v4/";

    fn json_operation(operation: &Operation, path: &str) {
        assert_eq!(operation.method(), Method::Get);
        assert_eq!(operation.path(), path);
        assert_eq!(operation.shape(), PayloadShape::Json);
    }

    #[test]
    fn endpoint_templates() {
        json_operation(&Operation::device("iPhone12,1"), "/device/iPhone12,1");
        json_operation(
            &Operation::firmware("iPhone12,1", "19A5297e"),
            "/ipsw/iPhone12,1/19A5297e",
        );
        json_operation(&Operation::firmwares_by_version("15.0"), "/ipsw/15.0");
        json_operation(
            &Operation::device_keys("iPhone12,1"),
            "/keys/device/iPhone12,1",
        );
        json_operation(
            &Operation::firmware_keys("iPhone12,1", "19A346"),
            "/keys/ipsw/iPhone12,1/19A346",
        );
        json_operation(&Operation::ota("iPhone12,1", "19B74"), "/ota/iPhone12,1/19B74");
        json_operation(&Operation::otas_by_version("15.1"), "/ota/15.1");
    }

    #[test]
    fn documentation_is_plain_text() {
        let operation = Operation::ota_documentation("iPhone12,1", "15.1");

        assert_eq!(operation.method(), Method::Get);
        assert_eq!(operation.path(), "/ota/documentation/iPhone12,1/15.1");
        assert_eq!(operation.shape(), PayloadShape::Text);
    }

    #[test]
    fn identifiers_are_not_escaped() {
        assert_eq!(
            Operation::device("iPhone 12/1").path(),
            "/device/iPhone 12/1"
        );
    }

    #[test]
    fn join_with_base() {
        let operation = Operation::device("iPhone12,1");

        assert_eq!(
            operation.url(BASE),
            "https://api.ipsw.me/v4/device/iPhone12,1"
        );
        assert_eq!(
            operation.url(BASE_WITH_SLASH),
            "https://api.ipsw.me/v4/device/iPhone12,1"
        );
    }

    #[test]
    fn method_name() {
        assert_eq!(Method::Get.to_string(), "GET");
    }
}
