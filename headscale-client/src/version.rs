/// Admin API versions understood by this client.
///
/// The version picks the fixed path prefix every call is rooted under, e.g.
/// `/api/v1`. A closed enum keeps the prefix total: there is no way to hold
/// a version the client cannot build URLs for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiVersion {
    /// The v1 admin API.
    #[default]
    V1,
}

impl ApiVersion {
    /// Short version identifier as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
        }
    }

    /// Path prefix for this version, e.g. `/api/v1`.
    pub fn base_path(self) -> &'static str {
        match self {
            ApiVersion::V1 => "/api/v1",
        }
    }

    /// The prefix as individual path segments, for URL joining.
    pub(crate) fn path_segments(self) -> [&'static str; 2] {
        ["api", self.as_str()]
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_path_is_versioned() {
        assert_eq!(ApiVersion::V1.base_path(), "/api/v1");
        assert_eq!(ApiVersion::V1.to_string(), "v1");
    }

    #[test]
    fn default_is_v1() {
        assert_eq!(ApiVersion::default(), ApiVersion::V1);
    }
}
