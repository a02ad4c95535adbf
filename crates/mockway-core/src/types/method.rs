//! HTTP methods a mock rule can be keyed on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP method for rule matching
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method token outside the supported enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    /// Case-insensitive, so rule files may say `get` or `Post`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = UnknownMethod;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("GET", HttpMethod::Get)]
    #[case("get", HttpMethod::Get)]
    #[case("Post", HttpMethod::Post)]
    #[case("put", HttpMethod::Put)]
    #[case("PATCH", HttpMethod::Patch)]
    #[case("delete", HttpMethod::Delete)]
    #[case("HEAD", HttpMethod::Head)]
    #[case("options", HttpMethod::Options)]
    fn test_http_method_parse(#[case] input: &str, #[case] expected: HttpMethod) {
        assert_eq!(input.parse::<HttpMethod>(), Ok(expected));
    }

    #[rstest]
    #[case("TRACE")]
    #[case("CONNECT")]
    #[case("")]
    #[case("GETS")]
    fn test_http_method_parse_unknown(#[case] input: &str) {
        let err = input.parse::<HttpMethod>().unwrap_err();
        assert_eq!(err, UnknownMethod(input.to_string()));
    }

    #[rstest]
    fn test_http_method_serializes_uppercase() {
        let json = serde_json::to_string(&HttpMethod::Delete).expect("Should serialize");
        assert_eq!(json, "\"DELETE\"");
    }

    #[rstest]
    #[case("\"post\"", HttpMethod::Post)]
    #[case("\"OPTIONS\"", HttpMethod::Options)]
    fn test_http_method_deserializes_any_case(#[case] json: &str, #[case] expected: HttpMethod) {
        let method: HttpMethod = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(method, expected);
    }

    #[rstest]
    fn test_http_method_defaults_to_get() {
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }
}
