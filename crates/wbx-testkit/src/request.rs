use std::collections::BTreeMap;

use serde_json::Value;

/// A request as seen by the fake, with query and form parameters merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub params: BTreeMap<String, String>,
    /// Raw `Cookie` header, if the client sent one.
    pub cookie: Option<String>,
}

impl RecordedRequest {
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.param("action")
    }

    /// The `data` parameter of a write, parsed as JSON.
    #[must_use]
    pub fn data_json(&self) -> Option<Value> {
        self.param("data")
            .and_then(|data| serde_json::from_str(data).ok())
    }

    #[must_use]
    pub fn has_session_cookie(&self) -> bool {
        self.cookie
            .as_deref()
            .is_some_and(|cookie| cookie.contains(crate::SESSION_COOKIE))
    }
}

/// Decode an `application/x-www-form-urlencoded` string into `params`.
pub(crate) fn parse_urlencoded(input: &str, params: &mut BTreeMap<String, String>) {
    for pair in input.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(decode(key), decode(value));
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or(spaced.clone(), std::borrow::Cow::into_owned)
}
