use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use url::Url;

/// A comic record as returned by the API.
///
/// Only `num`, `title` and `img` are interpreted; everything else the API
/// sends is kept in `extra` and handed to the view untouched.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Comic {
    pub num: u32,
    pub title: String,
    pub img: Url,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What to ask the API for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTarget {
    Latest,
    Number(u32),
}

impl fmt::Display for ApiTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiTarget::Latest => f.write_str("latest"),
            ApiTarget::Number(n) => write!(f, "{}", n),
        }
    }
}
