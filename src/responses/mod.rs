#![allow(missing_docs)]

use serde::Deserialize;
use serde_json::Value;

/// The `{"json": {"errors": [...], "data": ...}}` envelope that `api_type=json` endpoints reply
/// with. Both levels tolerate missing keys, since Reddit omits `data` when a request failed.
#[derive(Deserialize, Debug)]
pub struct JSONWrapper<T> {
    #[serde(default = "JSONInner::empty")]
    pub json: JSONInner<T>,
}

#[derive(Deserialize, Debug)]
pub struct JSONInner<T> {
    #[serde(default)]
    pub errors: Vec<Value>,
    pub data: Option<T>,
}

impl<T> JSONInner<T> {
    fn empty() -> JSONInner<T> {
        JSONInner {
            errors: vec![],
            data: None,
        }
    }
}

/// Payload of `/api/morechildren`: a flat list of comment and `more` envelopes.
#[derive(Deserialize, Debug, Default)]
pub struct ThingList {
    #[serde(default)]
    pub things: Vec<Value>,
}

pub type MoreChildren = JSONWrapper<ThingList>;
