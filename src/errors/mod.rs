use thiserror::Error;

/// Error type that occurs when a response cannot be turned into the expected value.
#[derive(Debug, Error)]
pub enum APIError {
    /// Occurs when Reddit reports a problem in the `json.errors` array of a response. The
    /// message is the first reported error, e.g. `BAD_SR_NAME,that name isn't going to work,sr`.
    #[error("{0}")]
    RedditError(String),
    /// Occurs if JSON parsing fails, either for a response body or for a `HydrationOptions`
    /// document.
    #[error("The JSON sent by Reddit did not match what rawr was expecting: {0}")]
    JSONError(#[from] serde_json::Error),
    /// Occurs if a field that was expected to exist is missing, e.g. when a listing transform
    /// points at `comments[0].replies` but the response has no comments.
    #[error("Missing field `{0}`")]
    MissingField(String),
}

#[cfg(test)]
mod tests {
    use super::APIError;

    #[test]
    fn reddit_error_displays_message_only() {
        let err = APIError::RedditError(String::from("bad"));
        assert_eq!(err.to_string(), "bad");
    }

    #[test]
    fn json_error_converts() {
        let err: APIError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        match err {
            APIError::JSONError(_) => {}
            other => panic!("unexpected error {:?}", other),
        }
    }
}
