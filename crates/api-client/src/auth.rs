use crate::error::ApiError;
use reqwest::header::{HeaderMap, HeaderValue};

const KEY_ID_HEADER: &str = "APCA-API-KEY-ID";
const SECRET_KEY_HEADER: &str = "APCA-API-SECRET-KEY";

/// Builds the authentication headers sent with every brokerage request.
///
/// The broker authenticates with a key-id/secret pair in plain headers rather
/// than a request signature. The secret header is marked sensitive so it is
/// never printed by `reqwest`'s debug output.
pub fn auth_headers(key_id: &str, secret_key: &str) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();

    let key_value = HeaderValue::from_str(key_id)
        .map_err(|_| ApiError::Credentials("key id contains invalid header characters".to_string()))?;
    let mut secret_value = HeaderValue::from_str(secret_key)
        .map_err(|_| ApiError::Credentials("secret key contains invalid header characters".to_string()))?;
    secret_value.set_sensitive(true);

    headers.insert(KEY_ID_HEADER, key_value);
    headers.insert(SECRET_KEY_HEADER, secret_value);
    Ok(headers)
}
