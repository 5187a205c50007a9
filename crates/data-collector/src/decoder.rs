// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::config::ResponseType;
use crate::error::DecodeError;
use crate::path_value::PathValue;
use crate::transport::HttpResponse;

/// Decodes the response body as declared by `response_type`.
///
/// `Text` never fails; invalid UTF-8 is replaced rather than rejected.
pub fn decode(
    response: &HttpResponse,
    response_type: ResponseType,
) -> Result<PathValue, DecodeError> {
    match response_type {
        ResponseType::Json => {
            let value: serde_json::Value = serde_json::from_slice(&response.body)?;
            Ok(PathValue::from(value))
        }
        ResponseType::Text => Ok(PathValue::String(
            String::from_utf8_lossy(&response.body).into_owned(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_json_object() {
        let response = HttpResponse::new(200, r#"{"data":{"price":"42.1"}}"#);
        let value = decode(&response, ResponseType::Json).unwrap();
        assert_eq!(
            value.get("data").and_then(|d| d.get("price")),
            Some(&PathValue::from("42.1"))
        );
    }

    #[test]
    fn test_decode_json_keeps_key_order() {
        let response = HttpResponse::new(200, r#"{"z":1,"a":{"y":true,"b":null},"m":3}"#);
        let value = decode(&response, ResponseType::Json).unwrap();
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"z":1,"a":{"y":true,"b":null},"m":3}"#
        );
    }

    #[test]
    fn test_decode_json_scalar() {
        let value = decode(&HttpResponse::new(200, "17"), ResponseType::Json).unwrap();
        assert_eq!(value.as_i64(), Some(17));
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = decode(&HttpResponse::new(200, "<html>oops</html>"), ResponseType::Json)
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("failed to decode response body as json"));
    }

    #[test]
    fn test_decode_empty_body_as_json_fails() {
        assert!(decode(&HttpResponse::new(200, ""), ResponseType::Json).is_err());
    }

    #[test]
    fn test_decode_text_is_verbatim() {
        let value = decode(&HttpResponse::new(200, "{not json"), ResponseType::Text).unwrap();
        assert_eq!(value, PathValue::from("{not json"));
    }

    #[test]
    fn test_decode_text_lossy_utf8() {
        let response = HttpResponse::new(200, vec![b'o', b'k', 0xff]);
        let value = decode(&response, ResponseType::Text).unwrap();
        assert_eq!(value.as_str(), Some("ok\u{fffd}"));
    }
}
