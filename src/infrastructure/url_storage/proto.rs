//! Wire types, client and server stubs for the `url_storage.UrlStorage` service.
//!
//! Generated from `proto/url_storage.proto` by `build.rs`.

#![allow(clippy::derive_partial_eq_without_eq)]

tonic::include_proto!("url_storage");

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_set_url_request_field_tags() {
        let request = SetUrlRequest {
            url: "https://example.com".to_string(),
            alias: "abc".to_string(),
        };

        let bytes = request.encode_to_vec();

        // field 1 (url), wire type 2 (length-delimited)
        assert_eq!(bytes[0], 0x0a);
        assert_eq!(bytes[1] as usize, "https://example.com".len());
        // field 2 (alias) follows the url payload
        assert_eq!(bytes[2 + "https://example.com".len()], 0x12);
    }

    #[test]
    fn test_set_url_response_decodes_id() {
        // field 1, varint 42
        let response = SetUrlResponse::decode(&[0x08, 0x2a][..]).unwrap();
        assert_eq!(response.id, 42);
    }

    #[test]
    fn test_get_url_response_default_is_empty() {
        let response = GetUrlResponse::decode(&[][..]).unwrap();
        assert!(response.url.is_empty());
    }
}
