//! Checks and converters for the `contentEncoding` keyword.
use crate::error::ValidationError;
use ahash::AHashMap;
use base64::{engine::general_purpose::STANDARD, Engine};
use once_cell::sync::Lazy;

pub(crate) type ContentEncodingCheckType = fn(&str) -> bool;
pub(crate) type ContentEncodingConverterType =
    fn(&str) -> Result<Option<String>, ValidationError<'static>>;

pub(crate) fn is_base64(instance_string: &str) -> bool {
    STANDARD.decode(instance_string).is_ok()
}

pub(crate) fn from_base64(
    instance_string: &str,
) -> Result<Option<String>, ValidationError<'static>> {
    match STANDARD.decode(instance_string) {
        Ok(value) => Ok(Some(String::from_utf8(value)?)),
        Err(_) => Ok(None),
    }
}

pub(crate) static DEFAULT_CONTENT_ENCODING_CHECKS_AND_CONVERTERS: Lazy<
    AHashMap<&'static str, (ContentEncodingCheckType, ContentEncodingConverterType)>,
> = Lazy::new(|| {
    let mut map: AHashMap<&'static str, (ContentEncodingCheckType, ContentEncodingConverterType)> =
        AHashMap::with_capacity(1);
    map.insert("base64", (is_base64, from_base64));
    map
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_base64() {
        assert!(is_base64("ezp9Cg=="));
        assert_eq!(from_base64("e30=").unwrap(), Some("{}".to_string()));
    }

    #[test]
    fn invalid_base64() {
        assert!(!is_base64("a"));
        assert_eq!(from_base64("a").unwrap(), None);
    }
}
