use nsfetch_core::{Error, Result};
use serde_json::Value;

/// Parse a bulk file: an array of records, or one record treated as a one element array.
pub fn bulk_records(content: &[u8]) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_slice(content)
        .map_err(|err| Error::from(err).with_context("failed to parse bulk file"))?;

    Ok(match value {
        Value::Array(records) => records,
        record => vec![record],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsfetch_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_bulk_records() {
        let records = bulk_records(br#"[{"companyName": "Acme"}, {"companyName": "Globex"}]"#)
            .expect("bulk file must parse");
        assert_eq!(
            records,
            vec![json!({"companyName": "Acme"}), json!({"companyName": "Globex"})]
        );

        let records = bulk_records(br#"{"companyName": "Acme"}"#).expect("bulk file must parse");
        assert_eq!(records, vec![json!({"companyName": "Acme"})]);

        let records = bulk_records(b"[]").expect("bulk file must parse");
        assert!(records.is_empty());
    }

    #[test]
    fn test_bulk_records_malformed() {
        let err = bulk_records(b"{not json").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ParseInvalid);
        assert!(err.to_string().starts_with("failed to parse bulk file: "));
    }
}
