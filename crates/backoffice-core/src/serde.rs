use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Accepts a UUID string, `null`, or an empty string (treated as `null`).
pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => Uuid::parse_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_optional_uuid")]
        id: Option<Uuid>,
    }

    #[test]
    fn test_empty_string_is_none() {
        let holder: Holder = serde_json::from_str(r#"{"id":""}"#).unwrap();
        assert!(holder.id.is_none());
    }

    #[test]
    fn test_missing_and_null_are_none() {
        let holder: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert!(holder.id.is_none());
        let holder: Holder = serde_json::from_str(r#"{"id":null}"#).unwrap();
        assert!(holder.id.is_none());
    }

    #[test]
    fn test_valid_uuid() {
        let id = Uuid::new_v4();
        let holder: Holder = serde_json::from_str(&format!(r#"{{"id":"{}"}}"#, id)).unwrap();
        assert_eq!(holder.id, Some(id));
    }

    #[test]
    fn test_invalid_uuid_is_error() {
        assert!(serde_json::from_str::<Holder>(r#"{"id":"not-a-uuid"}"#).is_err());
    }
}
