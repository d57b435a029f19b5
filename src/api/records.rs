//! Realtime database calls for the record list.

use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

use crate::api::endpoints::Endpoints;
use crate::api::transport::{HttpError, HttpRequest, HttpTransport};
use crate::config::SecureString;
use crate::model::{Ingredient, Record};

/// Query parameter carrying the session token on database requests.
pub const AUTH_QUERY_PARAM: &str = "auth";

/// A record as returned by the backend, before normalization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image_path: String,
    #[serde(default)]
    ingredients: Option<Vec<Ingredient>>,
}

impl RawRecord {
    fn into_record(self, id: String) -> Record {
        Record {
            id: Some(id),
            name: self.name,
            description: self.description,
            image_path: self.image_path,
            ingredients: self.ingredients.unwrap_or_default(),
        }
    }
}

pub struct RecordsApi {
    transport: Arc<dyn HttpTransport>,
    endpoints: Endpoints,
}

impl RecordsApi {
    pub fn new(transport: Arc<dyn HttpTransport>, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Fetch the full record list.
    pub async fn fetch(&self, token: &SecureString) -> Result<Vec<Record>, HttpError> {
        let request = HttpRequest::new(Method::GET, self.endpoints.records_url.as_str())
            .query(AUTH_QUERY_PARAM, token.expose());
        let response = self.transport.send(request).await?;
        decode_records(response.body)
    }

    /// Replace the stored list with `records`, in order.
    pub async fn store(&self, token: &SecureString, records: &[Record]) -> Result<(), HttpError> {
        let outgoing: Vec<Record> = records
            .iter()
            .cloned()
            .map(|record| Record { id: None, ..record })
            .collect();
        let body =
            serde_json::to_value(&outgoing).map_err(|e| HttpError::Decode(e.to_string()))?;
        let request = HttpRequest::new(Method::PUT, self.endpoints.records_url.as_str())
            .query(AUTH_QUERY_PARAM, token.expose())
            .json(body);
        self.transport.send(request).await?;
        Ok(())
    }
}

/// Decode a list response.
///
/// The database answers `null` for an empty collection, an array when the
/// list was written with PUT, or a key → record map when entries were
/// pushed. Keys (or array indexes) become the record `id`.
pub fn decode_records(body: Value) -> Result<Vec<Record>, HttpError> {
    let decode = |id: String, value: Value| -> Result<Option<Record>, HttpError> {
        // Sparse arrays come back with null holes.
        if value.is_null() {
            return Ok(None);
        }
        let raw: RawRecord =
            serde_json::from_value(value).map_err(|e| HttpError::Decode(e.to_string()))?;
        Ok(Some(raw.into_record(id)))
    };

    let records = match body {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, value)| decode(index.to_string(), value))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten()
            .collect(),
        Value::Object(entries) => entries
            .into_iter()
            .map(|(key, value)| decode(key, value))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten()
            .collect(),
        other => {
            return Err(HttpError::Decode(format!(
                "expected a record list, got {}",
                other
            )))
        }
    };

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_empty() {
        assert!(decode_records(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_map_keys_become_ids_and_ingredients_default() {
        let body = json!({
            "-Nb2": {"name": "Burger", "description": "d", "imagePath": "b.jpg",
                     "ingredients": [{"name": "buns", "amount": 2}]},
            "-Na1": {"name": "Schnitzel", "description": "d", "imagePath": "s.jpg"}
        });
        let records = decode_records(body).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_deref(), Some("-Na1"));
        assert_eq!(records[0].name, "Schnitzel");
        assert!(records[0].ingredients.is_empty());
        assert_eq!(records[1].id.as_deref(), Some("-Nb2"));
        assert_eq!(records[1].ingredients[0].amount, 2.0);
    }

    #[test]
    fn test_array_with_null_ingredients_and_holes() {
        let body = json!([
            {"name": "A", "ingredients": null},
            null,
            {"name": "C"}
        ]);
        let records = decode_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_deref(), Some("0"));
        assert!(records[0].ingredients.is_empty());
        assert_eq!(records[1].id.as_deref(), Some("2"));
    }

    #[test]
    fn test_scalar_body_is_decode_error() {
        assert!(matches!(
            decode_records(json!("oops")),
            Err(HttpError::Decode(_))
        ));
    }

    #[test]
    fn test_record_without_id_omits_field() {
        let json = serde_json::to_value(Record::new("A", "d")).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["imagePath"], "");
    }
}
