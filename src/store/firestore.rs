use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, error};

use super::backend::DocumentStore;
use super::codec::{decode_fields, encode_fields};
use crate::config::StoreConfig;
use crate::error::{Error, Result};

/// Document store backed by the Firestore REST API
pub struct FirestoreStore {
    client: Client,
    base_url: String,
    project_id: String,
    api_key: String,
}

impl FirestoreStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn documents_url(&self, path: &str) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.base_url, self.project_id, path
        )
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        if self.api_key.is_empty() {
            builder
        } else {
            builder.query(&[("key", self.api_key.as_str())])
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Option<Value>> {
        let response = self.authorize(builder).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Firestore request failed ({}): {}", status, body);
            return Err(Error::Persistence(format!("firestore returned {}: {}", status, body)));
        }

        Ok(Some(response.json().await?))
    }
}

fn object_fields(data: &Value) -> Result<Value> {
    data.as_object()
        .map(|map| json!({ "fields": encode_fields(map) }))
        .ok_or_else(|| Error::Persistence("document must be a JSON object".to_string()))
}

#[async_trait::async_trait]
impl DocumentStore for FirestoreStore {
    async fn create(&self, collection: &str, data: Value) -> Result<String> {
        let body = object_fields(&data)?;
        let doc = self
            .send(self.client.post(self.documents_url(collection)).json(&body))
            .await?
            .ok_or_else(|| Error::Persistence(format!("collection {} not found", collection)))?;

        // name = projects/{p}/databases/(default)/documents/{collection}/{id}
        let id = doc
            .get("name")
            .and_then(Value::as_str)
            .and_then(|name| name.rsplit('/').next())
            .ok_or_else(|| Error::Persistence("created document has no name".to_string()))?;

        debug!("Created {}/{}", collection, id);
        Ok(id.to_string())
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<()> {
        let body = object_fields(&data)?;
        let url = self.documents_url(&format!("{}/{}", collection, id));
        self.send(self.client.patch(url).json(&body))
            .await?
            .ok_or_else(|| Error::Persistence(format!("{}/{} could not be written", collection, id)))?;

        debug!("Wrote {}/{}", collection, id);
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let url = self.documents_url(&format!("{}/{}", collection, id));
        let doc = self.send(self.client.get(url)).await?;

        Ok(doc.map(|doc| decode_fields(doc.get("fields").unwrap_or(&Value::Null))))
    }

    fn name(&self) -> &str {
        "firestore"
    }
}
