//! Pure Firestore REST API client.
//!
//! A minimal client for the Firestore v1 REST API. Supports equality
//! queries over a collection, document creation, and per-field patches.
//! No domain logic lives here.
//!
//! # Example
//!
//! ```rust,ignore
//! use firestore_client::{FirestoreClient, Value};
//!
//! let client = FirestoreClient::new("my-project".into(), access_token);
//!
//! let docs = client.query_equal("events", "title", "Bake Sale").await?;
//! for doc in &docs {
//!     println!("{:?}", doc.field_str("status"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{FirestoreError, Result};
pub use types::{Document, QueryResult, Value};

use serde_json::json;
use std::collections::HashMap;

const BASE_URL: &str = "https://firestore.googleapis.com/v1";

pub struct FirestoreClient {
    client: reqwest::Client,
    project_id: String,
    access_token: String,
}

impl FirestoreClient {
    pub fn new(project_id: String, access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            project_id,
            access_token,
        }
    }

    fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents",
            self.project_id
        )
    }

    /// Run an equality query over one collection, returning matching
    /// documents in the server's result order.
    pub async fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>> {
        let url = format!("{}/{}:runQuery", BASE_URL, self.documents_root());
        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": field },
                        "op": "EQUAL",
                        "value": { "stringValue": value }
                    }
                }
            }
        });

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FirestoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        // runQuery streams one JSON object per result; over REST this
        // arrives as an array, with a bare readTime entry when empty.
        let results: Vec<QueryResult> = resp
            .json()
            .await
            .map_err(|e| FirestoreError::Parse(e.to_string()))?;
        Ok(results.into_iter().filter_map(|r| r.document).collect())
    }

    /// Create a document with a server-assigned id.
    pub async fn create_document(
        &self,
        collection: &str,
        fields: HashMap<String, Value>,
    ) -> Result<Document> {
        let url = format!("{}/{}/{}", BASE_URL, self.documents_root(), collection);
        let body = Document {
            name: None,
            fields,
        };

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FirestoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let created: Document = resp
            .json()
            .await
            .map_err(|e| FirestoreError::Parse(e.to_string()))?;
        tracing::debug!(collection, id = ?created.doc_id(), "Created document");
        Ok(created)
    }

    /// Patch the given fields of one document, leaving the rest intact.
    /// `document_id` is the bare id within the collection.
    pub async fn patch_document(
        &self,
        collection: &str,
        document_id: &str,
        fields: HashMap<String, Value>,
    ) -> Result<Document> {
        let mask: String = fields
            .keys()
            .map(|k| format!("updateMask.fieldPaths={}", k))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!(
            "{}/{}/{}/{}?{}",
            BASE_URL,
            self.documents_root(),
            collection,
            document_id,
            mask
        );
        let body = Document {
            name: None,
            fields,
        };

        let resp = self
            .client
            .patch(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FirestoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let patched: Document = resp
            .json()
            .await
            .map_err(|e| FirestoreError::Parse(e.to_string()))?;
        Ok(patched)
    }
}
