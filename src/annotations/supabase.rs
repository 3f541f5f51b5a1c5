use crate::annotations::errors::{AnnotationError, Result};
use crate::annotations::models::{Annotation, AnnotationRow, NewAnnotation};
use crate::annotations::store::AnnotationStore;
use crate::auth::extractors::Caller;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

#[derive(Debug, Clone)]
pub struct SupabaseStore {
    http_client: Client,
    table_url: Url,
    table: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

impl SupabaseStore {
    pub fn new(
        project_url: &Url,
        anon_key: &str,
        table: &str,
    ) -> std::result::Result<Self, url::ParseError> {
        let mut base = project_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let table_url = base.join(&format!("rest/v1/{table}"))?;
        Ok(Self {
            http_client: Client::new(),
            table_url,
            table: table.to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    fn authorized(&self, request: RequestBuilder, caller: &Caller) -> RequestBuilder {
        let bearer = caller.access_token.as_deref().unwrap_or(&self.anon_key);
        request
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(bearer)
    }
}

#[async_trait]
impl AnnotationStore for SupabaseStore {
    async fn insert(&self, annotation: &NewAnnotation, caller: &Caller) -> Result<()> {
        let request = self
            .http_client
            .post(self.table_url.clone())
            .header("Prefer", "return=minimal")
            .json(&[annotation]);
        let outcome = match self.authorized(request, caller).send().await {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => Err(backend_message(response).await),
            Err(err) => Err(err.to_string()),
        };
        match &outcome {
            Ok(()) => tracing::info!(
                task = "backend_request",
                operation = "insert",
                table = %self.table,
                authenticated = caller.access_token.is_some(),
            ),
            Err(message) => tracing::warn!(
                task = "backend_request",
                operation = "insert",
                table = %self.table,
                authenticated = caller.access_token.is_some(),
                error = %message,
            ),
        }
        outcome.map_err(AnnotationError::WriteFailure)
    }

    async fn list(&self, caller: &Caller) -> Result<Vec<Annotation>> {
        let mut url = self.table_url.clone();
        url.query_pairs_mut().append_pair("select", "*");
        let response = self
            .authorized(self.http_client.get(url), caller)
            .send()
            .await
            .map_err(|err| AnnotationError::ReadFailure(err.to_string()))?;
        if !response.status().is_success() {
            return Err(AnnotationError::ReadFailure(backend_message(response).await));
        }
        let payload: Value = response
            .json()
            .await
            .map_err(|err| AnnotationError::ReadFailure(err.to_string()))?;
        let Value::Array(rows) = payload else {
            return Err(AnnotationError::ReadFailure(format!(
                "expected an array of rows from `{}`, got something else",
                self.table
            )));
        };

        let mut annotations = Vec::with_capacity(rows.len());
        for row in rows {
            let decoded = serde_json::from_value::<AnnotationRow>(row)
                .map_err(|err| err.to_string())
                .and_then(|row| Annotation::try_from(row).map_err(|err| err.to_string()));
            match decoded {
                Ok(annotation) => annotations.push(annotation),
                Err(reason) => tracing::warn!(
                    task = "backend_request",
                    operation = "list",
                    table = %self.table,
                    "Skipping a row that can't be shown on the map: {reason}"
                ),
            }
        }
        tracing::info!(
            task = "backend_request",
            operation = "list",
            table = %self.table,
            rows = annotations.len(),
        );
        Ok(annotations)
    }
}

async fn backend_message(response: Response) -> String {
    let status = response.status();
    match response.json::<PostgrestError>().await {
        Ok(PostgrestError { message }) => message,
        Err(_) => status.to_string(),
    }
}
