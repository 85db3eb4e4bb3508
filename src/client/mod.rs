//! Stateless client for the remote table-processing engine
//!
//! Translates the four high-level operations (describe, extract, validate,
//! transform) into multipart requests against the engine's HTTP API and
//! decodes the typed result or a typed error.
//!
//! Decode policy: a 200 decodes the declared success shape; a 400 decodes
//! `{detail}` into [`DataEditError::Remote`] carrying the server's own
//! message; any other status, any body-decode failure, and any transport
//! failure map to `Remote` with the fixed `"Unknown error"` detail. Errors
//! are returned as values and never retried here.

use crate::descriptor::Descriptor;
use crate::error::{DataEditError, Result, ResultExt, UNKNOWN_ERROR_DETAIL};
use crate::pipeline::Pipeline;
use crate::settings;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::Path;
use tracing::{debug, warn};

/// A single table row as returned by the engine
pub type Row = Map<String, Value>;

/// Structured validation outcome
///
/// `valid` is the overall pass/fail verdict; per-task and per-row details
/// keep the engine's shape and stay in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub valid: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Success/failure summary of a transform run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformStatus {
    pub valid: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of a transform run: the status plus the produced rows
#[derive(Debug, Clone, PartialEq)]
pub struct Transformation {
    pub status: TransformStatus,
    pub target_rows: Vec<Row>,
}

/// A file to be processed: raw bytes plus the name presented to the engine
#[derive(Debug, Clone, PartialEq)]
pub struct FilePayload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FilePayload {
    /// Wrap in-memory bytes
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk; the payload name is the file's basename
    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(DataEditError::from)
            .with_context(|| format!("Failed to read file {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, bytes })
    }
}

/// Client for the remote processing engine's HTTP API
#[derive(Debug, Clone)]
pub struct ProcessingClient {
    http: reqwest::Client,
    server_url: String,
}

impl Default for ProcessingClient {
    fn default() -> Self {
        Self::new(settings::SERVER_URL)
    }
}

impl ProcessingClient {
    /// Create a client against the given engine base URL
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            server_url: server_url.into(),
        }
    }

    /// The engine base URL this client talks to
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Infer a resource descriptor for a tabular file
    pub async fn describe(&self, file: &FilePayload) -> Result<Descriptor> {
        #[derive(Deserialize)]
        struct Envelope {
            resource: Descriptor,
        }

        let form = file_form(file);
        let envelope: Envelope = self.request("/describe", form).await?;
        Ok(envelope.resource)
    }

    /// Read the file's rows according to a resource descriptor
    pub async fn extract(&self, file: &FilePayload, resource: &Descriptor) -> Result<Vec<Row>> {
        #[derive(Deserialize)]
        struct Envelope {
            rows: Vec<Row>,
        }

        let form = file_form(file).text("resource", encode(resource)?);
        let envelope: Envelope = self.request("/extract", form).await?;
        Ok(envelope.rows)
    }

    /// Validate the file against a resource descriptor.
    ///
    /// The resource is wrapped into the engine's inquiry shape
    /// (`{tasks: [{source: resource}]}`) on the wire.
    pub async fn validate(&self, file: &FilePayload, resource: &Descriptor) -> Result<Report> {
        #[derive(Deserialize)]
        struct Envelope {
            report: Report,
        }

        let inquiry = json!({"tasks": [{"source": resource.to_value()}]});
        let form = file_form(file).text("inquiry", inquiry.to_string());
        let envelope: Envelope = self.request("/validate", form).await?;
        Ok(envelope.report)
    }

    /// Run a transform pipeline (built per [`crate::pipeline::build_pipeline`])
    /// over the file
    pub async fn transform(&self, file: &FilePayload, pipeline: &Pipeline) -> Result<Transformation> {
        #[derive(Deserialize)]
        struct Envelope {
            status: TransformStatus,
            #[serde(rename = "targetRows", default)]
            target_rows: Vec<Row>,
        }

        let form = file_form(file).text("pipeline", encode(pipeline)?);
        let envelope: Envelope = self.request("/transform", form).await?;
        Ok(Transformation {
            status: envelope.status,
            target_rows: envelope.target_rows,
        })
    }

    async fn request<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let url = format!("{}{}", self.server_url, path);
        debug!(url, "dispatching processing request");

        let response = self.http.post(&url).multipart(form).send().await.map_err(|e| {
            warn!(url, error = %e, "processing request failed before a response");
            DataEditError::Remote {
                status: 0,
                detail: UNKNOWN_ERROR_DETAIL.to_string(),
            }
        })?;

        decode_response(response).await
    }
}

fn file_form(file: &FilePayload) -> Form {
    let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
    Form::new().part("file", part)
}

fn encode<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| DataEditError::Serialization(e.to_string()))
}

async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status().as_u16();
    match status {
        200 => response
            .json::<T>()
            .await
            .map_err(|_| DataEditError::remote_unknown(status)),
        400 => {
            #[derive(Deserialize)]
            struct ErrorBody {
                detail: String,
            }

            match response.json::<ErrorBody>().await {
                Ok(body) => Err(DataEditError::Remote {
                    status,
                    detail: body.detail,
                }),
                Err(_) => Err(DataEditError::remote_unknown(status)),
            }
        }
        other => Err(DataEditError::remote_unknown(other)),
    }
}
