use http::Method;
use log::{debug, info};
use nsfetch_core::{Context, Error, Result};
use nsfetch_import::{
    bulk_records, excel_supported, CsvSource, FieldMap, RowSource, RowTransformer,
    TransformOptions, ValueMap,
};
use nsfetch_netsuite::RecordEndpoint;
use serde_json::{json, Value};

use crate::Dispatcher;

/// Record operation against one record type.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Fetch one record, or a page of records when `id` is `None`.
    Get {
        /// Record id.
        id: Option<String>,
        /// Fields to return, only used together with `id`.
        fields: Vec<String>,
        /// Page size of a listing.
        limit: u64,
        /// Page offset of a listing.
        offset: u64,
    },
    /// Create one record.
    Create {
        /// Record body.
        data: Value,
    },
    /// Patch an existing record.
    Update {
        /// Record id.
        id: String,
        /// Fields to change.
        data: Value,
    },
    /// Delete a record.
    Delete {
        /// Record id.
        id: String,
    },
    /// Create one record per entry.
    Bulk {
        /// Record bodies, sent in order.
        records: Vec<Value>,
    },
}

impl Operation {
    /// Build a get operation from an optional `--id` and an optional positional id.
    pub fn get(
        id: Option<String>,
        positional: Option<String>,
        fields: Vec<String>,
        limit: u64,
        offset: u64,
    ) -> Result<Self> {
        let fields = fields
            .iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();

        Ok(Operation::Get {
            id: record_id(id, positional)?,
            fields,
            limit,
            offset,
        })
    }

    /// Build a create operation from the `--data` JSON.
    pub fn create(data: Option<&str>) -> Result<Self> {
        Ok(Operation::Create {
            data: payload(data, "create")?,
        })
    }

    /// Build an update operation.
    pub fn update(id: Option<String>, positional: Option<String>, data: Option<&str>) -> Result<Self> {
        let id = record_id(id, positional)?
            .ok_or_else(|| Error::request_invalid("--id or numeric positional required"))?;

        Ok(Operation::Update {
            id,
            data: payload(data, "update")?,
        })
    }

    /// Build a delete operation.
    pub fn delete(id: Option<String>, positional: Option<String>) -> Result<Self> {
        let id = record_id(id, positional)?
            .ok_or_else(|| Error::request_invalid("--id or numeric positional required"))?;

        Ok(Operation::Delete { id })
    }

    /// Build a bulk operation from the content of a bulk file.
    pub fn bulk(content: &[u8]) -> Result<Self> {
        Ok(Operation::Bulk {
            records: bulk_records(content)?,
        })
    }

    /// Run the operation and return what should be printed.
    pub async fn execute(self, dispatcher: &Dispatcher, endpoint: &RecordEndpoint) -> Result<Value> {
        match self {
            Operation::Get {
                id: Some(id),
                fields,
                ..
            } => {
                dispatcher
                    .dispatch_one(Method::GET, &endpoint.item_with_fields(&id, &fields), None)
                    .await
            }
            Operation::Get {
                id: None,
                limit,
                offset,
                ..
            } => {
                dispatcher
                    .dispatch_one(Method::GET, &endpoint.list(limit, offset), None)
                    .await
            }
            Operation::Create { data } => {
                dispatcher
                    .dispatch_one(Method::POST, endpoint.base(), Some(&data))
                    .await
            }
            Operation::Update { id, data } => {
                dispatcher
                    .dispatch_one(Method::PATCH, &endpoint.item(&id), Some(&data))
                    .await
            }
            Operation::Delete { id } => {
                dispatcher
                    .dispatch_one(Method::DELETE, &endpoint.item(&id), None)
                    .await?;
                Ok(json!({ "deleted": id }))
            }
            Operation::Bulk { records } => {
                info!("creating {} records", records.len());
                let results = dispatcher
                    .dispatch_many(Method::POST, endpoint.base(), &records)
                    .await?;
                Ok(Value::Array(results))
            }
        }
    }
}

fn record_id(id: Option<String>, positional: Option<String>) -> Result<Option<String>> {
    if let Some(id) = id.filter(|id| !id.trim().is_empty()) {
        return Ok(Some(id.trim().to_string()));
    }

    match positional {
        Some(p) if !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()) => Ok(Some(p)),
        Some(p) => Err(Error::request_invalid(format!(
            "positional record id must be numeric, got {p:?}"
        ))),
        None => Ok(None),
    }
}

fn payload(data: Option<&str>, op: &str) -> Result<Value> {
    let data = data
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| Error::request_invalid(format!("--data JSON payload required for {op}")))?;

    serde_json::from_str(data).map_err(|e| Error::from(e).with_context("failed to parse --data"))
}

/// Tabular input of an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    /// CSV file path.
    Csv(String),
    /// Spreadsheet file path.
    Excel(String),
}

impl ImportSource {
    /// Pick the import source from the `--csv-file` and `--excel-file` flags.
    ///
    /// Returns `None` when neither is given.
    pub fn from_flags(csv: Option<String>, excel: Option<String>) -> Result<Option<Self>> {
        match (csv, excel) {
            (Some(_), Some(_)) => Err(Error::request_invalid(
                "--csv-file and --excel-file can't be used together",
            )),
            (Some(path), None) => Ok(Some(ImportSource::Csv(path))),
            (None, Some(_)) if !excel_supported() => Err(Error::config_invalid(
                "spreadsheet import is not available, rebuild nsfetch with the `excel` feature",
            )),
            (None, Some(path)) => Ok(Some(ImportSource::Excel(path))),
            (None, None) => Ok(None),
        }
    }

    fn path(&self) -> &str {
        match self {
            ImportSource::Csv(path) | ImportSource::Excel(path) => path,
        }
    }
}

/// ImportJob turns a tabular file into a bulk operation.
#[derive(Debug, Clone)]
pub struct ImportJob {
    source: ImportSource,
    map_file: Option<String>,
    value_map_file: Option<String>,
    options: TransformOptions,
}

impl ImportJob {
    /// Create an import of `source` without map files.
    pub fn new(source: ImportSource) -> Self {
        Self {
            source,
            map_file: None,
            value_map_file: None,
            options: TransformOptions::default(),
        }
    }

    /// Set the field map file.
    pub fn with_map_file(mut self, path: Option<String>) -> Self {
        self.map_file = path;
        self
    }

    /// Set the value map file.
    pub fn with_value_map_file(mut self, path: Option<String>) -> Self {
        self.value_map_file = path;
        self
    }

    /// Set the transform options.
    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    /// Read and transform every row into a bulk operation.
    pub async fn load(&self, ctx: &Context) -> Result<Operation> {
        let mut transformer = RowTransformer::new().with_options(self.options);
        if let Some(path) = &self.map_file {
            let content = ctx.file_read(path).await?;
            transformer = transformer.with_field_map(
                FieldMap::from_slice(&content).map_err(|e| e.with_context(path))?,
            );
        }
        if let Some(path) = &self.value_map_file {
            let content = ctx.file_read(path).await?;
            transformer = transformer.with_value_map(
                ValueMap::from_slice(&content).map_err(|e| e.with_context(path))?,
            );
        }

        let path = self.source.path();
        let content = ctx.file_read(path).await?;
        let rows = match &self.source {
            ImportSource::Csv(_) => CsvSource::new(content).rows(),
            ImportSource::Excel(_) => excel_rows(content),
        }
        .map_err(|e| e.with_context(path))?;
        debug!("read {} rows from {path}", rows.len());

        let records = transformer
            .transform_all(&rows)?
            .into_iter()
            .map(Value::Object)
            .collect();
        Ok(Operation::Bulk { records })
    }
}

#[cfg(feature = "excel")]
fn excel_rows(content: Vec<u8>) -> Result<Vec<nsfetch_import::Row>> {
    nsfetch_import::ExcelSource::new(content).rows()
}

#[cfg(not(feature = "excel"))]
fn excel_rows(_: Vec<u8>) -> Result<Vec<nsfetch_import::Row>> {
    Err(Error::config_invalid(
        "spreadsheet import is not available, rebuild nsfetch with the `excel` feature",
    ))
}
