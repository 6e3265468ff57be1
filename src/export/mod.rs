pub mod chart;
pub mod csv;
pub mod json;
pub mod snapshot;
pub mod yaml;

use crate::error::{BoxError, EncodingError, ExportError};
use crate::identity::IdentityResolver;
use crate::models::{PollId, UserId};
use crate::store::PollStore;
use async_trait::async_trait;
use log::{debug, warn};
use std::fmt;
use std::str::FromStr;

pub use snapshot::{Snapshot, SnapshotOption};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
    PieChart,
    BarChart,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
            ExportFormat::PieChart | ExportFormat::BarChart => "png",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Yaml => "application/yaml",
            ExportFormat::PieChart | ExportFormat::BarChart => "image/png",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
            ExportFormat::PieChart => "pie-chart",
            ExportFormat::BarChart => "bar-chart",
        };
        f.write_str(token)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "yaml" => Ok(ExportFormat::Yaml),
            "pie-chart" => Ok(ExportFormat::PieChart),
            "bar-chart" => Ok(ExportFormat::BarChart),
            _ => Err(format!("unknown export format: {s}")),
        }
    }
}

/// A finished export, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// The transport that carries a finished export back to the caller.
#[async_trait]
pub trait Delivery: Send + Sync {
    async fn send_file(&self, file: ExportFile) -> Result<(), BoxError>;
}

/// Run one export end to end: resolve the poll, snapshot it under its lock,
/// encode off the async path, deliver the file.
///
/// The caller must be the poll's author or hold the manage permission;
/// anything else reports the same way as a missing poll. The poll's lock is
/// only ever held inside the snapshot step, never across encoding or
/// delivery.
pub async fn export_poll(
    store: &dyn PollStore,
    resolver: &dyn IdentityResolver,
    delivery: &dyn Delivery,
    caller: UserId,
    can_manage: bool,
    poll_id: PollId,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let poll = store
        .get_poll(poll_id)
        .await
        .map_err(ExportError::Store)?
        .ok_or(ExportError::NotFound)?;
    if poll.author_id != caller && !can_manage {
        warn!("User {} cannot export poll {}", caller, poll.id);
        return Err(ExportError::NotFound);
    }

    let snapshot = snapshot::build(&poll, resolver).await;

    debug!("Exporting {} to {}", poll.id, format);
    let bytes = tokio::task::spawn_blocking(move || encode_snapshot(&snapshot, format)).await??;

    let file = ExportFile {
        filename: format!("{}.{}", poll.title, format.extension()),
        mime: format.mime(),
        bytes,
    };
    delivery.send_file(file).await.map_err(ExportError::Delivery)
}

/// Pure dispatch from snapshot to payload. CPU-bound for the chart formats;
/// the orchestrator always calls this through its blocking-worker offload.
pub fn encode_snapshot(snapshot: &Snapshot, format: ExportFormat) -> Result<Vec<u8>, EncodingError> {
    match format {
        ExportFormat::Csv => self::csv::encode(snapshot),
        ExportFormat::Json => self::json::encode(snapshot),
        ExportFormat::Yaml => self::yaml::encode(snapshot),
        ExportFormat::PieChart => self::chart::render_pie(snapshot),
        ExportFormat::BarChart => self::chart::render_bar(snapshot),
    }
}
