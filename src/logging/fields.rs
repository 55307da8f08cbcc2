//! Event targets and the fields applyconfig attaches to its events.
use std::fmt;

use tracing::field::{Field, Visit};

use super::types::FileStatus;

/// Target of stage header events.
pub(super) const STAGE_TARGET: &str = "applyconfig::stage";

/// Target of `oc` output produced by a dry run.
pub(super) const DRY_RUN_TARGET: &str = "applyconfig::dry_run";

/// Target of per-file run summary lines.
pub(super) const SUMMARY_TARGET: &str = "applyconfig::summary";

/// The message of one event plus the file, `oc` step and outcome it
/// concerns.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct EventFields {
    pub(super) message: String,
    pub(super) path: Option<String>,
    pub(super) step: Option<String>,
    pub(super) status: Option<FileStatus>,
}

impl EventFields {
    pub(super) fn of(event: &tracing::Event<'_>) -> Self {
        let mut fields = Self::default();
        event.record(&mut fields);
        fields
    }

    fn set(&mut self, name: &str, value: String) {
        match name {
            "message" => self.message = value,
            "path" => self.path = Some(value),
            "step" => self.step = Some(value),
            "status" => self.status = FileStatus::from_label(&value),
            _ => {}
        }
    }
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.set(field.name(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.set(field.name(), format!("{value:?}"));
    }
}

/// Renders `path [step]: message`, or `icon path (message)` for summary
/// lines, dropping whatever is absent.
impl fmt::Display for EventFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = self.status {
            write!(f, "{} ", status.icon())?;
        }
        let Some(path) = &self.path else {
            return f.write_str(&self.message);
        };
        f.write_str(path)?;
        if let Some(step) = &self.step {
            write!(f, " [{step}]")?;
        }
        match (self.message.is_empty(), self.status) {
            (true, _) => Ok(()),
            (false, Some(_)) => write!(f, " ({})", self.message),
            (false, None) => write!(f, ": {}", self.message),
        }
    }
}
