//! # Command Layer
//!
//! One module per operation. Each `run` is generic over [`RecordStore`], so
//! the same code serves contacts and projects.
//!
//! Record commands never fail with `Err`: a validation problem, a missing record or
//! a database error becomes an error-level [`CmdMessage`] on the returned
//! [`CmdResult`], and [`CmdResult::succeeded`] reports the outcome. That gives
//! every caller the same `(success, message)` answer the views expect.

use crate::config::ArchpmConfig;
use crate::model::{FieldMap, RecordId};

pub mod config;
pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod list;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records read by the command, already materialized for display.
    pub records: Vec<FieldMap>,
    /// Id of the record created or touched, when there is one.
    pub record_id: Option<RecordId>,
    /// Serialized output (export).
    pub output: Option<String>,
    pub config: Option<ArchpmConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_records(mut self, records: Vec<FieldMap>) -> Self {
        self.records = records;
        self
    }

    pub fn with_record_id(mut self, id: RecordId) -> Self {
        self.record_id = Some(id);
        self
    }

    pub fn with_output(mut self, output: String) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_config(mut self, config: ArchpmConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::default().with_message(CmdMessage::error(message))
    }

    pub fn succeeded(&self) -> bool {
        !self
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }

    /// First error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.level == MessageLevel::Error)
            .map(|m| m.content.as_str())
    }
}
