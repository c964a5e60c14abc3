//! # Rendering
//!
//! Terminal output for command results. Layout is computed as plain text
//! (so it can be tested); color is applied only when printing messages.

use archpm::commands::{CmdMessage, MessageLevel};
use archpm::config::ArchpmConfig;
use archpm::model::{field, FieldMap};
use archpm::schema::TableSchema;
use archpm::ui::ListView;
use colored::Colorize;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

pub fn write_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

pub fn print_messages(messages: &[CmdMessage]) -> io::Result<()> {
    write_messages(&mut io::stdout().lock(), messages)
}

/// The list table followed by its status line.
pub fn write_list<W: Write>(out: &mut W, view: &ListView) -> io::Result<()> {
    write!(out, "{}", view.render())?;
    writeln!(out, "{}", view.status().dimmed())
}

/// One record as aligned `label  value` lines. Continuation lines of a
/// multi-line value are indented under the value column.
pub fn render_record(schema: &TableSchema, record: &FieldMap) -> String {
    let label_width = schema
        .fields
        .iter()
        .map(|f| f.label.width())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for spec in schema.fields {
        let padding = " ".repeat(label_width - spec.label.width());
        let mut lines = field(record, spec.name).lines();
        let first = lines.next().unwrap_or("");
        let line = format!("{}{}  {}", spec.label, padding, first);
        out.push_str(line.trim_end());
        out.push('\n');
        for line in lines {
            out.push_str(&format!("{}  {}\n", " ".repeat(label_width), line));
        }
    }
    out
}

pub fn render_config(config: &ArchpmConfig) -> String {
    ArchpmConfig::keys()
        .iter()
        .map(|key| {
            let value = config.get(key).unwrap_or_default();
            format!("{} = {}\n", key, value)
        })
        .collect()
}
