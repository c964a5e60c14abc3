use super::render::{print_messages, render_config, render_record, write_list};
use super::session::{self, confirm};
use super::setup::{Cli, Commands, RecordAction};
use archpm::commands::config::ConfigAction;
use archpm::commands::{CmdMessage, CmdResult};
use archpm::editor::edit_form;
use archpm::error::{ArchpmError, Result};
use archpm::init::{initialize, ArchpmContext};
use archpm::model::{EntityKind, RecordId};
use archpm::ui::{FormView, ListView};
use clap::Parser;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = initialize(cli.db)?;

    match cli.command {
        Some(Commands::Contacts { action }) => handle_record(&ctx, EntityKind::Contacts, action),
        Some(Commands::Projects { action }) => handle_record(&ctx, EntityKind::Projects, action),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Session) | None => session::run(&ctx.api),
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins unless `--verbose`
/// was given.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("archpm=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn handle_record(ctx: &ArchpmContext, kind: EntityKind, action: RecordAction) -> Result<()> {
    match action {
        RecordAction::List => handle_list(ctx, kind),
        RecordAction::Show { id } => handle_show(ctx, kind, id),
        RecordAction::Add { set, no_editor } => handle_add(ctx, kind, set, no_editor),
        RecordAction::Edit { id, set, no_editor } => handle_edit(ctx, kind, id, set, no_editor),
        RecordAction::Delete { id, yes } => handle_delete(ctx, kind, id, yes),
        RecordAction::Export => handle_export(ctx, kind),
    }
}

fn handle_list(ctx: &ArchpmContext, kind: EntityKind) -> Result<()> {
    let result = ctx.api.list_records(kind)?;
    let mut view = ListView::new(kind.schema());
    view.update_rows(result.records.clone());
    write_list(&mut io::stdout().lock(), &view)?;
    finish(result)
}

fn handle_show(ctx: &ArchpmContext, kind: EntityKind, id: RecordId) -> Result<()> {
    let result = ctx.api.get_record(kind, id)?;
    if let Some(record) = result.records.first() {
        print!("{}", render_record(kind.schema(), record));
    }
    finish(result)
}

fn handle_add(
    ctx: &ArchpmContext,
    kind: EntityKind,
    set: Vec<(String, String)>,
    no_editor: bool,
) -> Result<()> {
    let mut form = FormView::for_new(kind.schema());
    fill_form(&mut form, set, no_editor)?;

    let result = ctx.api.create_record(kind, &form.get_form_data())?;
    let result = match result.record_id {
        Some(id) => result.with_message(CmdMessage::info(format!("id: {}", id))),
        None => result,
    };
    finish(result)
}

fn handle_edit(
    ctx: &ArchpmContext,
    kind: EntityKind,
    id: RecordId,
    set: Vec<(String, String)>,
    no_editor: bool,
) -> Result<()> {
    let found = ctx.api.get_record(kind, id)?;
    let Some(record) = found.records.first() else {
        return finish(found);
    };
    let mut form = FormView::for_edit(kind.schema(), id, record);
    fill_form(&mut form, set, no_editor)?;

    finish(ctx.api.update_record(kind, id, &form.get_form_data())?)
}

/// Applies `--set` values, or opens the editor when there are none.
fn fill_form(form: &mut FormView, set: Vec<(String, String)>, no_editor: bool) -> Result<()> {
    if set.is_empty() && !no_editor {
        return edit_form(form);
    }
    for (name, value) in set {
        form.set_field(&name, value)?;
    }
    Ok(())
}

fn handle_delete(ctx: &ArchpmContext, kind: EntityKind, id: RecordId, yes: bool) -> Result<()> {
    if !yes && ctx.config.confirm_delete {
        let found = ctx.api.get_record(kind, id)?;
        if !found.succeeded() {
            return finish(found);
        }
        let mut view = ListView::new(kind.schema());
        view.update_rows(found.records);
        let prompt = view
            .delete_prompt(id)
            .unwrap_or_else(|| format!("Delete {} {}?", kind.schema().noun, id));

        let confirmed = confirm(&mut io::stdin().lock(), &mut io::stdout().lock(), &prompt)?;
        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }
    }
    finish(ctx.api.delete_record(kind, id)?)
}

fn handle_export(ctx: &ArchpmContext, kind: EntityKind) -> Result<()> {
    let result = ctx.api.export_records(kind)?;
    if let Some(json) = &result.output {
        println!("{}", json);
    }
    // stdout carries only the JSON
    match result.error() {
        Some(error) => Err(ArchpmError::Api(error.to_string())),
        None => Ok(()),
    }
}

fn handle_config(ctx: &ArchpmContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    finish(result)
}

/// Prints the result's messages and turns its first error into `Err`.
fn finish(result: CmdResult) -> Result<()> {
    let error = result.error().map(str::to_string);
    let shown: Vec<_> = result
        .messages
        .into_iter()
        .filter(|m| Some(&m.content) != error.as_ref())
        .collect();
    print_messages(&shown)?;
    io::stdout().flush()?;
    match error {
        Some(message) => Err(ArchpmError::Api(message)),
        None => Ok(()),
    }
}
