//! # Interactive Session
//!
//! A line-oriented front end for the [`Navigator`]. Each command maps to one
//! navigator transition or list/form event; after every transition the
//! active list is redrawn. Forms are filled in field by field: pressing
//! Enter keeps the value shown in brackets and `-` clears it.
//!
//! End of input ends the session normally, even in the middle of a form
//! (the form is cancelled). So does Ctrl-C: the process prints a farewell
//! and exits with status 0.

use super::render::{write_list, write_messages};
use archpm::api::ArchpmApi;
use archpm::commands::CmdResult;
use archpm::error::{ArchpmError, Result};
use archpm::model::{EntityKind, RecordId};
use archpm::schema::FieldSpec;
use archpm::ui::{FormEvent, ListEvent, Navigator};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Commands:
  contacts        show contacts
  projects        show projects
  list, refresh   reload the current list
  add             add a record
  edit ID         edit a record
  delete ID       delete a record
  help            show this help
  quit            leave the session

In a form, press Enter to keep the value in brackets, or type - to clear it.";

const CLEAR_VALUE: &str = "-";

enum Flow {
    Continue,
    Quit,
}

pub fn run(api: &ArchpmApi) -> Result<()> {
    // stdout stays unlocked so the handler can print while a prompt waits.
    ctrlc::set_handler(|| {
        println!();
        println!("Application terminated by user");
        std::process::exit(0);
    })
    .map_err(|e| ArchpmError::Api(format!("Failed to install interrupt handler: {}", e)))?;

    let stdin = io::stdin();
    Session::new(api.navigator(), stdin.lock(), io::stdout()).run()
}

/// Asks a yes/no question; anything but an explicit yes is a no.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<bool> {
    write!(out, "{} [y/N] ", question)?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "כן"
    ))
}

pub struct Session<R, W> {
    nav: Navigator,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(nav: Navigator, input: R, out: W) -> Self {
        Self { nav, input, out }
    }

    pub fn run(&mut self) -> Result<()> {
        let started = self.nav.start();
        self.show_list(&started)?;
        writeln!(self.out, "Type 'help' for commands.")?;

        loop {
            write!(self.out, "{}> ", self.nav.active())?;
            self.out.flush()?;
            let Some(line) = self.read_line()? else {
                writeln!(self.out)?;
                return Ok(());
            };
            if let Flow::Quit = self.dispatch(line.trim())? {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<Flow> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Flow::Continue);
        };
        let arg = words.next();

        match command {
            "contacts" => {
                let result = self.nav.switch_to(EntityKind::Contacts);
                self.show_list(&result)?;
            }
            "projects" => {
                let result = self.nav.switch_to(EntityKind::Projects);
                self.show_list(&result)?;
            }
            "list" | "refresh" => {
                let result = self.nav.handle_list_event(ListEvent::Refresh);
                self.show_list(&result)?;
            }
            "add" => {
                let result = self.nav.handle_list_event(ListEvent::Add);
                return self.after_form_opened(&result);
            }
            "edit" => {
                let Some(id) = self.parse_id(command, arg)? else {
                    return Ok(Flow::Continue);
                };
                let result = self.nav.handle_list_event(ListEvent::Edit(id));
                return self.after_form_opened(&result);
            }
            "delete" => {
                let Some(id) = self.parse_id(command, arg)? else {
                    return Ok(Flow::Continue);
                };
                return self.delete(id);
            }
            "help" | "?" => writeln!(self.out, "{}", HELP)?,
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            other => writeln!(
                self.out,
                "Unknown command: {}. Type 'help' for commands.",
                other
            )?,
        }
        Ok(Flow::Continue)
    }

    fn parse_id(&mut self, command: &str, arg: Option<&str>) -> Result<Option<RecordId>> {
        match arg.and_then(|a| a.parse().ok()) {
            Some(id) => Ok(Some(id)),
            None => {
                writeln!(self.out, "Usage: {} ID", command)?;
                Ok(None)
            }
        }
    }

    fn delete(&mut self, id: RecordId) -> Result<Flow> {
        let schema = self.nav.active().schema();
        let prompt = self.nav.list().and_then(|list| list.delete_prompt(id));
        let Some(prompt) = prompt else {
            writeln!(self.out, "{} not found", schema.noun)?;
            return Ok(Flow::Continue);
        };
        if !confirm(&mut self.input, &mut self.out, &prompt)? {
            writeln!(self.out, "Cancelled")?;
            return Ok(Flow::Continue);
        }
        let result = self.nav.handle_list_event(ListEvent::Delete(id));
        self.show_list(&result)?;
        Ok(Flow::Continue)
    }

    fn after_form_opened(&mut self, opened: &CmdResult) -> Result<Flow> {
        if !opened.succeeded() || self.nav.form().is_none() {
            write_messages(&mut self.out, &opened.messages)?;
            return Ok(Flow::Continue);
        }
        self.fill_form()
    }

    /// Prompts for every field, then for save or cancel, until the form is
    /// saved or cancelled.
    fn fill_form(&mut self) -> Result<Flow> {
        let Some(form) = self.nav.form() else {
            return Ok(Flow::Continue);
        };
        let title = form.title();
        let fields: Vec<&'static FieldSpec> = form.fields().collect();
        writeln!(self.out, "{}", title)?;

        loop {
            for spec in &fields {
                if let Flow::Quit = self.prompt_field(spec)? {
                    self.nav.handle_form_event(FormEvent::Cancel);
                    return Ok(Flow::Quit);
                }
            }

            loop {
                write!(self.out, "save or cancel? [save] ")?;
                self.out.flush()?;
                let Some(answer) = self.read_line()? else {
                    self.nav.handle_form_event(FormEvent::Cancel);
                    return Ok(Flow::Quit);
                };
                match answer.trim().to_lowercase().as_str() {
                    "" | "s" | "save" => {
                        let Some(event) = self.nav.form().map(|f| f.save()) else {
                            return Ok(Flow::Continue);
                        };
                        let result = self.nav.handle_form_event(event);
                        if result.succeeded() {
                            self.show_list(&result)?;
                            return Ok(Flow::Continue);
                        }
                        write_messages(&mut self.out, &result.messages)?;
                        break;
                    }
                    "c" | "cancel" => {
                        let result = self.nav.handle_form_event(FormEvent::Cancel);
                        write_messages(&mut self.out, &result.messages)?;
                        return Ok(Flow::Continue);
                    }
                    _ => writeln!(self.out, "Please answer save or cancel.")?,
                }
            }
        }
    }

    fn prompt_field(&mut self, spec: &FieldSpec) -> Result<Flow> {
        let current = self
            .nav
            .form()
            .map(|f| f.value(spec.name).replace('\n', " "))
            .unwrap_or_default();
        let marker = if spec.required { "*" } else { "" };
        if spec.choices.is_empty() {
            write!(self.out, "{}{} [{}]: ", spec.label, marker, current)?;
        } else {
            write!(
                self.out,
                "{}{} ({}) [{}]: ",
                spec.label,
                marker,
                spec.choices.join("/"),
                current
            )?;
        }
        self.out.flush()?;

        let Some(line) = self.read_line()? else {
            return Ok(Flow::Quit);
        };
        let value = line.trim();
        if value.is_empty() {
            return Ok(Flow::Continue);
        }
        let value = if value == CLEAR_VALUE { "" } else { value };
        if let Some(form) = self.nav.form_mut() {
            form.set_field(spec.name, value)?;
        }
        Ok(Flow::Continue)
    }

    fn show_list(&mut self, result: &CmdResult) -> Result<()> {
        if let Some(list) = self.nav.list() {
            write_list(&mut self.out, list)?;
        }
        let messages: Vec<_> = result
            .messages
            .iter()
            .filter(|m| self.nav.list().map(|l| l.status()) != Some(m.content.as_str()))
            .cloned()
            .collect();
        write_messages(&mut self.out, &messages)?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).map_err(ArchpmError::Io)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archpm::store::Database;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_script(dir: &TempDir, script: &str) -> String {
        colored::control::set_override(false);
        let api = ArchpmApi::new(Database::new(dir.path().join("archpm.db")), dir.path());
        let mut out = Vec::new();
        Session::new(api.navigator(), Cursor::new(script.to_string()), &mut out)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn end_of_input_ends_the_session() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "");
        assert!(out.contains("No contacts found."));
        assert!(out.contains("0 contacts loaded"));
    }

    #[test]
    fn adds_a_contact_field_by_field() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "add\nDana\nLevi\n\nd@x.com\n\nsave\nquit\n");
        assert!(out.contains("Add Contact"));
        assert!(out.contains("First name* []: "));
        assert!(out.contains("Contact created successfully"));
        assert!(out.contains("1 contact loaded"));
        assert!(out.contains("Dana"));
    }

    #[test]
    fn failed_save_prompts_again_with_entered_values() {
        let dir = TempDir::new().unwrap();
        let script = "add\nDana\n\n\nno-at-sign\n\nsave\n\nLevi\n\nd@x.com\n\nsave\nquit\n";
        let out = run_script(&dir, script);
        assert!(out.contains("Last name is required; Email address must contain '@' symbol"));
        assert!(out.contains("First name* [Dana]: "));
        assert!(out.contains("Contact created successfully"));
    }

    #[test]
    fn switching_to_projects_and_deleting() {
        let dir = TempDir::new().unwrap();
        let script = "projects\nadd\nAcme\nTel Aviv\n2024-13-01\n\nכן\n\nsave\ndelete 1\ny\nquit\n";
        let out = run_script(&dir, script);
        assert!(out.contains("0 projects loaded"));
        assert!(out.contains("Project created successfully"));
        assert!(out.contains("Are you sure you want to delete project 'Acme'? [y/N] "));
        assert!(out.contains("Project deleted successfully"));
    }

    #[test]
    fn declined_delete_keeps_the_record() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "add\nDana\nLevi\n\n\n\nsave\ndelete 1\nn\nlist\n");
        assert!(out.contains("Cancelled"));
        assert!(!out.contains("deleted successfully"));
    }

    #[test]
    fn unknown_ids_and_commands_are_reported() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "edit 9\ndelete 9\ndelete x\nfrobnicate\n");
        assert!(out.contains("Contact not found"));
        assert!(out.contains("Usage: delete ID"));
        assert!(out.contains("Unknown command: frobnicate"));
    }

    #[test]
    fn cancelling_a_form_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "add\nDana\nLevi\n\n\n\ncancel\nlist\n");
        assert!(out.contains("Cancelled"));
        assert!(out.contains("0 contacts loaded"));
        assert!(!out.contains("created successfully"));
    }

    #[test]
    fn confirm_accepts_only_explicit_yes() {
        let mut out = Vec::new();
        assert!(confirm(&mut Cursor::new("yes\n"), &mut out, "Sure?").unwrap());
        assert!(!confirm(&mut Cursor::new("\n"), &mut out, "Sure?").unwrap());
        assert!(!confirm(&mut Cursor::new(""), &mut out, "Sure?").unwrap());
    }
}
