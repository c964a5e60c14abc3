use crate::error::{ArchpmError, Result};
use crate::ui::FormView;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

const FALLBACK_EDITORS: [&str; 3] = ["vim", "vi", "nano"];

/// Editor command from `$EDITOR`, then `$VISUAL`, then the first of
/// [`FALLBACK_EDITORS`] found on `PATH`.
pub fn get_editor() -> Result<String> {
    ["EDITOR", "VISUAL"]
        .into_iter()
        .filter_map(|var| env::var(var).ok())
        .find(|editor| !editor.trim().is_empty())
        .or_else(|| {
            FALLBACK_EDITORS
                .into_iter()
                .find(|program| on_path(program))
                .map(String::from)
        })
        .ok_or_else(|| {
            ArchpmError::Api("No editor found. Set $EDITOR environment variable.".to_string())
        })
}

fn on_path(program: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

/// Runs the editor on `file_path` and returns the file's content afterwards.
///
/// The editor value may carry arguments (`code --wait`).
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| ArchpmError::Api("Editor command is empty".to_string()))?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| ArchpmError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(ArchpmError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    Ok(fs::read_to_string(path)?)
}

/// Lets the user fill in `form` in their editor. The form is left untouched
/// when the editor fails or the edited text does not parse.
pub fn edit_form(form: &mut FormView) -> Result<()> {
    let temp_file = env::temp_dir().join(format!(
        "archpm_{}_{}.txt",
        form.schema().table,
        std::process::id()
    ));
    fs::write(&temp_file, form.to_buffer())?;

    let edited = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    form.from_buffer(&edited?)
}
