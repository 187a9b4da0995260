//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use lbctl_api::ListParams;
use lbctl_core::BulkOutcome;
use lbctl_core::validate;
use tabled::Tabled;

use crate::cli::{GlobalOpts, ListArgs};
use crate::error::{CliError, exit_code};
use crate::output;

/// Build collection query parameters from `--filter/--sort/--page/--per-page`.
pub fn list_params(list: &ListArgs) -> Result<ListParams, CliError> {
    Ok(validate::list_params(
        &list.filter,
        list.sort.as_deref(),
        list.page,
        list.per_page,
    )?)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, global: &GlobalOpts) -> Result<bool, CliError> {
    if global.yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.trim_end_matches('?').into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Print a status line on stderr unless `--quiet`.
pub fn status(global: &GlobalOpts, message: impl std::fmt::Display) {
    if !global.quiet {
        eprintln!("{message}");
    }
}

/// Report per-ID failures as warnings and return the successes.
///
/// Fails with [`CliError::AllFailed`] when IDs were requested and none
/// succeeded; the exit code is that of the first failure.
pub fn finish_bulk<T>(
    outcome: BulkOutcome<T>,
    operation: &str,
    global: &GlobalOpts,
) -> Result<Vec<T>, CliError> {
    let requested = outcome.requested();
    let all_failed = outcome.all_failed();

    let mut exit = None;
    for failure in outcome.failures {
        let err = CliError::from(failure);
        exit.get_or_insert(err.exit_code());
        output::warn(&err, &global.color);
    }

    if all_failed {
        return Err(CliError::AllFailed {
            operation: operation.into(),
            count: requested,
            exit: exit.unwrap_or(exit_code::GENERAL),
        });
    }
    Ok(outcome.items)
}

/// Render a list of resources.
pub fn print_list<T, R>(
    global: &GlobalOpts,
    items: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<(), CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    let out = output::render_list(&global.output, items, to_row, id_fn)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Render a single resource.
pub fn print_single<T>(
    global: &GlobalOpts,
    item: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<(), CliError>
where
    T: serde::Serialize,
{
    let out = output::render_single(&global.output, item, detail_fn, id_fn)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Render the results of a multi-ID show/update: one item as a detail
/// view, several as a list.
pub fn print_items<T, R>(
    global: &GlobalOpts,
    items: &[T],
    to_row: impl Fn(&T) -> R,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<(), CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match items {
        [] => Ok(()),
        [single] => print_single(global, single, detail_fn, id_fn),
        many => print_list(global, many, to_row, id_fn),
    }
}

/// Read a PEM file given on the command line.
pub fn read_pem(flag: &str, path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| {
        CliError::validation(flag, format!("cannot read '{}': {e}", path.display()))
    })
}

/// Read an optional PEM file.
pub fn read_optional_pem(flag: &str, path: Option<&Path>) -> Result<Option<String>, CliError> {
    path.map(|p| read_pem(flag, p)).transpose()
}

/// `yes`/`no` cell.
pub fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.into()
}
