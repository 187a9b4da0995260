//! ACL command handlers, including index-addressed conditions and actions.

use lbctl_api::types::{
    Acl, AclAction, AclArgumentValue, AclArguments, AclCondition, CreateAclRequest,
    PatchAclRequest,
};
use lbctl_api::{AclService, Filter};
use lbctl_core::acl::{self, AclEntry, EntryChanges, EntryDraft, IndexedEntry};
use lbctl_core::{CoreError, for_each_id, parse_id};
use tabled::Tabled;

use crate::cli::{AclActionCommand, AclArgs, AclCommand, AclConditionCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Argument formatting ─────────────────────────────────────────────

/// `key=value, key=[a, b]`, ordered by key.
fn format_arguments(arguments: &AclArguments) -> String {
    arguments
        .values()
        .map(|arg| match &arg.value {
            AclArgumentValue::Single(v) => format!("{}={v}", arg.name),
            AclArgumentValue::Multiple(vs) => format!("{}=[{}]", arg.name, vs.join(", ")),
            AclArgumentValue::Other(v) => format!("{}={v}", arg.name),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ── ACL ─────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct AclRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Listener")]
    listener_id: String,
    #[tabled(rename = "Target Group")]
    target_group_id: String,
    #[tabled(rename = "Conditions")]
    conditions: usize,
    #[tabled(rename = "Actions")]
    actions: usize,
}

impl From<&Acl> for AclRow {
    fn from(a: &Acl) -> Self {
        Self {
            id: a.id,
            name: a.name.clone(),
            listener_id: output::opt(a.listener_id),
            target_group_id: output::opt(a.target_group_id),
            conditions: a.conditions.len(),
            actions: a.actions.len(),
        }
    }
}

fn acl_detail(a: &Acl) -> String {
    let mut lines = vec![
        format!("ID:            {}", a.id),
        format!("Name:          {}", a.name),
        format!("Listener:      {}", output::opt(a.listener_id)),
        format!("Target Group:  {}", output::opt(a.target_group_id)),
    ];
    lines.push(format!("Conditions:    {}", a.conditions.len()));
    for (i, c) in a.conditions.iter().enumerate() {
        let not = if c.inverted { "!" } else { "" };
        lines.push(format!("  [{i}] {not}{} {}", c.name, format_arguments(&c.arguments)));
    }
    lines.push(format!("Actions:       {}", a.actions.len()));
    for (i, action) in a.actions.iter().enumerate() {
        lines.push(format!(
            "  [{i}] {} {}",
            action.name,
            format_arguments(&action.arguments)
        ));
    }
    lines.push(format!("Created:       {}", output::timestamp(a.created_at.as_ref())));
    lines.push(format!("Updated:       {}", output::timestamp(a.updated_at.as_ref())));
    lines.join("\n")
}

async fn fetch<S: AclService>(svc: &S, id: i32) -> Result<Acl, CoreError> {
    svc.get_acl(id)
        .await
        .map_err(|e| CoreError::api(format!("error retrieving ACL [{id}]"), e))
}

/// The single condition/action `acl create` may embed.
fn initial_entries(
    condition: Option<String>,
    condition_argument: &[String],
    condition_inverted: bool,
    action: Option<String>,
    action_argument: &[String],
) -> Result<(Vec<AclCondition>, Vec<AclAction>), CliError> {
    let conditions = match condition {
        Some(name) => vec![AclCondition {
            name,
            inverted: condition_inverted,
            arguments: acl::parse_arguments(condition_argument)?,
        }],
        None => Vec::new(),
    };
    let actions = match action {
        Some(name) => vec![AclAction {
            name,
            arguments: acl::parse_arguments(action_argument)?,
        }],
        None => Vec::new(),
    };
    Ok((conditions, actions))
}

#[allow(clippy::too_many_lines)]
pub async fn handle<S: AclService>(
    svc: &S,
    args: AclArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AclCommand::List {
            listener,
            target_group,
            list,
        } => {
            let mut params = util::list_params(&list)?;
            if let Some(id) = listener {
                params = params.with_filter(Filter::equals("listener_id", id));
            }
            if let Some(id) = target_group {
                params = params.with_filter(Filter::equals("target_group_id", id));
            }
            let acls = svc
                .get_acls(&params)
                .await
                .map_err(|e| CoreError::api("error retrieving ACLs", e))?;
            util::print_list(global, &acls, |a| AclRow::from(a), |a| a.id.to_string())
        }

        AclCommand::Show(ids) => {
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move { fetch(svc, id?).await }
            })
            .await;
            let acls = util::finish_bulk(outcome, "ACL lookup", global)?;
            util::print_items(global, &acls, |a| AclRow::from(a), acl_detail, |a| {
                a.id.to_string()
            })
        }

        AclCommand::Create {
            name,
            listener,
            target_group,
            condition,
            condition_argument,
            condition_inverted,
            action,
            action_argument,
        } => {
            let (conditions, actions) = initial_entries(
                condition,
                &condition_argument,
                condition_inverted,
                action,
                &action_argument,
            )?;
            let req = CreateAclRequest {
                name,
                listener_id: listener,
                target_group_id: target_group,
                conditions,
                actions,
            };
            let id = svc
                .create_acl(&req)
                .await
                .map_err(|e| CoreError::api("error creating ACL", e))?;
            let acl = fetch(svc, id).await?;
            util::print_single(global, &acl, acl_detail, |a| a.id.to_string())
        }

        AclCommand::Update { ids, name } => {
            let req = &PatchAclRequest {
                name,
                ..PatchAclRequest::default()
            };
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.patch_acl(id, req)
                        .await
                        .map_err(|e| CoreError::api(format!("error updating ACL [{id}]"), e))?;
                    fetch(svc, id).await
                }
            })
            .await;
            let acls = util::finish_bulk(outcome, "ACL update", global)?;
            util::print_items(global, &acls, |a| AclRow::from(a), acl_detail, |a| {
                a.id.to_string()
            })
        }

        AclCommand::Delete(ids) => {
            let prompt = format!("Delete {} ACL(s)?", ids.ids.len());
            if !util::confirm(&prompt, global)? {
                return Ok(());
            }
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.delete_acl(id)
                        .await
                        .map_err(|e| CoreError::api(format!("error removing ACL [{id}]"), e))?;
                    Ok::<_, CoreError>(id)
                }
            })
            .await;
            for id in util::finish_bulk(outcome, "ACL deletion", global)? {
                util::status(global, format!("ACL {id} deleted"));
            }
            Ok(())
        }

        AclCommand::Condition(args) => {
            run_entries::<AclCondition, _>(svc, args.command.into(), global, print_conditions)
                .await
        }
        AclCommand::Action(args) => {
            run_entries::<AclAction, _>(svc, args.command.into(), global, print_actions).await
        }
    }
}

// ── Conditions & actions ────────────────────────────────────────────

#[derive(Tabled)]
struct ConditionRow {
    #[tabled(rename = "Index")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Inverted")]
    inverted: String,
    #[tabled(rename = "Arguments")]
    arguments: String,
}

impl From<&IndexedEntry<AclCondition>> for ConditionRow {
    fn from(c: &IndexedEntry<AclCondition>) -> Self {
        Self {
            index: c.index,
            name: c.entry.name.clone(),
            inverted: util::yes_no(c.entry.inverted),
            arguments: format_arguments(&c.entry.arguments),
        }
    }
}

#[derive(Tabled)]
struct ActionRow {
    #[tabled(rename = "Index")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Arguments")]
    arguments: String,
}

impl From<&IndexedEntry<AclAction>> for ActionRow {
    fn from(a: &IndexedEntry<AclAction>) -> Self {
        Self {
            index: a.index,
            name: a.entry.name.clone(),
            arguments: format_arguments(&a.entry.arguments),
        }
    }
}

fn print_conditions(
    global: &GlobalOpts,
    entries: &[IndexedEntry<AclCondition>],
) -> Result<(), CliError> {
    util::print_list(global, entries, |c| ConditionRow::from(c), |c| {
        c.index.to_string()
    })
}

fn print_actions(global: &GlobalOpts, entries: &[IndexedEntry<AclAction>]) -> Result<(), CliError> {
    util::print_list(global, entries, |a| ActionRow::from(a), |a| a.index.to_string())
}

/// A condition or action subcommand with the kind-specific flags folded in.
#[derive(Debug)]
enum EntryOp {
    List {
        acl_id: String,
    },
    Show {
        acl_id: String,
        indices: Vec<String>,
    },
    Create {
        acl_id: String,
        draft: EntryDraft,
    },
    Update {
        acl_id: String,
        index: String,
        changes: EntryChanges,
    },
    Delete {
        acl_id: String,
        index: String,
    },
}

impl From<AclConditionCommand> for EntryOp {
    fn from(cmd: AclConditionCommand) -> Self {
        match cmd {
            AclConditionCommand::List { acl_id } => Self::List { acl_id },
            AclConditionCommand::Show { acl_id, indices } => Self::Show { acl_id, indices },
            AclConditionCommand::Create {
                acl_id,
                name,
                argument,
                inverted,
            } => Self::Create {
                acl_id,
                draft: EntryDraft {
                    name,
                    inverted,
                    arguments: argument,
                },
            },
            AclConditionCommand::Update {
                acl_id,
                index,
                name,
                argument,
                inverted,
            } => Self::Update {
                acl_id,
                index,
                changes: EntryChanges {
                    name,
                    inverted,
                    arguments: argument,
                },
            },
            AclConditionCommand::Delete { acl_id, index } => Self::Delete { acl_id, index },
        }
    }
}

impl From<AclActionCommand> for EntryOp {
    fn from(cmd: AclActionCommand) -> Self {
        match cmd {
            AclActionCommand::List { acl_id } => Self::List { acl_id },
            AclActionCommand::Show { acl_id, indices } => Self::Show { acl_id, indices },
            AclActionCommand::Create {
                acl_id,
                name,
                argument,
            } => Self::Create {
                acl_id,
                draft: EntryDraft {
                    name,
                    inverted: false,
                    arguments: argument,
                },
            },
            AclActionCommand::Update {
                acl_id,
                index,
                name,
                argument,
            } => Self::Update {
                acl_id,
                index,
                changes: EntryChanges {
                    name,
                    inverted: None,
                    arguments: argument,
                },
            },
            AclActionCommand::Delete { acl_id, index } => Self::Delete { acl_id, index },
        }
    }
}

async fn run_entries<E, S>(
    svc: &S,
    op: EntryOp,
    global: &GlobalOpts,
    print: fn(&GlobalOpts, &[IndexedEntry<E>]) -> Result<(), CliError>,
) -> Result<(), CliError>
where
    E: AclEntry,
    S: AclService,
{
    let entries = match op {
        EntryOp::List { acl_id } => acl::list::<E, S>(svc, parse_id(&acl_id)?).await?,
        EntryOp::Show { acl_id, indices } => {
            let outcome = acl::show::<E, S>(svc, parse_id(&acl_id)?, &indices).await?;
            util::finish_bulk(outcome, &format!("{} lookup", E::KIND), global)?
        }
        EntryOp::Create { acl_id, draft } => {
            acl::create::<E, S>(svc, parse_id(&acl_id)?, draft).await?
        }
        EntryOp::Update {
            acl_id,
            index,
            changes,
        } => acl::update::<E, S>(svc, parse_id(&acl_id)?, &index, changes).await?,
        EntryOp::Delete { acl_id, index } => {
            let acl_id = parse_id(&acl_id)?;
            let prompt = format!("Delete {} [{index}] of ACL {acl_id}?", E::KIND);
            if !util::confirm(&prompt, global)? {
                return Ok(());
            }
            acl::delete::<E, S>(svc, acl_id, &index).await?
        }
    };
    print(global, &entries)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lbctl_api::types::AclArgument;
    use pretty_assertions::assert_eq;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn arguments_render_sorted_by_key() {
        let mut arguments = AclArguments::new();
        arguments.insert(
            "status".into(),
            AclArgument {
                name: "status".into(),
                value: AclArgumentValue::Single("301".into()),
            },
        );
        arguments.insert(
            "hosts".into(),
            AclArgument {
                name: "hosts".into(),
                value: AclArgumentValue::Multiple(strings(&["a.com", "b.com"])),
            },
        );
        assert_eq!(format_arguments(&arguments), "hosts=[a.com, b.com], status=301");
    }

    #[test]
    fn create_embeds_one_condition_and_action() {
        let (conditions, actions) = initial_entries(
            Some("host_matches".into()),
            &strings(&["host[]=a.com", "host[]=b.com"]),
            true,
            Some("redirect".into()),
            &strings(&["location=https://x", "status=301"]),
        )
        .unwrap();

        assert_eq!(conditions.len(), 1);
        assert!(conditions[0].inverted);
        assert_eq!(
            conditions[0].arguments["host"].value,
            AclArgumentValue::Multiple(strings(&["a.com", "b.com"]))
        );
        assert_eq!(actions[0].arguments.len(), 2);
    }

    #[test]
    fn create_without_entries_sends_empty_lists() {
        let (conditions, actions) = initial_entries(None, &[], false, None, &[]).unwrap();
        assert!(conditions.is_empty());
        assert!(actions.is_empty());
    }

    #[test]
    fn malformed_embedded_argument_fails() {
        assert!(initial_entries(None, &[], false, Some("deny".into()), &strings(&["oops"])).is_err());
    }

    #[test]
    fn action_update_never_touches_inverted() {
        let op = EntryOp::from(AclActionCommand::Update {
            acl_id: "5".into(),
            index: "0".into(),
            name: Some("deny".into()),
            argument: None,
        });
        let EntryOp::Update { changes, .. } = op else {
            panic!("expected update");
        };
        assert_eq!(changes.inverted, None);
        assert_eq!(changes.name.as_deref(), Some("deny"));
    }
}
