// ── ACL condition/action editor ──
//
// The API has no endpoints for individual conditions or actions: each
// edit is a read-modify-write of the whole array on the parent ACL,
// followed by a re-fetch. Indices are always checked against the ACL as
// it was just fetched.

use lbctl_api::AclService;
use lbctl_api::types::{
    Acl, AclAction, AclArgument, AclArgumentValue, AclArguments, AclCondition, PatchAclRequest,
};
use serde::Serialize;
use tracing::debug;

use crate::bulk::BulkOutcome;
use crate::error::CoreError;

// ── Entry abstraction ───────────────────────────────────────────────

/// A positional entry of an ACL: a condition or an action.
pub trait AclEntry: Clone + Serialize {
    /// Singular noun used in messages (`"condition"`, `"action"`).
    const KIND: &'static str;

    fn entries(acl: &Acl) -> &[Self];

    /// Patch request replacing the whole array with `entries`.
    fn patch(entries: Vec<Self>) -> PatchAclRequest;

    fn build(name: String, inverted: bool, arguments: AclArguments) -> Self;

    fn apply(&mut self, update: EntryUpdate);
}

impl AclEntry for AclCondition {
    const KIND: &'static str = "condition";

    fn entries(acl: &Acl) -> &[Self] {
        &acl.conditions
    }

    fn patch(entries: Vec<Self>) -> PatchAclRequest {
        PatchAclRequest {
            conditions: Some(entries),
            ..PatchAclRequest::default()
        }
    }

    fn build(name: String, inverted: bool, arguments: AclArguments) -> Self {
        Self {
            name,
            inverted,
            arguments,
        }
    }

    fn apply(&mut self, update: EntryUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(inverted) = update.inverted {
            self.inverted = inverted;
        }
        if let Some(arguments) = update.arguments {
            self.arguments = arguments;
        }
    }
}

impl AclEntry for AclAction {
    const KIND: &'static str = "action";

    fn entries(acl: &Acl) -> &[Self] {
        &acl.actions
    }

    fn patch(entries: Vec<Self>) -> PatchAclRequest {
        PatchAclRequest {
            actions: Some(entries),
            ..PatchAclRequest::default()
        }
    }

    fn build(name: String, _inverted: bool, arguments: AclArguments) -> Self {
        Self { name, arguments }
    }

    fn apply(&mut self, update: EntryUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(arguments) = update.arguments {
            self.arguments = arguments;
        }
    }
}

/// An entry together with its zero-based position in the ACL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedEntry<E> {
    pub index: usize,
    #[serde(flatten)]
    pub entry: E,
}

fn indexed<E: AclEntry>(acl: &Acl) -> Vec<IndexedEntry<E>> {
    E::entries(acl)
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, entry)| IndexedEntry { index, entry })
        .collect()
}

// ── Inputs ──────────────────────────────────────────────────────────

/// A new entry as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub name: String,
    pub inverted: bool,
    pub arguments: Vec<String>,
}

/// Changes to an existing entry; `None` leaves the field untouched.
/// Supplied arguments replace the whole argument map.
#[derive(Debug, Clone, Default)]
pub struct EntryChanges {
    pub name: Option<String>,
    pub inverted: Option<bool>,
    pub arguments: Option<Vec<String>>,
}

/// [`EntryChanges`] with arguments already parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryUpdate {
    pub name: Option<String>,
    pub inverted: Option<bool>,
    pub arguments: Option<AclArguments>,
}

impl EntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.inverted.is_none() && self.arguments.is_none()
    }
}

impl TryFrom<EntryChanges> for EntryUpdate {
    type Error = CoreError;

    fn try_from(changes: EntryChanges) -> Result<Self, Self::Error> {
        Ok(Self {
            name: changes.name,
            inverted: changes.inverted,
            arguments: changes
                .arguments
                .as_deref()
                .map(parse_arguments)
                .transpose()?,
        })
    }
}

// ── Argument parsing ────────────────────────────────────────────────

/// Parse `key=value` / `key[]=value` strings into an argument map.
///
/// `key=value` stores a scalar, overwriting any earlier value for `key`.
/// `key[]=value` appends to a list for `key`, promoting an earlier scalar
/// to the first element. Any malformed entry fails the whole parse.
pub fn parse_arguments(raw: &[String]) -> Result<AclArguments, CoreError> {
    let mut arguments = AclArguments::new();

    for item in raw {
        let mut parts = item.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(CoreError::validation(
                "--argument",
                format!("'{item}' must contain exactly one '=' (key=value)"),
            ));
        };

        let (name, is_list) = match key.strip_suffix("[]") {
            Some(name) => (name, true),
            None => (key, false),
        };
        if name.is_empty() {
            return Err(CoreError::validation(
                "--argument",
                format!("'{item}' has an empty key"),
            ));
        }

        if is_list {
            let slot = arguments
                .entry(name.to_owned())
                .or_insert_with(|| AclArgument {
                    name: name.to_owned(),
                    value: AclArgumentValue::Multiple(Vec::new()),
                });
            match &mut slot.value {
                AclArgumentValue::Multiple(values) => values.push(value.to_owned()),
                AclArgumentValue::Single(previous) => {
                    let first = std::mem::take(previous);
                    slot.value = AclArgumentValue::Multiple(vec![first, value.to_owned()]);
                }
                AclArgumentValue::Other(_) => {
                    slot.value = AclArgumentValue::Multiple(vec![value.to_owned()]);
                }
            }
        } else {
            arguments.insert(
                name.to_owned(),
                AclArgument {
                    name: name.to_owned(),
                    value: AclArgumentValue::Single(value.to_owned()),
                },
            );
        }
    }

    Ok(arguments)
}

/// Parse a positional index given on the command line.
pub fn parse_index(raw: &str) -> Result<usize, CoreError> {
    raw.trim().parse::<usize>().map_err(|_| {
        CoreError::validation("index", format!("'{raw}' is not a valid non-negative index"))
    })
}

fn check_bounds<E: AclEntry>(index: usize, len: usize) -> Result<(), CoreError> {
    if index < len {
        Ok(())
    } else {
        Err(CoreError::IndexOutOfBounds {
            kind: E::KIND,
            index,
            len,
        })
    }
}

// ── Operations ──────────────────────────────────────────────────────

async fn fetch<S: AclService>(svc: &S, acl_id: i32) -> Result<Acl, CoreError> {
    svc.get_acl(acl_id)
        .await
        .map_err(|e| CoreError::api(format!("error retrieving ACL [{acl_id}]"), e))
}

async fn submit<E: AclEntry, S: AclService>(
    svc: &S,
    acl_id: i32,
    entries: Vec<E>,
) -> Result<(), CoreError> {
    debug!(acl_id, kind = E::KIND, count = entries.len(), "patching ACL");
    svc.patch_acl(acl_id, &E::patch(entries))
        .await
        .map_err(|e| CoreError::api(format!("error updating ACL [{acl_id}]"), e))
}

async fn refetch<E: AclEntry, S: AclService>(
    svc: &S,
    acl_id: i32,
) -> Result<Vec<IndexedEntry<E>>, CoreError> {
    let acl = fetch(svc, acl_id).await?;
    Ok(indexed(&acl))
}

/// Every entry of the ACL, annotated with its index.
pub async fn list<E: AclEntry, S: AclService>(
    svc: &S,
    acl_id: i32,
) -> Result<Vec<IndexedEntry<E>>, CoreError> {
    refetch(svc, acl_id).await
}

/// Entries at the given indices. Invalid or out-of-range indices are
/// reported as failures; the rest are still returned.
pub async fn show<E: AclEntry, S: AclService>(
    svc: &S,
    acl_id: i32,
    indices: &[String],
) -> Result<BulkOutcome<IndexedEntry<E>>, CoreError> {
    let acl = fetch(svc, acl_id).await?;
    let entries = E::entries(&acl);

    let mut outcome = BulkOutcome::default();
    for raw in indices {
        let result = parse_index(raw).and_then(|index| {
            check_bounds::<E>(index, entries.len())?;
            Ok(IndexedEntry {
                index,
                entry: entries[index].clone(),
            })
        });
        outcome.record(result);
    }
    Ok(outcome)
}

/// Append a new entry and return the updated collection.
pub async fn create<E: AclEntry, S: AclService>(
    svc: &S,
    acl_id: i32,
    draft: EntryDraft,
) -> Result<Vec<IndexedEntry<E>>, CoreError> {
    let arguments = parse_arguments(&draft.arguments)?;

    let acl = fetch(svc, acl_id).await?;
    let mut entries = E::entries(&acl).to_vec();
    entries.push(E::build(draft.name, draft.inverted, arguments));

    submit(svc, acl_id, entries).await?;
    refetch(svc, acl_id).await
}

/// Apply `changes` to the entry at `index`. Nothing is patched when no
/// change was supplied.
pub async fn update<E: AclEntry, S: AclService>(
    svc: &S,
    acl_id: i32,
    index: &str,
    changes: EntryChanges,
) -> Result<Vec<IndexedEntry<E>>, CoreError> {
    let index = parse_index(index)?;
    let update = EntryUpdate::try_from(changes)?;

    let acl = fetch(svc, acl_id).await?;
    let mut entries = E::entries(&acl).to_vec();
    check_bounds::<E>(index, entries.len())?;

    if update.is_empty() {
        debug!(acl_id, index, "no changes supplied, skipping patch");
    } else {
        if let Some(entry) = entries.get_mut(index) {
            entry.apply(update);
        }
        submit(svc, acl_id, entries).await?;
    }

    refetch(svc, acl_id).await
}

/// Remove the entry at `index`, keeping the order of the rest.
pub async fn delete<E: AclEntry, S: AclService>(
    svc: &S,
    acl_id: i32,
    index: &str,
) -> Result<Vec<IndexedEntry<E>>, CoreError> {
    let index = parse_index(index)?;

    let acl = fetch(svc, acl_id).await?;
    let mut entries = E::entries(&acl).to_vec();
    check_bounds::<E>(index, entries.len())?;
    entries.remove(index);

    submit(svc, acl_id, entries).await?;
    refetch(svc, acl_id).await
}
