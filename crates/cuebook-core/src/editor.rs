use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command::{
    BranchEndPayload, BranchStartPayload, Command, CommandBody, Modifiers,
};
use crate::error::CoreError;
use crate::identifiers::{next_serial, BranchId, CommandId, StackId};
use crate::scene::Scene;

/// Marker colors cycle through this palette as branches are added.
pub const BRANCH_COLORS: [&str; 6] = [
    "#e06c75", "#e5c07b", "#98c379", "#56b6c2", "#61afef", "#c678dd",
];

/// Structured rejection for an impossible stack request. Carried as data for
/// the editing surface to display, not as a recoverable-by-retry failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct StackRejection {
    pub reason: String,
}

/// Reducer actions as the editing UI dispatches them: a name plus payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditAction {
    AddCommand {
        body: CommandBody,
    },
    InsertCommand {
        index: usize,
        body: CommandBody,
    },
    AddBranch {
        name: String,
    },
    UpdateCommand {
        command_id: CommandId,
        command: Command,
    },
    DeleteCommand {
        index: usize,
    },
    MoveCommand {
        from: usize,
        to: usize,
    },
    StackCommands {
        command_ids: Vec<CommandId>,
        #[serde(default)]
        stack_id: Option<StackId>,
    },
    UnstackCommand {
        command_id: CommandId,
    },
    RenameBranch {
        branch_id: BranchId,
        name: String,
    },
    RecolorBranch {
        branch_id: BranchId,
        color: String,
    },
    SetBranchCollapsed {
        branch_id: BranchId,
        collapsed: bool,
    },
}

pub fn parse_edit_action(value: &serde_json::Value) -> Result<EditAction, CoreError> {
    serde_json::from_value(value.clone()).map_err(|err| CoreError::InvalidEditPayload {
        reason: err.to_string(),
    })
}

/// Applies one action, returning the replacement scene. Every failure mode
/// degrades to returning the scene unchanged; a stack rejection is logged
/// here because action dispatch has no channel to carry the reason (callers
/// that want it use `stack_commands` directly).
pub fn apply_edit(scene: &Scene, action: &EditAction) -> Scene {
    match action {
        EditAction::AddCommand { body } => add_command(scene, body.clone()),
        EditAction::InsertCommand { index, body } => insert_command(scene, *index, body.clone()),
        EditAction::AddBranch { name } => add_branch(scene, name.clone()),
        EditAction::UpdateCommand {
            command_id,
            command,
        } => update_command(scene, command_id, command.clone()),
        EditAction::DeleteCommand { index } => delete_command(scene, *index),
        EditAction::MoveCommand { from, to } => move_command(scene, *from, *to),
        EditAction::StackCommands {
            command_ids,
            stack_id,
        } => match stack_commands(scene, command_ids, stack_id.clone()) {
            Ok(next) => next,
            Err(rejection) => {
                tracing::warn!(reason = %rejection, "stack request rejected");
                scene.clone()
            }
        },
        EditAction::UnstackCommand { command_id } => unstack_command(scene, command_id),
        EditAction::RenameBranch { branch_id, name } => {
            rename_branch(scene, branch_id, name.clone())
        }
        EditAction::RecolorBranch { branch_id, color } => {
            recolor_branch(scene, branch_id, color.clone())
        }
        EditAction::SetBranchCollapsed {
            branch_id,
            collapsed,
        } => set_branch_collapsed(scene, branch_id, *collapsed),
    }
}

pub fn add_command(scene: &Scene, body: CommandBody) -> Scene {
    insert_command(scene, scene.commands.len(), body)
}

pub fn insert_command(scene: &Scene, index: usize, body: CommandBody) -> Scene {
    if matches!(
        body,
        CommandBody::BranchStart(_) | CommandBody::BranchEnd(_)
    ) {
        tracing::warn!("branch markers are only inserted as pairs via add_branch; ignoring");
        return scene.clone();
    }
    let mut next = scene.clone();
    let id = fresh_command_id(&next);
    let index = index.min(next.commands.len());
    next.commands.insert(index, Command::new(id, body));
    next
}

/// Appends a paired BranchStart/BranchEnd sharing a fresh branch id.
pub fn add_branch(scene: &Scene, name: impl Into<String>) -> Scene {
    let mut next = scene.clone();
    let branch_serial = next_serial(
        "branch",
        next.commands
            .iter()
            .filter_map(|command| command.branch_id())
            .map(BranchId::as_str),
    );
    let branch_id = BranchId::new(format!("branch-{branch_serial}"));

    let start_count = next
        .commands
        .iter()
        .filter(|command| matches!(command.body, CommandBody::BranchStart(_)))
        .count();
    let color = BRANCH_COLORS[start_count % BRANCH_COLORS.len()];

    let command_serial = next_serial("cmd", next.commands.iter().map(|c| c.id.as_str()));
    next.commands.push(Command::new(
        CommandId::new(format!("cmd-{command_serial}")),
        CommandBody::BranchStart(BranchStartPayload {
            branch_id: branch_id.clone(),
            name: name.into(),
            color: color.to_owned(),
            is_collapsed: false,
        }),
    ));
    next.commands.push(Command::new(
        CommandId::new(format!("cmd-{}", command_serial + 1)),
        CommandBody::BranchEnd(BranchEndPayload { branch_id }),
    ));
    next
}

/// In-place replacement. The id stays what the replacement carries (normally
/// the same); branch markers may only be replaced by markers of the same
/// kind and branch id so pairing survives.
pub fn update_command(scene: &Scene, command_id: &CommandId, replacement: Command) -> Scene {
    let Some(index) = scene.command_index(command_id) else {
        tracing::warn!(command_id = command_id.as_str(), "update target not found; ignoring");
        return scene.clone();
    };
    let current = &scene.commands[index];
    let marker_involved = current.branch_id().is_some() || replacement.branch_id().is_some();
    if marker_involved
        && (current.kind() != replacement.kind() || current.branch_id() != replacement.branch_id())
    {
        tracing::warn!(
            command_id = command_id.as_str(),
            "update would break branch marker pairing; ignoring"
        );
        return scene.clone();
    }

    let mut replacement = replacement;
    if replacement.is_blocking() && !replacement.modifiers.is_default() {
        tracing::warn!(
            command_id = command_id.as_str(),
            kind = replacement.kind().label(),
            "blocking commands cannot be stacked or async; clearing modifiers"
        );
        replacement.modifiers = Modifiers::default();
    }

    let mut next = scene.clone();
    next.commands[index] = replacement;
    next
}

/// Deleting a BranchStart removes only the two markers and un-brackets the
/// contained commands. BranchEnd markers are never independently deletable.
pub fn delete_command(scene: &Scene, index: usize) -> Scene {
    let Some(target) = scene.commands.get(index) else {
        tracing::warn!(index, "delete index out of range; ignoring");
        return scene.clone();
    };
    match &target.body {
        CommandBody::BranchEnd(_) => {
            tracing::warn!(index, "branch end markers cannot be deleted directly; ignoring");
            scene.clone()
        }
        CommandBody::BranchStart(_) => match scene.matching_branch_end(index) {
            Some(end_index) => {
                let mut next = scene.clone();
                next.commands.remove(end_index);
                next.commands.remove(index);
                next
            }
            None => {
                tracing::warn!(index, "branch start has no matching end; ignoring");
                scene.clone()
            }
        },
        _ => {
            let mut next = scene.clone();
            next.commands.remove(index);
            next
        }
    }
}

/// Moves one command, or a BranchStart's whole inclusive region as an atomic
/// block. `to` counts positions in the original list (0..=len reads as
/// "insert before the command currently at `to`"); after the block is
/// removed, a forward destination shifts left by the block length. A
/// destination strictly inside the moved region is meaningless and ignored.
pub fn move_command(scene: &Scene, from: usize, to: usize) -> Scene {
    let Some(source) = scene.commands.get(from) else {
        tracing::warn!(from, "move source out of range; ignoring");
        return scene.clone();
    };
    let end = match &source.body {
        CommandBody::BranchEnd(_) => {
            tracing::warn!(from, "branch end markers cannot be moved directly; ignoring");
            return scene.clone();
        }
        CommandBody::BranchStart(_) => match scene.matching_branch_end(from) {
            Some(end_index) => end_index,
            None => {
                tracing::warn!(from, "branch start has no matching end; ignoring");
                return scene.clone();
            }
        },
        _ => from,
    };

    let to = to.min(scene.commands.len());
    if to > from && to <= end {
        tracing::warn!(from, to, "move destination falls inside the moved region; ignoring");
        return scene.clone();
    }

    let block_len = end - from + 1;
    let mut next = scene.clone();
    let block: Vec<Command> = next.commands.drain(from..=end).collect();
    let destination = if to > from { to - block_len } else { to };
    let destination = destination.min(next.commands.len());
    next.commands.splice(destination..destination, block);
    next
}

/// The structured eligibility check behind `stack_commands`: at least two
/// candidates, none of a blocking kind.
pub fn check_stackable(commands: &[&Command]) -> Result<(), StackRejection> {
    if commands.len() < 2 {
        return Err(StackRejection {
            reason: "stacking needs at least two commands".to_owned(),
        });
    }
    if let Some(blocking) = commands.iter().find(|command| command.is_blocking()) {
        return Err(StackRejection {
            reason: format!(
                "'{}' is a {} command, which blocks and cannot be stacked",
                blocking.id.as_str(),
                blocking.kind().label()
            ),
        });
    }
    Ok(())
}

/// Assigns a shared stack id (fresh unless supplied) and zero-based
/// `stack_order` following the argument order, marking each member async.
pub fn stack_commands(
    scene: &Scene,
    command_ids: &[CommandId],
    existing_stack_id: Option<StackId>,
) -> Result<Scene, StackRejection> {
    let mut resolved = Vec::with_capacity(command_ids.len());
    for command_id in command_ids {
        match scene.command(command_id) {
            Some(command) => resolved.push(command),
            None => {
                tracing::warn!(
                    command_id = command_id.as_str(),
                    "stack request references a stale command id; ignoring"
                );
                return Ok(scene.clone());
            }
        }
    }
    check_stackable(&resolved)?;

    let stack_id = existing_stack_id.unwrap_or_else(|| {
        let serial = next_serial(
            "stack",
            scene
                .commands
                .iter()
                .filter_map(|command| command.modifiers.stack_id.as_ref())
                .map(StackId::as_str),
        );
        StackId::new(format!("stack-{serial}"))
    });

    let mut next = scene.clone();
    for (order, command_id) in command_ids.iter().enumerate() {
        if let Some(index) = next.command_index(command_id) {
            let modifiers = &mut next.commands[index].modifiers;
            modifiers.stack_id = Some(stack_id.clone());
            modifiers.stack_order = Some(order as u32);
            modifiers.run_async = true;
        }
    }
    Ok(next)
}

/// Clears stack membership and the async flag on one command only; the rest
/// of its group is untouched.
pub fn unstack_command(scene: &Scene, command_id: &CommandId) -> Scene {
    let Some(index) = scene.command_index(command_id) else {
        tracing::warn!(command_id = command_id.as_str(), "unstack target not found; ignoring");
        return scene.clone();
    };
    let mut next = scene.clone();
    next.commands[index].modifiers = Modifiers::default();
    next
}

pub fn rename_branch(scene: &Scene, branch_id: &BranchId, name: impl Into<String>) -> Scene {
    with_branch_start(scene, branch_id, |payload| payload.name = name.into())
}

pub fn recolor_branch(scene: &Scene, branch_id: &BranchId, color: impl Into<String>) -> Scene {
    with_branch_start(scene, branch_id, |payload| payload.color = color.into())
}

pub fn set_branch_collapsed(scene: &Scene, branch_id: &BranchId, collapsed: bool) -> Scene {
    with_branch_start(scene, branch_id, |payload| payload.is_collapsed = collapsed)
}

fn with_branch_start(
    scene: &Scene,
    branch_id: &BranchId,
    edit: impl FnOnce(&mut BranchStartPayload),
) -> Scene {
    let position = scene.commands.iter().position(|command| {
        matches!(&command.body, CommandBody::BranchStart(payload) if payload.branch_id == *branch_id)
    });
    let Some(index) = position else {
        tracing::warn!(branch_id = branch_id.as_str(), "branch not found; ignoring");
        return scene.clone();
    };
    let mut next = scene.clone();
    if let CommandBody::BranchStart(payload) = &mut next.commands[index].body {
        edit(payload);
    }
    next
}

fn fresh_command_id(scene: &Scene) -> CommandId {
    let serial = next_serial("cmd", scene.commands.iter().map(|c| c.id.as_str()));
    CommandId::new(format!("cmd-{serial}"))
}
