use std::collections::HashMap;

use serde::Serialize;

use cuebook_core::{Command, StackId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackSlot {
    pub command: Command,
    pub absolute_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CommandView {
    Single(StackSlot),
    Stack {
        stack_id: StackId,
        members: Vec<StackSlot>,
    },
}

/// One left-to-right pass: a stack group surfaces where its first member
/// sits, with later members folded in and re-sorted by `stack_order`.
/// Physical interleaving of group members is tolerated, not repaired.
pub fn resolve_stack_views(commands: &[Command]) -> Vec<CommandView> {
    let mut views: Vec<CommandView> = Vec::new();
    let mut group_positions: HashMap<StackId, usize> = HashMap::new();

    for (index, command) in commands.iter().enumerate() {
        let slot = StackSlot {
            command: command.clone(),
            absolute_index: index,
        };
        match &command.modifiers.stack_id {
            Some(stack_id) => match group_positions.get(stack_id) {
                Some(&view_index) => {
                    if let CommandView::Stack { members, .. } = &mut views[view_index] {
                        members.push(slot);
                    }
                }
                None => {
                    group_positions.insert(stack_id.clone(), views.len());
                    views.push(CommandView::Stack {
                        stack_id: stack_id.clone(),
                        members: vec![slot],
                    });
                }
            },
            None => views.push(CommandView::Single(slot)),
        }
    }

    for view in &mut views {
        if let CommandView::Stack { members, .. } = view {
            members.sort_by_key(|slot| {
                (
                    slot.command.modifiers.stack_order.unwrap_or(u32::MAX),
                    slot.absolute_index,
                )
            });
        }
    }
    views
}
