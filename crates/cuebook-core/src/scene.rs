use serde::{Deserialize, Serialize};

use crate::command::{Command, CommandBody};
use crate::condition::Condition;
use crate::identifiers::{CommandId, SceneId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    pub name: String,
    pub commands: Vec<Command>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry_conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_scene: Option<SceneId>,
}

impl Scene {
    pub fn new(id: SceneId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            commands: Vec::new(),
            entry_conditions: Vec::new(),
            fallback_scene: None,
        }
    }

    pub fn command(&self, command_id: &CommandId) -> Option<&Command> {
        self.commands.iter().find(|command| command.id == *command_id)
    }

    pub fn command_index(&self, command_id: &CommandId) -> Option<usize> {
        self.commands.iter().position(|command| command.id == *command_id)
    }

    /// Index of the nearest BranchEnd after `start_index` sharing its
    /// `branch_id`. `None` when the marker at `start_index` is not a
    /// BranchStart or its closer is missing (an integrity violation the
    /// editor recovers from as a no-op).
    pub fn matching_branch_end(&self, start_index: usize) -> Option<usize> {
        let start = self.commands.get(start_index)?;
        let CommandBody::BranchStart(payload) = &start.body else {
            return None;
        };
        self.commands[start_index + 1..]
            .iter()
            .position(|command| {
                matches!(&command.body, CommandBody::BranchEnd(end) if end.branch_id == payload.branch_id)
            })
            .map(|offset| start_index + 1 + offset)
    }
}
