use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use cuebook_core::{BranchId, Command, CommandBody, Scene};

/// View-only browsing state. Deliberately not part of the Scene so multiple
/// views can browse the same scene with different collapse sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneViewState {
    pub collapsed_branches: HashSet<BranchId>,
    pub selected_index: Option<usize>,
}

impl SceneViewState {
    /// Starts a view from the authored `is_collapsed` defaults on the
    /// scene's start markers.
    pub fn seeded_from(scene: &Scene) -> Self {
        let collapsed_branches = scene
            .commands
            .iter()
            .filter_map(|command| match &command.body {
                CommandBody::BranchStart(payload) if payload.is_collapsed => {
                    Some(payload.branch_id.clone())
                }
                _ => None,
            })
            .collect();
        Self {
            collapsed_branches,
            selected_index: None,
        }
    }

    pub fn toggle_collapsed(&mut self, branch_id: &BranchId) {
        if !self.collapsed_branches.remove(branch_id) {
            self.collapsed_branches.insert(branch_id.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleRow {
    pub command: Command,
    pub absolute_index: usize,
    pub depth: usize,
}

struct OpenBranch {
    branch_id: BranchId,
    is_collapsed: bool,
}

/// Walks the flat list with an explicit stack of open branch regions. A
/// collapsed branch keeps both of its own marker rows visible and hides
/// everything between them; anything nested under a collapsed ancestor is
/// hidden entirely.
pub fn resolve_visible_rows(
    commands: &[Command],
    collapsed: &HashSet<BranchId>,
) -> Vec<VisibleRow> {
    let mut rows = Vec::new();
    let mut open: Vec<OpenBranch> = Vec::new();
    let mut depth = 0usize;

    for (index, command) in commands.iter().enumerate() {
        let hidden = open.iter().any(|frame| frame.is_collapsed);
        match &command.body {
            CommandBody::BranchStart(payload) => {
                if !hidden {
                    rows.push(VisibleRow {
                        command: command.clone(),
                        absolute_index: index,
                        depth,
                    });
                }
                let is_collapsed = collapsed.contains(&payload.branch_id);
                open.push(OpenBranch {
                    branch_id: payload.branch_id.clone(),
                    is_collapsed,
                });
                if !is_collapsed {
                    depth += 1;
                }
            }
            CommandBody::BranchEnd(payload) => {
                let frame_index = open
                    .iter()
                    .rposition(|frame| frame.branch_id == payload.branch_id);
                match frame_index {
                    Some(frame_index) => {
                        let frame = open.remove(frame_index);
                        if !frame.is_collapsed {
                            depth = depth.saturating_sub(1);
                        }
                        // Hidden only when a *different* collapsed region
                        // still encloses this closer.
                        if !open.iter().any(|frame| frame.is_collapsed) {
                            rows.push(VisibleRow {
                                command: command.clone(),
                                absolute_index: index,
                                depth,
                            });
                        }
                    }
                    None => {
                        tracing::warn!(
                            branch_id = payload.branch_id.as_str(),
                            "branch end without an open start; emitting as-is"
                        );
                        if !hidden {
                            rows.push(VisibleRow {
                                command: command.clone(),
                                absolute_index: index,
                                depth,
                            });
                        }
                    }
                }
            }
            _ => {
                if !hidden {
                    rows.push(VisibleRow {
                        command: command.clone(),
                        absolute_index: index,
                        depth,
                    });
                }
            }
        }
    }
    rows
}
