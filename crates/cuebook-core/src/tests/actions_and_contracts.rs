use serde_json::json;

use super::*;

#[test]
fn edit_actions_dispatch_like_direct_calls() {
    let scene = sample_scene(vec![
        play_music("cmd-1", "theme"),
        play_sound("cmd-2", "chime"),
    ]);

    let added = apply_edit(
        &scene,
        &EditAction::AddCommand {
            body: CommandBody::StopMusic,
        },
    );
    assert_eq!(added, add_command(&scene, CommandBody::StopMusic));

    let stacked = apply_edit(
        &scene,
        &EditAction::StackCommands {
            command_ids: vec![CommandId::new("cmd-1"), CommandId::new("cmd-2")],
            stack_id: None,
        },
    );
    assert!(stacked.commands[0].modifiers.run_async);

    let moved = apply_edit(&scene, &EditAction::MoveCommand { from: 0, to: 2 });
    assert_eq!(moved, move_command(&scene, 0, 2));
}

#[test]
fn rejected_stack_action_returns_the_scene_unchanged() {
    let scene = sample_scene(vec![
        dialogue("cmd-1", "Hi"),
        play_sound("cmd-2", "chime"),
    ]);
    let next = apply_edit(
        &scene,
        &EditAction::StackCommands {
            command_ids: vec![CommandId::new("cmd-1"), CommandId::new("cmd-2")],
            stack_id: None,
        },
    );
    assert_eq!(next, scene);
}

#[test]
fn edit_actions_cross_the_wire_as_name_plus_payload() {
    let action = EditAction::MoveCommand { from: 3, to: 0 };
    let value = serde_json::to_value(&action).expect("serialize action");
    assert_eq!(value, json!({"action": "move_command", "from": 3, "to": 0}));

    let parsed = parse_edit_action(&json!({
        "action": "set_branch_collapsed",
        "branch_id": "branch-1",
        "collapsed": true
    }))
    .expect("parse action");
    assert_eq!(
        parsed,
        EditAction::SetBranchCollapsed {
            branch_id: BranchId::new("branch-1"),
            collapsed: true
        }
    );
}

#[test]
fn malformed_action_payloads_surface_a_typed_error() {
    let err = parse_edit_action(&json!({"action": "move_command", "from": "first"}))
        .expect_err("malformed payload should fail");
    assert!(matches!(err, CoreError::InvalidEditPayload { .. }));
}

#[test]
fn scene_serialization_round_trip_preserves_the_flat_contract() {
    let mut scene = sample_scene(vec![
        branch_start("cmd-1", "branch-1"),
        show_character("cmd-2", "alice"),
        branch_end("cmd-3", "branch-1"),
    ]);
    scene.entry_conditions = vec![Condition {
        variable_id: VariableId::new("met_alice"),
        operator: ConditionOperator::IsTrue,
        value: VariableValue::default(),
    }];
    scene.fallback_scene = Some(SceneId::new("scene-2"));

    let json = serde_json::to_string(&scene).expect("serialize scene");
    let parsed: Scene = serde_json::from_str(&json).expect("deserialize scene");
    assert_eq!(parsed, scene);

    // The list stays flat on the wire; markers are ordinary entries.
    let value: serde_json::Value = serde_json::from_str(&json).expect("scene as value");
    let commands = value["commands"].as_array().expect("commands array");
    assert_eq!(commands.len(), 3);
    assert_eq!(commands[0]["body"]["type"], "BranchStart");
}
