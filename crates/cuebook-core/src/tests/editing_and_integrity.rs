use super::*;

#[test]
fn add_command_appends_with_a_fresh_unique_id() {
    let scene = sample_scene(vec![dialogue("cmd-3", "Hi")]);
    let next = add_command(&scene, CommandBody::StopMusic);

    assert_eq!(next.commands.len(), 2);
    assert_eq!(next.commands[1].id.as_str(), "cmd-4");
    assert_eq!(scene.commands.len(), 1, "reducer must not mutate its input");
}

#[test]
fn insert_command_clamps_the_index() {
    let scene = sample_scene(vec![dialogue("cmd-1", "Hi")]);
    let next = insert_command(&scene, 99, CommandBody::StopMusic);
    assert_eq!(ids(&next), vec!["cmd-1", "cmd-2"]);

    let next = insert_command(&scene, 0, CommandBody::StopMusic);
    assert_eq!(ids(&next), vec!["cmd-2", "cmd-1"]);
}

#[test]
fn raw_branch_markers_cannot_be_inserted() {
    let scene = sample_scene(vec![]);
    let next = add_command(
        &scene,
        CommandBody::BranchEnd(BranchEndPayload {
            branch_id: BranchId::new("b1"),
        }),
    );
    assert_eq!(next, scene);
}

#[test]
fn add_branch_appends_a_paired_region_with_fresh_ids() {
    let scene = sample_scene(vec![dialogue("cmd-1", "Hi")]);
    let next = add_branch(&scene, "Good ending");

    assert_eq!(next.commands.len(), 3);
    let start = &next.commands[1];
    let end = &next.commands[2];
    assert_eq!(start.branch_id(), end.branch_id());
    assert_eq!(start.branch_id().expect("branch id").as_str(), "branch-1");
    match &start.body {
        CommandBody::BranchStart(payload) => {
            assert_eq!(payload.name, "Good ending");
            assert!(!payload.is_collapsed);
            assert_eq!(payload.color, BRANCH_COLORS[0]);
        }
        other => panic!("expected branch start, got {other:?}"),
    }
    assert_well_formed(&next);

    let again = add_branch(&next, "Bad ending");
    assert_eq!(
        again.commands[3].branch_id().expect("branch id").as_str(),
        "branch-2"
    );
    assert_well_formed(&again);
}

#[test]
fn deleting_a_branch_start_unbrackets_the_contents() {
    // Scenario: [BranchStart(b1), ShowCharacter, BranchEnd(b1)] -> delete 0.
    let scene = sample_scene(vec![
        branch_start("cmd-1", "b1"),
        show_character("cmd-2", "alice"),
        branch_end("cmd-3", "b1"),
    ]);
    let next = delete_command(&scene, 0);

    assert_eq!(ids(&next), vec!["cmd-2"]);
    assert!(matches!(
        next.commands[0].body,
        CommandBody::ShowCharacter(_)
    ));
}

#[test]
fn deleting_a_nested_branch_start_keeps_outer_pairing() {
    let scene = sample_scene(vec![
        branch_start("cmd-1", "outer"),
        branch_start("cmd-2", "inner"),
        dialogue("cmd-3", "Hi"),
        branch_end("cmd-4", "inner"),
        branch_end("cmd-5", "outer"),
    ]);
    let next = delete_command(&scene, 1);

    assert_eq!(ids(&next), vec!["cmd-1", "cmd-3", "cmd-5"]);
    assert_well_formed(&next);
}

#[test]
fn deleting_a_branch_end_is_a_no_op() {
    let scene = sample_scene(vec![
        branch_start("cmd-1", "b1"),
        branch_end("cmd-2", "b1"),
    ]);
    assert_eq!(delete_command(&scene, 1), scene);
}

#[test]
fn deleting_an_unmatched_branch_start_is_a_no_op() {
    let scene = sample_scene(vec![branch_start("cmd-1", "b1"), dialogue("cmd-2", "Hi")]);
    assert_eq!(delete_command(&scene, 0), scene);
}

#[test]
fn deleting_a_stale_index_is_a_no_op() {
    let scene = sample_scene(vec![dialogue("cmd-1", "Hi")]);
    assert_eq!(delete_command(&scene, 5), scene);
}

#[test]
fn moving_a_plain_command_splices_it() {
    let scene = sample_scene(vec![
        dialogue("cmd-1", "a"),
        dialogue("cmd-2", "b"),
        dialogue("cmd-3", "c"),
    ]);
    // Destination counts original positions: before cmd-3.
    assert_eq!(ids(&move_command(&scene, 0, 2)), vec!["cmd-2", "cmd-1", "cmd-3"]);
    // One past the end lands it last.
    assert_eq!(ids(&move_command(&scene, 0, 3)), vec!["cmd-2", "cmd-3", "cmd-1"]);
    // Backward moves use the destination untouched.
    assert_eq!(ids(&move_command(&scene, 2, 0)), vec!["cmd-3", "cmd-1", "cmd-2"]);
}

#[test]
fn moving_a_branch_start_carries_the_whole_region() {
    let scene = sample_scene(vec![
        branch_start("cmd-1", "b1"),
        dialogue("cmd-2", "inside"),
        branch_end("cmd-3", "b1"),
        dialogue("cmd-4", "after"),
        dialogue("cmd-5", "tail"),
    ]);
    let next = move_command(&scene, 0, 4);

    assert_eq!(
        ids(&next),
        vec!["cmd-4", "cmd-1", "cmd-2", "cmd-3", "cmd-5"]
    );
    assert_well_formed(&next);
}

#[test]
fn moving_a_branch_region_to_the_end_preserves_internal_order() {
    let scene = sample_scene(vec![
        branch_start("cmd-1", "b1"),
        dialogue("cmd-2", "inside"),
        branch_end("cmd-3", "b1"),
        dialogue("cmd-4", "after"),
    ]);
    let next = move_command(&scene, 0, 4);

    assert_eq!(ids(&next), vec!["cmd-4", "cmd-1", "cmd-2", "cmd-3"]);
    assert_well_formed(&next);
}

#[test]
fn move_destination_just_past_the_region_is_an_identity() {
    let scene = sample_scene(vec![
        branch_start("cmd-1", "b1"),
        dialogue("cmd-2", "inside"),
        branch_end("cmd-3", "b1"),
        dialogue("cmd-4", "after"),
    ]);
    assert_eq!(move_command(&scene, 0, 3), scene);
}

#[test]
fn move_destination_inside_the_moved_region_is_a_no_op() {
    let scene = sample_scene(vec![
        branch_start("cmd-1", "b1"),
        dialogue("cmd-2", "inside"),
        branch_end("cmd-3", "b1"),
        dialogue("cmd-4", "after"),
    ]);
    assert_eq!(move_command(&scene, 0, 1), scene);
    assert_eq!(move_command(&scene, 0, 2), scene);
}

#[test]
fn moving_a_branch_end_is_a_no_op() {
    let scene = sample_scene(vec![
        branch_start("cmd-1", "b1"),
        branch_end("cmd-2", "b1"),
        dialogue("cmd-3", "after"),
    ]);
    assert_eq!(move_command(&scene, 1, 3), scene);
}

#[test]
fn moving_a_command_into_a_sibling_region_keeps_pairing() {
    let scene = sample_scene(vec![
        dialogue("cmd-1", "loose"),
        branch_start("cmd-2", "b1"),
        dialogue("cmd-3", "inside"),
        branch_end("cmd-4", "b1"),
    ]);
    let next = move_command(&scene, 0, 3);

    assert_eq!(ids(&next), vec!["cmd-2", "cmd-3", "cmd-1", "cmd-4"]);
    assert_well_formed(&next);
}

#[test]
fn well_formedness_survives_an_edit_sequence() {
    let mut scene = sample_scene(vec![dialogue("cmd-1", "Hi")]);
    scene = add_branch(&scene, "first");
    scene = add_branch(&scene, "second");
    scene = move_command(&scene, 1, 6);
    assert_well_formed(&scene);
    scene = add_command(&scene, CommandBody::StopMusic);
    scene = move_command(&scene, 3, 0);
    assert_well_formed(&scene);
    scene = delete_command(&scene, scene.commands.len() - 1);
    let start_index = scene
        .commands
        .iter()
        .position(|command| matches!(command.body, CommandBody::BranchStart(_)))
        .expect("a branch start survives");
    scene = delete_command(&scene, start_index);
    assert_well_formed(&scene);
}

#[test]
fn update_command_replaces_in_place_and_keeps_position() {
    let scene = sample_scene(vec![dialogue("cmd-1", "Hi"), dialogue("cmd-2", "Bye")]);
    let replacement = dialogue("cmd-1", "Hello again");
    let next = update_command(&scene, &CommandId::new("cmd-1"), replacement.clone());

    assert_eq!(next.commands[0], replacement);
    assert_eq!(next.commands[1], scene.commands[1]);
}

#[test]
fn update_with_a_stale_id_is_a_no_op() {
    let scene = sample_scene(vec![dialogue("cmd-1", "Hi")]);
    let next = update_command(&scene, &CommandId::new("cmd-9"), dialogue("cmd-9", "?"));
    assert_eq!(next, scene);
}

#[test]
fn update_cannot_rewrite_a_marker_into_another_kind() {
    let scene = sample_scene(vec![
        branch_start("cmd-1", "b1"),
        branch_end("cmd-2", "b1"),
    ]);
    let next = update_command(&scene, &CommandId::new("cmd-1"), dialogue("cmd-1", "?"));
    assert_eq!(next, scene);

    // Same kind, different branch id would also break pairing.
    let next = update_command(&scene, &CommandId::new("cmd-1"), branch_start("cmd-1", "b2"));
    assert_eq!(next, scene);
}

#[test]
fn update_strips_stack_modifiers_from_blocking_commands() {
    let scene = sample_scene(vec![dialogue("cmd-1", "Hi")]);
    let mut replacement = dialogue("cmd-1", "Hi");
    replacement.modifiers = Modifiers {
        run_async: true,
        stack_id: Some(StackId::new("stack-1")),
        stack_order: Some(0),
    };
    let next = update_command(&scene, &CommandId::new("cmd-1"), replacement);
    assert!(next.commands[0].modifiers.is_default());
}

#[test]
fn stack_commands_assigns_shared_id_order_and_async() {
    // Scenario: stacking [PlayMusic, PlaySoundEffect] succeeds with orders 0/1.
    let scene = sample_scene(vec![
        play_music("cmd-1", "theme"),
        play_sound("cmd-2", "chime"),
    ]);
    let next = stack_commands(
        &scene,
        &[CommandId::new("cmd-1"), CommandId::new("cmd-2")],
        None,
    )
    .expect("stackable commands");

    let first = &next.commands[0].modifiers;
    let second = &next.commands[1].modifiers;
    assert_eq!(first.stack_id.as_ref().expect("stack id").as_str(), "stack-1");
    assert_eq!(first.stack_id, second.stack_id);
    assert_eq!(first.stack_order, Some(0));
    assert_eq!(second.stack_order, Some(1));
    assert!(first.run_async && second.run_async);
}

#[test]
fn stack_order_follows_argument_order_not_position() {
    let scene = sample_scene(vec![
        play_music("cmd-1", "theme"),
        play_sound("cmd-2", "chime"),
    ]);
    let next = stack_commands(
        &scene,
        &[CommandId::new("cmd-2"), CommandId::new("cmd-1")],
        None,
    )
    .expect("stackable commands");

    assert_eq!(next.commands[0].modifiers.stack_order, Some(1));
    assert_eq!(next.commands[1].modifiers.stack_order, Some(0));
}

#[test]
fn stacking_into_an_existing_group_reuses_the_supplied_id() {
    let scene = sample_scene(vec![
        play_music("cmd-1", "theme"),
        play_sound("cmd-2", "chime"),
    ]);
    let next = stack_commands(
        &scene,
        &[CommandId::new("cmd-1"), CommandId::new("cmd-2")],
        Some(StackId::new("stack-9")),
    )
    .expect("stackable commands");
    assert_eq!(
        next.commands[0].modifiers.stack_id.as_ref().expect("stack id").as_str(),
        "stack-9"
    );
}

#[test]
fn stack_rejection_names_the_blocking_command() {
    // Scenario: stacking [Dialogue, PlaySoundEffect] fails, naming the dialogue.
    let scene = sample_scene(vec![
        dialogue("cmd-1", "Hi"),
        play_sound("cmd-2", "chime"),
    ]);
    let rejection = stack_commands(
        &scene,
        &[CommandId::new("cmd-1"), CommandId::new("cmd-2")],
        None,
    )
    .expect_err("blocking command should reject");

    assert!(rejection.reason.contains("cmd-1"));
    assert!(rejection.reason.contains("dialogue"));
}

#[test]
fn stacking_fewer_than_two_commands_is_rejected() {
    let scene = sample_scene(vec![play_music("cmd-1", "theme")]);
    let rejection = stack_commands(&scene, &[CommandId::new("cmd-1")], None)
        .expect_err("single command should reject");
    assert!(rejection.reason.contains("two"));
}

#[test]
fn stacking_with_a_stale_id_leaves_the_scene_unchanged() {
    let scene = sample_scene(vec![
        play_music("cmd-1", "theme"),
        play_sound("cmd-2", "chime"),
    ]);
    let next = stack_commands(
        &scene,
        &[CommandId::new("cmd-1"), CommandId::new("cmd-9")],
        None,
    )
    .expect("stale ids degrade to a no-op");
    assert_eq!(next, scene);
}

#[test]
fn unstack_clears_one_member_only() {
    let scene = sample_scene(vec![
        play_music("cmd-1", "theme"),
        play_sound("cmd-2", "chime"),
    ]);
    let stacked = stack_commands(
        &scene,
        &[CommandId::new("cmd-1"), CommandId::new("cmd-2")],
        None,
    )
    .expect("stackable commands");

    let next = unstack_command(&stacked, &CommandId::new("cmd-1"));
    assert!(next.commands[0].modifiers.is_default());
    assert_eq!(next.commands[1].modifiers, stacked.commands[1].modifiers);
}

#[test]
fn branch_field_edits_are_localized_to_the_start_marker() {
    let scene = sample_scene(vec![
        branch_start("cmd-1", "b1"),
        dialogue("cmd-2", "Hi"),
        branch_end("cmd-3", "b1"),
    ]);
    let branch = BranchId::new("b1");

    let renamed = rename_branch(&scene, &branch, "True route");
    let recolored = recolor_branch(&renamed, &branch, "#ffffff");
    let collapsed = set_branch_collapsed(&recolored, &branch, true);

    match &collapsed.commands[0].body {
        CommandBody::BranchStart(payload) => {
            assert_eq!(payload.name, "True route");
            assert_eq!(payload.color, "#ffffff");
            assert!(payload.is_collapsed);
        }
        other => panic!("expected branch start, got {other:?}"),
    }
    assert_eq!(collapsed.commands[1], scene.commands[1]);
    assert_eq!(collapsed.commands[2], scene.commands[2]);

    let stale = rename_branch(&scene, &BranchId::new("b9"), "nope");
    assert_eq!(stale, scene);
}
