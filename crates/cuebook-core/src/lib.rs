pub mod assets;
pub mod command;
pub mod condition;
pub mod editor;
pub mod error;
pub mod identifiers;
pub mod project;
pub mod scene;
pub mod variables;

pub use assets::{AssetResolver, NullAssetResolver};
pub use command::{
    BranchEndPayload, BranchStartPayload, ChoiceOption, ChoicePayload, Command, CommandBody,
    CommandKind, DialoguePayload, FlashScreenPayload, HideCharacterPayload, HideOverlayPayload,
    JumpPayload, Modifiers, OverlayPosition, PanZoomScreenPayload, PlayMoviePayload,
    PlayMusicPayload, PlaySoundEffectPayload, SetBackgroundPayload, SetVariablePayload,
    ShakeScreenPayload, ShowButtonPayload, ShowCharacterPayload, ShowImagePayload,
    ShowScreenPayload, ShowTextPayload, StagePosition, TextInputPayload, TintScreenPayload,
    WaitPayload,
};
pub use condition::{evaluate_all, Condition, ConditionOperator};
pub use editor::{
    add_branch, add_command, apply_edit, check_stackable, delete_command, insert_command,
    move_command, parse_edit_action, recolor_branch, rename_branch, set_branch_collapsed,
    stack_commands, unstack_command, update_command, EditAction, StackRejection, BRANCH_COLORS,
};
pub use error::CoreError;
pub use identifiers::{
    AssetId, BranchId, CharacterId, CommandId, LayerId, SceneId, ScreenId, StackId, VariableId,
};
pub use project::{Character, CharacterLayer, ProjectLibrary};
pub use scene::Scene;
pub use variables::{
    SetVariableOperator, Variable, VariableEnvironment, VariableType, VariableValue,
};
