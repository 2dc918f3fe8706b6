pub mod replay;
pub mod stacks;
pub mod visibility;

pub use replay::{
    compute_stage_state, resolve_entry_scene, scene_entry_allowed, BackgroundState,
    FocusChoiceOption, FocusOverlay, Overlay, OverlayContent, ResolvedLayer, ScreenEffects,
    ShakeState, StageSnapshot, StagedCharacter, TintState,
};
pub use stacks::{resolve_stack_views, CommandView, StackSlot};
pub use visibility::{resolve_visible_rows, SceneViewState, VisibleRow};
