use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::identifiers::{
    AssetId, BranchId, CharacterId, CommandId, SceneId, ScreenId, StackId, VariableId,
};
use crate::variables::{SetVariableOperator, VariableValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub id: CommandId,
    pub body: CommandBody,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Modifiers::is_default")]
    pub modifiers: Modifiers,
}

impl Command {
    pub fn new(id: CommandId, body: CommandBody) -> Self {
        Self {
            id,
            body,
            conditions: Vec::new(),
            modifiers: Modifiers::default(),
        }
    }

    pub fn kind(&self) -> CommandKind {
        self.body.kind()
    }

    pub fn is_blocking(&self) -> bool {
        self.kind().is_blocking()
    }

    /// Branch id for marker commands, `None` for everything else.
    pub fn branch_id(&self) -> Option<&BranchId> {
        match &self.body {
            CommandBody::BranchStart(payload) => Some(&payload.branch_id),
            CommandBody::BranchEnd(payload) => Some(&payload.branch_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub run_async: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<StackId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_order: Option<u32>,
}

impl Modifiers {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StagePosition {
    Left,
    Center,
    Right,
}

impl Default for StagePosition {
    fn default() -> Self {
        Self::Center
    }
}

/// Normalized screen coordinates for floating overlays, 0.0..=1.0 per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialoguePayload {
    /// `None` renders as the narrator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<CharacterId>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump_to: Option<SceneId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoicePayload {
    pub prompt: String,
    pub options: Vec<ChoiceOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextInputPayload {
    pub prompt: String,
    pub variable_id: VariableId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpPayload {
    pub scene_id: SceneId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowScreenPayload {
    pub screen_id: ScreenId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchStartPayload {
    pub branch_id: BranchId,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub is_collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchEndPayload {
    pub branch_id: BranchId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetBackgroundPayload {
    pub image: AssetId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowCharacterPayload {
    pub character_id: CharacterId,
    pub expression: String,
    #[serde(default)]
    pub position: StagePosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HideCharacterPayload {
    pub character_id: CharacterId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetVariablePayload {
    pub variable_id: VariableId,
    pub operator: SetVariableOperator,
    pub value: VariableValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TintScreenPayload {
    pub color: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanZoomScreenPayload {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShakeScreenPayload {
    pub intensity: f64,
    pub seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashScreenPayload {
    pub color: String,
    pub seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowTextPayload {
    pub text: String,
    pub position: OverlayPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowImagePayload {
    pub image: AssetId,
    pub position: OverlayPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowButtonPayload {
    pub label: String,
    pub position: OverlayPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump_to: Option<SceneId>,
    /// Evaluated at replay time in addition to the command's own conditions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub show_conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HideOverlayPayload {
    /// Id of the originating Show command, independent of its position.
    pub target_command_id: CommandId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayMusicPayload {
    pub audio: AssetId,
    #[serde(default)]
    pub looped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaySoundEffectPayload {
    pub audio: AssetId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayMoviePayload {
    pub video: AssetId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitPayload {
    pub seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CommandBody {
    Dialogue(DialoguePayload),
    Choice(ChoicePayload),
    TextInput(TextInputPayload),
    Jump(JumpPayload),
    ShowScreen(ShowScreenPayload),
    BranchStart(BranchStartPayload),
    BranchEnd(BranchEndPayload),
    SetBackground(SetBackgroundPayload),
    ShowCharacter(ShowCharacterPayload),
    HideCharacter(HideCharacterPayload),
    SetVariable(SetVariablePayload),
    TintScreen(TintScreenPayload),
    PanZoomScreen(PanZoomScreenPayload),
    ShakeScreen(ShakeScreenPayload),
    ResetScreenEffects,
    FlashScreen(FlashScreenPayload),
    ShowText(ShowTextPayload),
    ShowImage(ShowImagePayload),
    ShowButton(ShowButtonPayload),
    HideText(HideOverlayPayload),
    HideImage(HideOverlayPayload),
    HideButton(HideOverlayPayload),
    PlayMusic(PlayMusicPayload),
    StopMusic,
    PlaySoundEffect(PlaySoundEffectPayload),
    PlayMovie(PlayMoviePayload),
    Wait(WaitPayload),
}

impl CommandBody {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Dialogue(_) => CommandKind::Dialogue,
            Self::Choice(_) => CommandKind::Choice,
            Self::TextInput(_) => CommandKind::TextInput,
            Self::Jump(_) => CommandKind::Jump,
            Self::ShowScreen(_) => CommandKind::ShowScreen,
            Self::BranchStart(_) => CommandKind::BranchStart,
            Self::BranchEnd(_) => CommandKind::BranchEnd,
            Self::SetBackground(_) => CommandKind::SetBackground,
            Self::ShowCharacter(_) => CommandKind::ShowCharacter,
            Self::HideCharacter(_) => CommandKind::HideCharacter,
            Self::SetVariable(_) => CommandKind::SetVariable,
            Self::TintScreen(_) => CommandKind::TintScreen,
            Self::PanZoomScreen(_) => CommandKind::PanZoomScreen,
            Self::ShakeScreen(_) => CommandKind::ShakeScreen,
            Self::ResetScreenEffects => CommandKind::ResetScreenEffects,
            Self::FlashScreen(_) => CommandKind::FlashScreen,
            Self::ShowText(_) => CommandKind::ShowText,
            Self::ShowImage(_) => CommandKind::ShowImage,
            Self::ShowButton(_) => CommandKind::ShowButton,
            Self::HideText(_) => CommandKind::HideText,
            Self::HideImage(_) => CommandKind::HideImage,
            Self::HideButton(_) => CommandKind::HideButton,
            Self::PlayMusic(_) => CommandKind::PlayMusic,
            Self::StopMusic => CommandKind::StopMusic,
            Self::PlaySoundEffect(_) => CommandKind::PlaySoundEffect,
            Self::PlayMovie(_) => CommandKind::PlayMovie,
            Self::Wait(_) => CommandKind::Wait,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Dialogue,
    Choice,
    TextInput,
    Jump,
    ShowScreen,
    BranchStart,
    BranchEnd,
    SetBackground,
    ShowCharacter,
    HideCharacter,
    SetVariable,
    TintScreen,
    PanZoomScreen,
    ShakeScreen,
    ResetScreenEffects,
    FlashScreen,
    ShowText,
    ShowImage,
    ShowButton,
    HideText,
    HideImage,
    HideButton,
    PlayMusic,
    StopMusic,
    PlaySoundEffect,
    PlayMovie,
    Wait,
}

impl CommandKind {
    /// Blocking commands hold the player until they finish, so they can never
    /// run asynchronously or join a stack group.
    pub fn is_blocking(self) -> bool {
        matches!(
            self,
            Self::Dialogue
                | Self::Choice
                | Self::TextInput
                | Self::Jump
                | Self::ShowScreen
                | Self::BranchStart
                | Self::BranchEnd
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dialogue => "dialogue",
            Self::Choice => "choice",
            Self::TextInput => "text input",
            Self::Jump => "jump",
            Self::ShowScreen => "show screen",
            Self::BranchStart => "branch start",
            Self::BranchEnd => "branch end",
            Self::SetBackground => "set background",
            Self::ShowCharacter => "show character",
            Self::HideCharacter => "hide character",
            Self::SetVariable => "set variable",
            Self::TintScreen => "tint screen",
            Self::PanZoomScreen => "pan/zoom screen",
            Self::ShakeScreen => "shake screen",
            Self::ResetScreenEffects => "reset screen effects",
            Self::FlashScreen => "flash screen",
            Self::ShowText => "show text",
            Self::ShowImage => "show image",
            Self::ShowButton => "show button",
            Self::HideText => "hide text",
            Self::HideImage => "hide image",
            Self::HideButton => "hide button",
            Self::PlayMusic => "play music",
            Self::StopMusic => "stop music",
            Self::PlaySoundEffect => "play sound effect",
            Self::PlayMovie => "play movie",
            Self::Wait => "wait",
        }
    }
}
