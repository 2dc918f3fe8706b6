use std::collections::{HashMap, HashSet};

use serde::Serialize;

use cuebook_core::{
    evaluate_all, AssetId, AssetResolver, CharacterId, CommandBody, CommandId, CommandKind,
    CoreError, OverlayPosition, ProjectLibrary, Scene, SceneId, ShowCharacterPayload,
    StagePosition, VariableEnvironment,
};

pub const DEFAULT_ZOOM: f64 = 1.0;
pub const DEFAULT_PAN: f64 = 0.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundState {
    pub image: AssetId,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLayer {
    pub asset: AssetId,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StagedCharacter {
    pub character_id: CharacterId,
    pub name: String,
    pub expression: String,
    pub position: StagePosition,
    /// Base image first, then each configured layer in rig order.
    pub layers: Vec<ResolvedLayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    /// Id of the Show command that created this overlay; Hide commands
    /// target it by this id regardless of where either command sits.
    pub command_id: CommandId,
    pub position: OverlayPosition,
    pub content: OverlayContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum OverlayContent {
    Text { text: String },
    Image { asset: AssetId, url: Option<String> },
    Button { label: String, jump_to: Option<SceneId> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TintState {
    pub color: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShakeState {
    pub intensity: f64,
    pub seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenEffects {
    pub tint: Option<TintState>,
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub shake: Option<ShakeState>,
}

impl Default for ScreenEffects {
    fn default() -> Self {
        Self {
            tint: None,
            zoom: DEFAULT_ZOOM,
            pan_x: DEFAULT_PAN,
            pan_y: DEFAULT_PAN,
            shake: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusChoiceOption {
    pub id: String,
    pub text: String,
}

/// Transient presentation for exactly the command under inspection. A
/// preview affordance, not an execution of the command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum FocusOverlay {
    Dialogue {
        speaker: Option<String>,
        text: String,
    },
    Choice {
        prompt: String,
        options: Vec<FocusChoiceOption>,
    },
    MoviePlaceholder {
        video: AssetId,
        url: Option<String>,
    },
    Flash {
        color: String,
    },
    Indicator {
        kind: CommandKind,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSnapshot {
    pub background: Option<BackgroundState>,
    pub characters: HashMap<CharacterId, StagedCharacter>,
    pub overlays: Vec<Overlay>,
    pub screen_effects: ScreenEffects,
    pub focus: Option<FocusOverlay>,
    /// Final environment of the fold, kept for debugging surfaces.
    pub environment: VariableEnvironment,
}

/// Replays the scene up to (excluding) `target`, or the whole scene for
/// `None`, and previews the target command as the focus overlay. One forward
/// fold per call; arbitrary navigation just refolds.
pub fn compute_stage_state(
    scene: &Scene,
    library: &ProjectLibrary,
    assets: &dyn AssetResolver,
    target: Option<usize>,
) -> StageSnapshot {
    let mut environment = VariableEnvironment::seeded_from(&library.variables);
    let mut snapshot = StageSnapshot {
        background: None,
        characters: HashMap::new(),
        overlays: Vec::new(),
        screen_effects: ScreenEffects::default(),
        focus: None,
        environment: VariableEnvironment::default(),
    };

    let prefix_len = target.unwrap_or(scene.commands.len()).min(scene.commands.len());
    for command in &scene.commands[..prefix_len] {
        if !evaluate_all(&command.conditions, &environment) {
            continue;
        }
        apply_effect(command, library, assets, &mut snapshot, &mut environment);
    }

    snapshot.focus = target
        .and_then(|index| scene.commands.get(index))
        .filter(|command| evaluate_all(&command.conditions, &environment))
        .map(|command| build_focus(&command.body, library, assets, &environment));
    snapshot.environment = environment;
    snapshot
}

fn apply_effect(
    command: &cuebook_core::Command,
    library: &ProjectLibrary,
    assets: &dyn AssetResolver,
    snapshot: &mut StageSnapshot,
    environment: &mut VariableEnvironment,
) {
    match &command.body {
        CommandBody::SetBackground(payload) => {
            snapshot.background = Some(BackgroundState {
                image: payload.image.clone(),
                url: assets.image_url(&payload.image),
            });
        }
        CommandBody::ShowCharacter(payload) => {
            let staged = resolve_character(payload, library, assets);
            snapshot.characters.insert(payload.character_id.clone(), staged);
        }
        CommandBody::HideCharacter(payload) => {
            snapshot.characters.remove(&payload.character_id);
        }
        CommandBody::SetVariable(payload) => {
            let declared = library
                .variable(&payload.variable_id)
                .map(|variable| variable.variable_type);
            environment.apply_assignment(
                &payload.variable_id,
                payload.operator,
                &payload.value,
                declared,
            );
        }
        CommandBody::TintScreen(payload) => {
            snapshot.screen_effects.tint = Some(TintState {
                color: payload.color.clone(),
                opacity: payload.opacity,
            });
        }
        CommandBody::PanZoomScreen(payload) => {
            let effects = &mut snapshot.screen_effects;
            effects.zoom = payload.zoom;
            effects.pan_x = payload.pan_x;
            effects.pan_y = payload.pan_y;
        }
        CommandBody::ShakeScreen(payload) => {
            snapshot.screen_effects.shake = Some(ShakeState {
                intensity: payload.intensity,
                seconds: payload.seconds,
            });
        }
        CommandBody::ResetScreenEffects => {
            snapshot.screen_effects = ScreenEffects::default();
        }
        CommandBody::ShowText(payload) => {
            snapshot.overlays.push(Overlay {
                command_id: command.id.clone(),
                position: payload.position,
                content: OverlayContent::Text {
                    text: payload.text.clone(),
                },
            });
        }
        CommandBody::ShowImage(payload) => {
            snapshot.overlays.push(Overlay {
                command_id: command.id.clone(),
                position: payload.position,
                content: OverlayContent::Image {
                    asset: payload.image.clone(),
                    url: assets.image_url(&payload.image),
                },
            });
        }
        CommandBody::ShowButton(payload) => {
            if evaluate_all(&payload.show_conditions, environment) {
                snapshot.overlays.push(Overlay {
                    command_id: command.id.clone(),
                    position: payload.position,
                    content: OverlayContent::Button {
                        label: payload.label.clone(),
                        jump_to: payload.jump_to.clone(),
                    },
                });
            }
        }
        CommandBody::HideText(payload)
        | CommandBody::HideImage(payload)
        | CommandBody::HideButton(payload) => {
            // A hide whose show was deleted matches nothing and removes
            // nothing.
            snapshot
                .overlays
                .retain(|overlay| overlay.command_id != payload.target_command_id);
        }
        // Blocking and playback kinds leave nothing behind on the stage.
        CommandBody::Dialogue(_)
        | CommandBody::Choice(_)
        | CommandBody::TextInput(_)
        | CommandBody::Jump(_)
        | CommandBody::ShowScreen(_)
        | CommandBody::BranchStart(_)
        | CommandBody::BranchEnd(_)
        | CommandBody::FlashScreen(_)
        | CommandBody::PlayMusic(_)
        | CommandBody::StopMusic
        | CommandBody::PlaySoundEffect(_)
        | CommandBody::PlayMovie(_)
        | CommandBody::Wait(_) => {}
    }
}

fn resolve_character(
    payload: &ShowCharacterPayload,
    library: &ProjectLibrary,
    assets: &dyn AssetResolver,
) -> StagedCharacter {
    let Some(character) = library.character(&payload.character_id) else {
        tracing::warn!(
            character_id = payload.character_id.as_str(),
            "show references an unknown character; staging a placeholder"
        );
        return StagedCharacter {
            character_id: payload.character_id.clone(),
            name: payload.character_id.as_str().to_owned(),
            expression: payload.expression.clone(),
            position: payload.position,
            layers: Vec::new(),
        };
    };

    let mut layers = vec![ResolvedLayer {
        asset: character.base_image.clone(),
        url: assets.image_url(&character.base_image),
    }];
    for layer in &character.layers {
        // Layers with no asset for this expression are skipped, not errors.
        if let Some(asset) = layer.expressions.get(&payload.expression) {
            layers.push(ResolvedLayer {
                asset: asset.clone(),
                url: assets.image_url(asset),
            });
        }
    }
    StagedCharacter {
        character_id: character.id.clone(),
        name: character.name.clone(),
        expression: payload.expression.clone(),
        position: payload.position,
        layers,
    }
}

fn build_focus(
    body: &CommandBody,
    library: &ProjectLibrary,
    assets: &dyn AssetResolver,
    environment: &VariableEnvironment,
) -> FocusOverlay {
    match body {
        CommandBody::Dialogue(payload) => FocusOverlay::Dialogue {
            speaker: payload
                .speaker
                .as_ref()
                .map(|speaker| speaker_name(speaker, library)),
            text: payload.text.clone(),
        },
        CommandBody::Choice(payload) => FocusOverlay::Choice {
            prompt: payload.prompt.clone(),
            options: payload
                .options
                .iter()
                .filter(|option| evaluate_all(&option.conditions, environment))
                .map(|option| FocusChoiceOption {
                    id: option.id.clone(),
                    text: option.text.clone(),
                })
                .collect(),
        },
        CommandBody::PlayMovie(payload) => FocusOverlay::MoviePlaceholder {
            video: payload.video.clone(),
            url: assets.video_url(&payload.video),
        },
        CommandBody::FlashScreen(payload) => FocusOverlay::Flash {
            color: payload.color.clone(),
        },
        other => FocusOverlay::Indicator { kind: other.kind() },
    }
}

fn speaker_name(character_id: &CharacterId, library: &ProjectLibrary) -> String {
    match library.character(character_id) {
        Some(character) => character.name.clone(),
        None => {
            tracing::warn!(
                character_id = character_id.as_str(),
                "dialogue speaker is not in the character table"
            );
            character_id.as_str().to_owned()
        }
    }
}

pub fn scene_entry_allowed(scene: &Scene, environment: &VariableEnvironment) -> bool {
    evaluate_all(&scene.entry_conditions, environment)
}

/// Follows fallback references from `start` to the first scene whose entry
/// conditions pass against default-seeded variables. A scene with failing
/// conditions and no usable fallback is returned as-is rather than failing
/// the lookup; only an unknown starting id is an error.
pub fn resolve_entry_scene<'a>(
    scenes: &'a [Scene],
    start: &SceneId,
    library: &ProjectLibrary,
) -> Result<&'a Scene, CoreError> {
    let environment = VariableEnvironment::seeded_from(&library.variables);
    let mut current = scenes
        .iter()
        .find(|scene| scene.id == *start)
        .ok_or_else(|| CoreError::UnknownScene {
            scene_id: start.as_str().to_owned(),
        })?;

    let mut visited: HashSet<SceneId> = HashSet::new();
    loop {
        if scene_entry_allowed(current, &environment) {
            return Ok(current);
        }
        visited.insert(current.id.clone());
        let Some(fallback_id) = &current.fallback_scene else {
            return Ok(current);
        };
        if visited.contains(fallback_id) {
            tracing::warn!(
                scene_id = current.id.as_str(),
                "fallback scene references form a cycle; stopping here"
            );
            return Ok(current);
        }
        match scenes.iter().find(|scene| scene.id == *fallback_id) {
            Some(fallback) => current = fallback,
            None => {
                tracing::warn!(
                    fallback = fallback_id.as_str(),
                    "fallback scene does not exist; stopping here"
                );
                return Ok(current);
            }
        }
    }
}
