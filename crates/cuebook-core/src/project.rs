use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::identifiers::{AssetId, CharacterId, LayerId, VariableId};
use crate::variables::Variable;

/// One configurable image layer of a character rig. The `expressions` map
/// names the asset shown for each expression; expressions with no entry leave
/// the layer out entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterLayer {
    pub id: LayerId,
    pub name: String,
    #[serde(default)]
    pub expressions: BTreeMap<String, AssetId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub base_image: AssetId,
    #[serde(default)]
    pub layers: Vec<CharacterLayer>,
}

/// Read-only project data the host store hands to replay: the declared
/// variable table and the character rigs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectLibrary {
    pub variables: Vec<Variable>,
    pub characters: Vec<Character>,
}

impl ProjectLibrary {
    pub fn variable(&self, variable_id: &VariableId) -> Option<&Variable> {
        self.variables
            .iter()
            .find(|variable| variable.id == *variable_id)
    }

    pub fn character(&self, character_id: &CharacterId) -> Option<&Character> {
        self.characters
            .iter()
            .find(|character| character.id == *character_id)
    }
}
