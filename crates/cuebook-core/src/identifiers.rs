use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

string_id!(CommandId);
string_id!(BranchId);
string_id!(StackId);
string_id!(SceneId);
string_id!(VariableId);
string_id!(CharacterId);
string_id!(LayerId);
string_id!(AssetId);
string_id!(ScreenId);

/// Next unused serial for ids shaped `{prefix}-{n}`. Ids that do not match the
/// shape are ignored, so host-authored ids never collide with minted ones.
pub(crate) fn next_serial<'a>(prefix: &str, existing: impl IntoIterator<Item = &'a str>) -> u64 {
    let mut highest = 0u64;
    for id in existing {
        let Some(suffix) = id
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
        else {
            continue;
        };
        if let Ok(serial) = suffix.parse::<u64>() {
            highest = highest.max(serial);
        }
    }
    highest + 1
}
