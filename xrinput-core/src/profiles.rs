use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use xrinput_types::action::ActionType;

#[derive(Debug, Serialize, Deserialize)]
pub struct InteractionProfiles {
    pub profiles: HashMap<String, InteractionProfile>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InteractionProfile {
    pub localized_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    pub user_paths: Vec<String>,
    pub sub_paths: HashMap<String, Subpath>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Subpath {
    pub localized_name: String,
    pub r#type: SubpathType,
    /// Restricts the sub path to a single user path, e.g. the touch controller's `/input/x`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_path: Option<String>,
    pub components: Vec<Component>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    ///Button
    Click,
    ///Button
    Touch,
    ///Value
    Force,
    ///Value
    Value,
    ///Axis2D
    Position,
    ///Axis1D
    Twist,
    Pose,
    Haptic,
}

impl Component {
    pub fn as_str(self) -> &'static str {
        match self {
            Component::Click => "click",
            Component::Touch => "touch",
            Component::Force => "force",
            Component::Value => "value",
            Component::Position => "position",
            Component::Twist => "twist",
            Component::Pose => "pose",
            Component::Haptic => "haptic",
        }
    }

    pub fn ty(self) -> ActionType {
        match self {
            Component::Click => ActionType::BooleanInput,
            Component::Touch => ActionType::BooleanInput,
            Component::Force => ActionType::FloatInput,
            Component::Value => ActionType::FloatInput,
            Component::Position => ActionType::Vector2fInput,
            Component::Twist => ActionType::FloatInput,
            Component::Pose => ActionType::PoseInput,
            Component::Haptic => ActionType::VibrationOutput,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubpathType {
    Button,
    Pose,
    Vibration,
    Trackpad,
    Trigger,
    Joystick,
}

static PROFILES: &str = include_str!("interaction_profiles.json");

static KNOWN_PROFILES: Lazy<InteractionProfiles> = Lazy::new(|| {
    serde_json::from_str(PROFILES).expect("embedded interaction profile table is valid json")
});

/// The interaction profiles xrinput knows the input namespace of
pub fn known_profiles() -> &'static InteractionProfiles {
    &KNOWN_PROFILES
}

impl InteractionProfiles {
    pub fn get(&self, interaction_profile: &str) -> Option<&InteractionProfile> {
        self.profiles.get(interaction_profile)
    }
}

impl InteractionProfile {
    /**
     * Resolves a full binding path against this profile and returns the type of data it produces
     *
     * `<user_path><sub_path>/<component>` is the general form. Haptics and 2D axes are bound without a
     * component, and `/x` or `/y` address a single axis of a position component.
     */
    pub fn source_type(&self, binding: &str) -> Option<ActionType> {
        let (user_path, rest) = self
            .user_paths
            .iter()
            .find_map(|user_path| {
                binding
                    .strip_prefix(user_path.as_str())
                    .filter(|rest| rest.starts_with('/'))
                    .map(|rest| (user_path, rest))
            })?;

        self.sub_paths
            .iter()
            .filter(|(_, sub_path)| {
                sub_path
                    .user_path
                    .as_ref()
                    .map_or(true, |only| only == user_path)
            })
            .find_map(|(identifier, sub_path)| {
                let suffix = rest.strip_prefix(identifier.as_str())?;
                let components = &sub_path.components;

                if suffix.is_empty() {
                    return components
                        .iter()
                        .find(|c| matches!(c, Component::Position | Component::Haptic))
                        .map(|c| c.ty());
                }

                let name = suffix.strip_prefix('/')?;
                if (name == "x" || name == "y") && components.contains(&Component::Position) {
                    return Some(ActionType::FloatInput);
                }
                components
                    .iter()
                    .find(|c| **c != Component::Haptic && c.as_str() == name)
                    .map(|c| c.ty())
            })
    }
}

/// Whether data of type `source` can drive an action of type `action`.
/// Booleans and floats convert into each other, everything else must match exactly.
pub fn can_drive(source: ActionType, action: ActionType) -> bool {
    use ActionType::*;
    match (source, action) {
        (BooleanInput | FloatInput, BooleanInput | FloatInput) => true,
        (source, action) => source == action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOUCH: &str = "/interaction_profiles/oculus/touch_controller";

    #[test]
    fn embedded_table_parses() {
        let profiles = known_profiles();
        assert_eq!(profiles.profiles.len(), 4);
        assert_eq!(
            profiles
                .get("/interaction_profiles/valve/index_controller")
                .unwrap()
                .localized_name,
            "Valve Index Controller"
        );
    }

    #[test]
    fn source_types() {
        let touch = known_profiles().get(TOUCH).unwrap();

        assert_eq!(
            touch.source_type("/user/hand/left/input/squeeze/value"),
            Some(ActionType::FloatInput)
        );
        assert_eq!(
            touch.source_type("/user/hand/right/input/grip/pose"),
            Some(ActionType::PoseInput)
        );
        assert_eq!(
            touch.source_type("/user/hand/left/output/haptic"),
            Some(ActionType::VibrationOutput)
        );
        assert_eq!(
            touch.source_type("/user/hand/right/input/thumbstick"),
            Some(ActionType::Vector2fInput)
        );
        assert_eq!(
            touch.source_type("/user/hand/right/input/thumbstick/y"),
            Some(ActionType::FloatInput)
        );
    }

    #[test]
    fn hand_restricted_sub_paths() {
        let touch = known_profiles().get(TOUCH).unwrap();

        assert_eq!(
            touch.source_type("/user/hand/left/input/menu/click"),
            Some(ActionType::BooleanInput)
        );
        assert_eq!(touch.source_type("/user/hand/right/input/menu/click"), None);
        assert_eq!(touch.source_type("/user/hand/left/input/a/click"), None);
    }

    #[test]
    fn unknown_components() {
        let simple = known_profiles()
            .get("/interaction_profiles/khr/simple_controller")
            .unwrap();

        assert_eq!(simple.source_type("/user/hand/left/input/select/value"), None);
        assert_eq!(simple.source_type("/user/hand/left/input/trigger/value"), None);
        assert_eq!(simple.source_type("/user/head/input/select/click"), None);
        assert_eq!(simple.source_type("/user/hand/left/output/haptic/haptic"), None);
    }

    #[test]
    fn conversions() {
        assert!(can_drive(ActionType::BooleanInput, ActionType::FloatInput));
        assert!(can_drive(ActionType::FloatInput, ActionType::BooleanInput));
        assert!(can_drive(ActionType::PoseInput, ActionType::PoseInput));
        assert!(!can_drive(ActionType::FloatInput, ActionType::PoseInput));
        assert!(!can_drive(ActionType::Vector2fInput, ActionType::FloatInput));
        assert!(!can_drive(ActionType::BooleanInput, ActionType::VibrationOutput));
    }
}
