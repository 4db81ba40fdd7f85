use std::{collections::HashSet, fmt, fs, path::Path};

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use thiserror::Error;
use xrinput_types::{action::ActionType, user_path::TopLevelPath};

use crate::profiles::{self, known_profiles};

// Sizes include the trailing nul of the runtime's fixed char arrays
pub const MAX_ACTION_SET_NAME_SIZE: usize = 64;
pub const MAX_LOCALIZED_ACTION_SET_NAME_SIZE: usize = 128;
pub const MAX_ACTION_NAME_SIZE: usize = 64;
pub const MAX_LOCALIZED_ACTION_NAME_SIZE: usize = 128;

static NAME_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_.-]+$").unwrap());

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read action manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed action manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Empty {field} in action set `{action_set}`")]
    EmptyName {
        action_set: String,
        field: &'static str,
    },
    #[error("Invalid name `{0}`, only lowercase letters, digits, '-', '_' and '.' are allowed")]
    InvalidName(String),
    #[error("Name `{name}` does not fit in {size} bytes")]
    NameTooLong { name: String, size: usize },
    #[error("Duplicate action set `{0}`")]
    DuplicateActionSet(String),
    #[error("Duplicate action `{action}` in action set `{action_set}`")]
    DuplicateAction { action_set: String, action: String },
    #[error("Interaction profile `{0}` has more than one set of suggested bindings")]
    DuplicateInteractionProfile(String),
    #[error("Binding for unknown action `{action}` in `{interaction_profile}`")]
    UnknownAction {
        interaction_profile: String,
        action: String,
    },
    #[error("Unsupported subaction path in binding `{0}`")]
    UnsupportedSubactionPath(String),
    #[error("Binding `{binding}` is suggested twice for action `{action}` in `{interaction_profile}`")]
    DuplicateBinding {
        interaction_profile: String,
        action: String,
        binding: String,
    },
    #[error("`{interaction_profile}` has no input or output at `{binding}`")]
    UnsupportedBinding {
        interaction_profile: String,
        binding: String,
    },
    #[error("`{binding}` produces {source_type} data which cannot drive {action_type} action `{action}`")]
    BindingTypeMismatch {
        binding: String,
        action: String,
        source_type: ActionType,
        action_type: ActionType,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestWarning {
    NoActions {
        action_set: String,
    },
    UnboundAction {
        action: String,
        interaction_profile: String,
    },
    UnknownInteractionProfile(String),
    PoseWithoutSubactionPaths {
        action_set: String,
        action: String,
    },
}

impl fmt::Display for ManifestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestWarning::NoActions { action_set } => {
                write!(f, "Action set `{action_set}` has no actions")
            }
            ManifestWarning::UnboundAction {
                action,
                interaction_profile,
            } => write!(f, "Action `{action}` has no binding for `{interaction_profile}`"),
            ManifestWarning::UnknownInteractionProfile(interaction_profile) => write!(
                f,
                "Unknown interaction profile `{interaction_profile}`, its bindings are passed to the runtime unchecked"
            ),
            ManifestWarning::PoseWithoutSubactionPaths { action_set, action } => {
                write!(f, "Pose action `{action}` in `{action_set}` has no subaction paths")
            }
        }
    }
}

/**
 * A set of action sets with their suggested bindings
 *
 * Manifests are strict json: comments and trailing commas are rejected and keys are case sensitive.
 */
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionManifest {
    pub action_sets: Vec<ActionSetManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSetManifest {
    pub name: String,
    pub localized_name: String,
    #[serde(default)]
    pub priority: u32,
    #[serde(default)]
    pub actions: Vec<ActionDescription>,
    #[serde(default)]
    pub suggested_bindings: Vec<ProfileBindings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescription {
    pub name: String,
    pub localized_name: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    #[serde(default)]
    pub use_subaction_paths: bool,
}

/**
 * The suggested bindings of one interaction profile
 *
 * In json every key besides `interactionProfile` names an action and maps to its binding paths.
 * Key order is kept since it decides the order of the binding table.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileBindings {
    pub interaction_profile: String,
    pub bindings: Vec<(String, Vec<String>)>,
}

impl ProfileBindings {
    pub fn len(&self) -> usize {
        self.bindings.iter().map(|(_, paths)| paths.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every (action name, binding path) pair in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().flat_map(|(action, paths)| {
            paths
                .iter()
                .map(move |path| (action.as_str(), path.as_str()))
        })
    }
}

impl Serialize for ProfileBindings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bindings.len() + 1))?;
        map.serialize_entry("interactionProfile", &self.interaction_profile)?;
        for (action, paths) in &self.bindings {
            map.serialize_entry(action, paths)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ProfileBindings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ProfileBindingsVisitor;

        impl<'de> Visitor<'de> for ProfileBindingsVisitor {
            type Value = ProfileBindings;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object with an interactionProfile and action bindings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut interaction_profile = None;
                let mut bindings = Vec::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "interactionProfile" {
                        if interaction_profile.is_some() {
                            return Err(de::Error::duplicate_field("interactionProfile"));
                        }
                        interaction_profile = Some(map.next_value::<String>()?);
                    } else if bindings.iter().any(|(action, _)| *action == key) {
                        return Err(de::Error::custom(format_args!(
                            "action `{key}` is bound more than once"
                        )));
                    } else {
                        let paths = map.next_value::<Vec<String>>()?;
                        bindings.push((key, paths));
                    }
                }

                match interaction_profile {
                    Some(interaction_profile) if !interaction_profile.is_empty() => {
                        Ok(ProfileBindings {
                            interaction_profile,
                            bindings,
                        })
                    }
                    Some(_) => Err(de::Error::invalid_value(
                        de::Unexpected::Str(""),
                        &"a non-empty interaction profile path",
                    )),
                    None => Err(de::Error::missing_field("interactionProfile")),
                }
            }
        }

        deserializer.deserialize_map(ProfileBindingsVisitor)
    }
}

impl ActionManifest {
    /// Parses and validates a manifest
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest = serde_json::from_str::<ActionManifest>(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let json = fs::read_to_string(path)?;
        log::debug!("Loading action manifest {}", path.display());
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn action_set(&self, name: &str) -> Option<&ActionSetManifest> {
        self.action_sets.iter().find(|set| set.name == name)
    }

    pub fn warnings(&self) -> Vec<ManifestWarning> {
        self.action_sets
            .iter()
            .flat_map(|action_set| action_set.warnings())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ManifestError> {
        let mut names = HashSet::new();
        for action_set in &self.action_sets {
            if !names.insert(action_set.name.as_str()) {
                return Err(ManifestError::DuplicateActionSet(action_set.name.clone()));
            }
            action_set.validate()?;
        }
        Ok(())
    }
}

impl ActionSetManifest {
    pub fn action(&self, name: &str) -> Option<&ActionDescription> {
        self.actions.iter().find(|action| action.name == name)
    }

    pub fn profile_bindings(&self, interaction_profile: &str) -> Option<&ProfileBindings> {
        self.suggested_bindings
            .iter()
            .find(|bindings| bindings.interaction_profile == interaction_profile)
    }

    /// The hands an action is created with, derived from everything it is bound to
    pub fn subaction_paths(&self, action: &str) -> Vec<TopLevelPath> {
        self.suggested_bindings
            .iter()
            .flat_map(|profile| profile.iter())
            .filter(|(bound, _)| *bound == action)
            .filter_map(|(_, binding)| TopLevelPath::of_binding(binding))
            .sorted()
            .dedup()
            .collect()
    }

    /// The user paths referenced by any action in the set, in resolution order
    pub fn used_top_level_paths(&self) -> Vec<TopLevelPath> {
        self.actions
            .iter()
            .flat_map(|action| self.subaction_paths(&action.name))
            .sorted()
            .dedup()
            .collect()
    }

    /// Every distinct binding path across all profiles, sorted
    pub fn binding_paths(&self) -> Vec<&str> {
        self.suggested_bindings
            .iter()
            .flat_map(|profile| profile.iter())
            .map(|(_, binding)| binding)
            .sorted()
            .dedup()
            .collect()
    }

    pub fn validate(&self) -> Result<(), ManifestError> {
        check_name(
            &self.name,
            &self.name,
            "name",
            MAX_ACTION_SET_NAME_SIZE,
            true,
        )?;
        check_name(
            &self.name,
            &self.localized_name,
            "localized name",
            MAX_LOCALIZED_ACTION_SET_NAME_SIZE,
            false,
        )?;

        let mut action_names = HashSet::new();
        for action in &self.actions {
            check_name(
                &self.name,
                &action.name,
                "action name",
                MAX_ACTION_NAME_SIZE,
                true,
            )?;
            check_name(
                &self.name,
                &action.localized_name,
                "localized action name",
                MAX_LOCALIZED_ACTION_NAME_SIZE,
                false,
            )?;
            if !action_names.insert(action.name.as_str()) {
                return Err(ManifestError::DuplicateAction {
                    action_set: self.name.clone(),
                    action: action.name.clone(),
                });
            }
        }

        let mut profiles = HashSet::new();
        for suggested in &self.suggested_bindings {
            if !profiles.insert(suggested.interaction_profile.as_str()) {
                return Err(ManifestError::DuplicateInteractionProfile(
                    suggested.interaction_profile.clone(),
                ));
            }
            self.validate_profile_bindings(suggested)?;
        }

        for warning in self.warnings() {
            log::warn!("{warning}");
        }

        Ok(())
    }

    /// Problems that do not stop the set from being created but likely leave actions unusable
    pub fn warnings(&self) -> Vec<ManifestWarning> {
        let mut warnings = Vec::new();
        if self.actions.is_empty() {
            warnings.push(ManifestWarning::NoActions {
                action_set: self.name.clone(),
            });
        }

        for suggested in &self.suggested_bindings {
            let interaction_profile = &suggested.interaction_profile;
            if known_profiles().get(interaction_profile).is_none() {
                warnings.push(ManifestWarning::UnknownInteractionProfile(
                    interaction_profile.clone(),
                ));
            }
            for action in &self.actions {
                let bound = suggested
                    .bindings
                    .iter()
                    .any(|(bound, paths)| *bound == action.name && !paths.is_empty());
                if !bound {
                    warnings.push(ManifestWarning::UnboundAction {
                        action: action.name.clone(),
                        interaction_profile: interaction_profile.clone(),
                    });
                }
            }
        }

        for action in &self.actions {
            if action.action_type == ActionType::PoseInput
                && self.subaction_paths(&action.name).is_empty()
            {
                warnings.push(ManifestWarning::PoseWithoutSubactionPaths {
                    action_set: self.name.clone(),
                    action: action.name.clone(),
                });
            }
        }

        warnings
    }

    fn validate_profile_bindings(&self, suggested: &ProfileBindings) -> Result<(), ManifestError> {
        let interaction_profile = &suggested.interaction_profile;
        let known_profile = known_profiles().get(interaction_profile);

        for (action_name, paths) in &suggested.bindings {
            let action =
                self.action(action_name)
                    .ok_or_else(|| ManifestError::UnknownAction {
                        interaction_profile: interaction_profile.clone(),
                        action: action_name.clone(),
                    })?;

            let mut seen = HashSet::new();
            for binding in paths {
                if TopLevelPath::of_binding(binding).is_none() {
                    return Err(ManifestError::UnsupportedSubactionPath(binding.clone()));
                }
                if !seen.insert(binding.as_str()) {
                    return Err(ManifestError::DuplicateBinding {
                        interaction_profile: interaction_profile.clone(),
                        action: action_name.clone(),
                        binding: binding.clone(),
                    });
                }

                let Some(profile) = known_profile else { continue };
                let source_type = profile.source_type(binding).ok_or_else(|| {
                    ManifestError::UnsupportedBinding {
                        interaction_profile: interaction_profile.clone(),
                        binding: binding.clone(),
                    }
                })?;
                if !profiles::can_drive(source_type, action.action_type) {
                    return Err(ManifestError::BindingTypeMismatch {
                        binding: binding.clone(),
                        action: action_name.clone(),
                        source_type,
                        action_type: action.action_type,
                    });
                }
            }
        }

        Ok(())
    }
}

fn check_name(
    action_set: &str,
    name: &str,
    field: &'static str,
    size: usize,
    restrict_format: bool,
) -> Result<(), ManifestError> {
    if name.is_empty() {
        return Err(ManifestError::EmptyName {
            action_set: action_set.to_owned(),
            field,
        });
    }
    if name.len() + 1 > size {
        return Err(ManifestError::NameTooLong {
            name: name.to_owned(),
            size,
        });
    }
    if restrict_format && !NAME_FORMAT.is_match(name) {
        return Err(ManifestError::InvalidName(name.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(bindings: &str) -> String {
        format!(
            r#"{{
                "actionSets": [{{
                    "name": "gameplay",
                    "localizedName": "Gameplay",
                    "actions": [
                        {{ "name": "grab_object", "localizedName": "Grab Object", "type": "float", "useSubactionPaths": true }},
                        {{ "name": "hand_pose", "localizedName": "Hand Pose", "type": "pose", "useSubactionPaths": true }},
                        {{ "name": "vibrate_hand", "localizedName": "Vibrate Hand", "type": "vibration" }}
                    ],
                    "suggestedBindings": [{bindings}]
                }}]
            }}"#
        )
    }

    #[test]
    fn parses_and_keeps_binding_order() {
        let manifest = ActionManifest::from_json(&manifest(
            r#"{
                "interactionProfile": "/interaction_profiles/valve/index_controller",
                "vibrate_hand": ["/user/hand/right/output/haptic"],
                "grab_object": ["/user/hand/right/input/trigger/value", "/user/hand/left/input/trigger/value"]
            }"#,
        ))
        .unwrap();

        let set = manifest.action_set("gameplay").unwrap();
        assert_eq!(set.priority, 0);
        assert_eq!(
            set.action("vibrate_hand").unwrap().action_type,
            ActionType::VibrationOutput
        );
        assert!(!set.action("vibrate_hand").unwrap().use_subaction_paths);

        let table = set
            .profile_bindings("/interaction_profiles/valve/index_controller")
            .unwrap();
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![
                ("vibrate_hand", "/user/hand/right/output/haptic"),
                ("grab_object", "/user/hand/right/input/trigger/value"),
                ("grab_object", "/user/hand/left/input/trigger/value"),
            ]
        );

        assert_eq!(
            set.subaction_paths("grab_object"),
            vec![TopLevelPath::UserHandLeft, TopLevelPath::UserHandRight]
        );
        assert_eq!(
            set.subaction_paths("vibrate_hand"),
            vec![TopLevelPath::UserHandRight]
        );
        assert!(set.subaction_paths("hand_pose").is_empty());
        assert_eq!(
            set.binding_paths(),
            vec![
                "/user/hand/left/input/trigger/value",
                "/user/hand/right/input/trigger/value",
                "/user/hand/right/output/haptic",
            ]
        );
    }

    #[test]
    fn reserializes_bindings_as_keys() {
        let manifest = ActionManifest::from_json(&manifest(
            r#"{
                "interactionProfile": "/interaction_profiles/khr/simple_controller",
                "grab_object": ["/user/hand/left/input/select/click"]
            }"#,
        ))
        .unwrap();

        let json = serde_json::to_value(&manifest).unwrap();
        let bindings = &json["actionSets"][0]["suggestedBindings"][0];
        assert_eq!(
            bindings["interactionProfile"],
            "/interaction_profiles/khr/simple_controller"
        );
        assert_eq!(
            bindings["grab_object"][0],
            "/user/hand/left/input/select/click"
        );
    }

    #[test]
    fn missing_interaction_profile() {
        let err = ActionManifest::from_json(&manifest(
            r#"{ "grab_object": ["/user/hand/left/input/select/click"] }"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ManifestError::Json(_)), "{err}");
    }

    #[test]
    fn unknown_action() {
        let err = ActionManifest::from_json(&manifest(
            r#"{
                "interactionProfile": "/interaction_profiles/khr/simple_controller",
                "quit_session": ["/user/hand/left/input/menu/click"]
            }"#,
        ))
        .unwrap_err();
        assert!(
            matches!(&err, ManifestError::UnknownAction { action, .. } if action == "quit_session"),
            "{err}"
        );
    }

    #[test]
    fn unsupported_subaction_path() {
        let err = ActionManifest::from_json(&manifest(
            r#"{
                "interactionProfile": "/interaction_profiles/khr/simple_controller",
                "grab_object": ["/user/head/input/select/click"]
            }"#,
        ))
        .unwrap_err();
        assert!(
            matches!(err, ManifestError::UnsupportedSubactionPath(_)),
            "{err}"
        );
    }

    #[test]
    fn duplicate_binding() {
        let err = ActionManifest::from_json(&manifest(
            r#"{
                "interactionProfile": "/interaction_profiles/khr/simple_controller",
                "grab_object": ["/user/hand/left/input/select/click", "/user/hand/left/input/select/click"]
            }"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateBinding { .. }), "{err}");
    }

    #[test]
    fn binding_not_in_profile() {
        let err = ActionManifest::from_json(&manifest(
            r#"{
                "interactionProfile": "/interaction_profiles/khr/simple_controller",
                "grab_object": ["/user/hand/left/input/trigger/value"]
            }"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ManifestError::UnsupportedBinding { .. }), "{err}");
    }

    #[test]
    fn binding_type_mismatch() {
        let err = ActionManifest::from_json(&manifest(
            r#"{
                "interactionProfile": "/interaction_profiles/khr/simple_controller",
                "hand_pose": ["/user/hand/left/input/select/click"]
            }"#,
        ))
        .unwrap_err();
        assert!(
            matches!(
                err,
                ManifestError::BindingTypeMismatch {
                    source_type: ActionType::BooleanInput,
                    action_type: ActionType::PoseInput,
                    ..
                }
            ),
            "{err}"
        );
    }

    #[test]
    fn unknown_profiles_are_not_checked() {
        let manifest = ActionManifest::from_json(&manifest(
            r#"{
                "interactionProfile": "/interaction_profiles/example/prototype",
                "grab_object": ["/user/hand/left/input/anything/value"]
            }"#,
        ))
        .unwrap();
        assert_eq!(manifest.action_sets[0].suggested_bindings[0].len(), 1);
    }

    #[test]
    fn duplicate_interaction_profile() {
        let err = ActionManifest::from_json(&manifest(
            r#"{
                "interactionProfile": "/interaction_profiles/khr/simple_controller",
                "grab_object": ["/user/hand/left/input/select/click"]
            }, {
                "interactionProfile": "/interaction_profiles/khr/simple_controller",
                "grab_object": ["/user/hand/right/input/select/click"]
            }"#,
        ))
        .unwrap_err();
        assert!(
            matches!(err, ManifestError::DuplicateInteractionProfile(_)),
            "{err}"
        );
    }

    #[test]
    fn names() {
        let json = r#"{
            "actionSets": [{
                "name": "Gameplay",
                "localizedName": "Gameplay",
                "actions": []
            }]
        }"#;
        assert!(matches!(
            ActionManifest::from_json(json).unwrap_err(),
            ManifestError::InvalidName(name) if name == "Gameplay"
        ));

        let json = r#"{
            "actionSets": [{
                "name": "gameplay",
                "localizedName": "",
                "actions": []
            }]
        }"#;
        assert!(matches!(
            ActionManifest::from_json(json).unwrap_err(),
            ManifestError::EmptyName { field: "localized name", .. }
        ));

        let long = "a".repeat(MAX_ACTION_NAME_SIZE);
        let json = format!(
            r#"{{
                "actionSets": [{{
                    "name": "gameplay",
                    "localizedName": "Gameplay",
                    "actions": [{{ "name": "{long}", "localizedName": "Long", "type": "boolean" }}]
                }}]
            }}"#
        );
        assert!(matches!(
            ActionManifest::from_json(&json).unwrap_err(),
            ManifestError::NameTooLong { size: MAX_ACTION_NAME_SIZE, .. }
        ));
    }

    #[test]
    fn duplicates() {
        let json = r#"{
            "actionSets": [{
                "name": "gameplay",
                "localizedName": "Gameplay",
                "actions": [
                    { "name": "jump", "localizedName": "Jump", "type": "boolean" },
                    { "name": "jump", "localizedName": "Jump Again", "type": "boolean" }
                ]
            }]
        }"#;
        assert!(matches!(
            ActionManifest::from_json(json).unwrap_err(),
            ManifestError::DuplicateAction { .. }
        ));

        let json = r#"{
            "actionSets": [
                { "name": "menu", "localizedName": "Menu" },
                { "name": "menu", "localizedName": "Menu 2" }
            ]
        }"#;
        assert!(matches!(
            ActionManifest::from_json(json).unwrap_err(),
            ManifestError::DuplicateActionSet(_)
        ));
    }

    #[test]
    fn action_bound_twice_in_one_profile() {
        let err = ActionManifest::from_json(&manifest(
            r#"{
                "interactionProfile": "/interaction_profiles/khr/simple_controller",
                "grab_object": ["/user/hand/left/input/select/click"],
                "grab_object": ["/user/hand/left/input/select/click"]
            }"#,
        ))
        .unwrap_err();
        assert!(
            matches!(
                &err,
                ManifestError::Json(json)
                    if json.to_string().contains("`grab_object` is bound more than once")
            ),
            "{err}"
        );
    }

    #[test]
    fn comments_are_rejected() {
        let err = ActionManifest::from_json(&manifest(
            r#"{
                // squeeze to grab
                "interactionProfile": "/interaction_profiles/khr/simple_controller",
                "grab_object": ["/user/hand/left/input/select/click"]
            }"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ManifestError::Json(_)), "{err}");
    }

    #[test]
    fn warnings() {
        let manifest = ActionManifest::from_json(&manifest(
            r#"{
                "interactionProfile": "/interaction_profiles/khr/simple_controller",
                "grab_object": ["/user/hand/left/input/select/click", "/user/hand/right/input/select/click"],
                "vibrate_hand": ["/user/hand/left/output/haptic"]
            }, {
                "interactionProfile": "/interaction_profiles/example/prototype",
                "grab_object": ["/user/hand/left/input/anything/value"]
            }"#,
        ))
        .unwrap();

        let unbound = |action: &str, interaction_profile: &str| ManifestWarning::UnboundAction {
            action: action.to_owned(),
            interaction_profile: interaction_profile.to_owned(),
        };
        assert_eq!(
            manifest.warnings(),
            vec![
                unbound("hand_pose", "/interaction_profiles/khr/simple_controller"),
                ManifestWarning::UnknownInteractionProfile(
                    "/interaction_profiles/example/prototype".to_owned()
                ),
                unbound("hand_pose", "/interaction_profiles/example/prototype"),
                unbound("vibrate_hand", "/interaction_profiles/example/prototype"),
                ManifestWarning::PoseWithoutSubactionPaths {
                    action_set: "gameplay".to_owned(),
                    action: "hand_pose".to_owned(),
                },
            ]
        );

        let empty = ActionManifest::from_json(
            r#"{ "actionSets": [{ "name": "menu", "localizedName": "Menu" }] }"#,
        )
        .unwrap();
        assert_eq!(
            empty.warnings(),
            vec![ManifestWarning::NoActions {
                action_set: "menu".to_owned()
            }]
        );
        assert_eq!(
            empty.warnings()[0].to_string(),
            "Action set `menu` has no actions"
        );
    }
}
