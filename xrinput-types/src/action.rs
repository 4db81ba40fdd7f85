use mint::Vector2;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::Time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ActionType {
    #[serde(rename = "boolean")]
    #[strum(serialize = "boolean")]
    BooleanInput,
    #[serde(rename = "float")]
    #[strum(serialize = "float")]
    FloatInput,
    #[serde(rename = "vector2f")]
    #[strum(serialize = "vector2f")]
    Vector2fInput,
    #[serde(rename = "pose")]
    #[strum(serialize = "pose")]
    PoseInput,
    #[serde(rename = "haptic", alias = "vibration")]
    #[strum(serialize = "haptic")]
    VibrationOutput,
}

impl ActionType {
    pub fn is_output(self) -> bool {
        matches!(self, ActionType::VibrationOutput)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActionStateBoolean {
    pub current_state: bool,
    pub changed_since_last_sync: bool,
    pub last_change_time: Time,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActionStateFloat {
    pub current_state: f32,
    pub changed_since_last_sync: bool,
    pub last_change_time: Time,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionStateVector2f {
    pub current_state: Vector2<f32>,
    pub changed_since_last_sync: bool,
    pub last_change_time: Time,
    pub is_active: bool,
}

impl Default for ActionStateVector2f {
    fn default() -> Self {
        Self {
            current_state: Vector2 { x: 0., y: 0. },
            changed_since_last_sync: false,
            last_change_time: Time::default(),
            is_active: false,
        }
    }
}

/// Pose states only report whether the action is bound; the pose itself is located through an action space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionStatePose {
    pub is_active: bool,
}

/// The per-frame snapshot of one input action, optionally narrowed to a sub-action path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionState {
    Boolean(ActionStateBoolean),
    Float(ActionStateFloat),
    Vector2f(ActionStateVector2f),
    Pose(ActionStatePose),
}

impl ActionState {
    /// The zeroed state for an input action type, `None` for outputs
    pub fn empty(action_type: ActionType) -> Option<Self> {
        Some(match action_type {
            ActionType::BooleanInput => ActionState::Boolean(Default::default()),
            ActionType::FloatInput => ActionState::Float(Default::default()),
            ActionType::Vector2fInput => ActionState::Vector2f(Default::default()),
            ActionType::PoseInput => ActionState::Pose(Default::default()),
            ActionType::VibrationOutput => return None,
        })
    }

    pub fn is_active(&self) -> bool {
        match self {
            ActionState::Boolean(state) => state.is_active,
            ActionState::Float(state) => state.is_active,
            ActionState::Vector2f(state) => state.is_active,
            ActionState::Pose(state) => state.is_active,
        }
    }

    pub fn as_boolean(&self) -> Option<&ActionStateBoolean> {
        match self {
            ActionState::Boolean(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<&ActionStateFloat> {
        match self {
            ActionState::Float(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_vector2f(&self) -> Option<&ActionStateVector2f> {
        match self {
            ActionState::Vector2f(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_pose(&self) -> Option<&ActionStatePose> {
        match self {
            ActionState::Pose(state) => Some(state),
            _ => None,
        }
    }
}
