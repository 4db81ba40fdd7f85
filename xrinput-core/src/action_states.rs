use xrinput_types::{
    action::{
        ActionState, ActionStateBoolean, ActionStateFloat, ActionStatePose, ActionStateVector2f,
        ActionType,
    },
    runtime_interface::{ActionStateGetInfo, XrRuntime},
    user_path::TopLevelPath,
    ActionHandle, ActionSetHandle, PathHandle, RuntimeError, SessionHandle,
};

use crate::action_set::ActionSet;

#[derive(Debug, Clone)]
pub struct StateSlot {
    pub action: ActionHandle,
    pub action_name: String,
    /// `None` when the state is read through the null path
    pub subaction: Option<TopLevelPath>,
    pub state: ActionState,
}

/**
 * The latest state of every input action in an action set
 *
 * Slots are laid out in query order: actions in creation order, and for each action either its hands
 * (left before right) or the null path. Output actions have no slot.
 */
#[derive(Debug, Clone, Default)]
pub struct ActionStates {
    action_set: ActionSetHandle,
    slots: Vec<StateSlot>,
}

impl ActionStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queries every slot in order, stopping at the first failing call
    pub fn update<R: XrRuntime>(
        &mut self,
        session: SessionHandle,
        action_set: &ActionSet<R>,
    ) -> Result<(), RuntimeError> {
        if self.action_set != action_set.handle() {
            self.layout(action_set);
        }

        let runtime = action_set.runtime();
        for slot in &mut self.slots {
            let get_info = ActionStateGetInfo {
                action: slot.action,
                subaction_path: slot
                    .subaction
                    .map_or(PathHandle::NULL, |hand| action_set.subaction_path(hand)),
            };

            slot.state = match slot.state {
                ActionState::Boolean(_) => {
                    ActionState::Boolean(runtime.get_action_state_boolean(session, &get_info)?)
                }
                ActionState::Float(_) => {
                    ActionState::Float(runtime.get_action_state_float(session, &get_info)?)
                }
                ActionState::Vector2f(_) => {
                    ActionState::Vector2f(runtime.get_action_state_vector2f(session, &get_info)?)
                }
                ActionState::Pose(_) => {
                    ActionState::Pose(runtime.get_action_state_pose(session, &get_info)?)
                }
            };
        }

        Ok(())
    }

    fn layout<R: XrRuntime>(&mut self, action_set: &ActionSet<R>) {
        self.action_set = action_set.handle();
        self.slots = action_set
            .actions()
            .iter()
            .filter_map(|action| Some((action, ActionState::empty(action.action_type)?)))
            .flat_map(|(action, empty)| {
                let subactions = if action.use_subaction_paths {
                    action.subaction_paths.iter().copied().map(Some).collect()
                } else {
                    vec![None]
                };
                subactions.into_iter().map(move |subaction| StateSlot {
                    action: action.handle,
                    action_name: action.name.clone(),
                    subaction,
                    state: empty,
                })
            })
            .collect();
    }

    pub fn slots(&self) -> &[StateSlot] {
        &self.slots
    }

    pub fn get(&self, action: &str, subaction: Option<TopLevelPath>) -> Option<&ActionState> {
        self.slots
            .iter()
            .find(|slot| slot.action_name == action && slot.subaction == subaction)
            .map(|slot| &slot.state)
    }

    pub fn boolean(
        &self,
        action: &str,
        subaction: Option<TopLevelPath>,
    ) -> Option<&ActionStateBoolean> {
        self.get(action, subaction)?.as_boolean()
    }

    pub fn float(&self, action: &str, subaction: Option<TopLevelPath>) -> Option<&ActionStateFloat> {
        self.get(action, subaction)?.as_float()
    }

    pub fn vector2f(
        &self,
        action: &str,
        subaction: Option<TopLevelPath>,
    ) -> Option<&ActionStateVector2f> {
        self.get(action, subaction)?.as_vector2f()
    }

    pub fn pose(&self, action: &str, subaction: Option<TopLevelPath>) -> Option<&ActionStatePose> {
        self.get(action, subaction)?.as_pose()
    }

    /// How many runtime queries one `update` makes
    pub fn query_count(&self) -> usize {
        self.slots.len()
    }
}

impl StateSlot {
    pub fn action_type(&self) -> ActionType {
        match self.state {
            ActionState::Boolean(_) => ActionType::BooleanInput,
            ActionState::Float(_) => ActionType::FloatInput,
            ActionState::Vector2f(_) => ActionType::Vector2fInput,
            ActionState::Pose(_) => ActionType::PoseInput,
        }
    }
}
