use std::sync::Arc;

use once_cell::sync::Lazy;
use xrinput_types::{
    action::{ActionStateBoolean, ActionStateFloat, ActionStatePose},
    runtime_interface::XrRuntime,
    user_path::TopLevelPath,
    ActionHandle, InstanceHandle, PathHandle, RuntimeError, SessionHandle, SpaceHandle,
};

use crate::{
    action_set::ActionSet,
    action_states::ActionStates,
    bindings::SuggestedBindings,
    manifest::{ActionManifest, ActionSetManifest},
};

pub const ACTION_SET: &str = "gameplay";
pub const GRAB_OBJECT: &str = "grab_object";
pub const HAND_POSE: &str = "hand_pose";
pub const HAND_POSE_BOTH: &str = "hand_pose_both";
pub const VIBRATE_HAND: &str = "vibrate_hand";
pub const QUIT_SESSION: &str = "quit_session";

static GAMEPLAY_ACTIONS: &str = include_str!("gameplay_actions.json");

static MANIFEST: Lazy<ActionManifest> = Lazy::new(|| {
    ActionManifest::from_json(GAMEPLAY_ACTIONS).expect("embedded gameplay manifest is valid")
});

/// The built-in manifest declaring the gameplay action set
pub fn manifest() -> &'static ActionManifest {
    &MANIFEST
}

pub fn action_set_manifest() -> &'static ActionSetManifest {
    manifest()
        .action_set(ACTION_SET)
        .expect("embedded gameplay manifest declares the gameplay action set")
}

/// Suggests the gameplay bindings for every interaction profile the manifest covers
pub fn suggest_bindings<R: XrRuntime>(
    instance: InstanceHandle,
    action_set: &GameplayActionSet<R>,
) -> Result<SuggestedBindings<R>, RuntimeError> {
    let mut bindings = SuggestedBindings::new(action_set.inner().runtime().clone());
    bindings.initialize(instance, action_set.inner(), action_set_manifest())?;
    bindings.suggest_interaction_profile_bindings(instance)?;
    Ok(bindings)
}

pub struct GameplayActionSet<R: XrRuntime> {
    action_set: ActionSet<R>,
}

impl<R: XrRuntime> GameplayActionSet<R> {
    pub fn new(runtime: Arc<R>) -> Self {
        Self {
            action_set: ActionSet::new(runtime),
        }
    }

    pub fn initialize(&mut self, instance: InstanceHandle) -> Result<(), RuntimeError> {
        self.action_set.initialize(instance, action_set_manifest())
    }

    pub fn destroy(&mut self) {
        self.action_set.destroy();
    }

    pub fn inner(&self) -> &ActionSet<R> {
        &self.action_set
    }

    fn handle_of(&self, name: &str) -> ActionHandle {
        self.action_set
            .action(name)
            .map_or(ActionHandle::NULL, |action| action.handle)
    }

    pub fn grab_object(&self) -> ActionHandle {
        self.handle_of(GRAB_OBJECT)
    }

    pub fn hand_pose(&self) -> ActionHandle {
        self.handle_of(HAND_POSE)
    }

    pub fn hand_pose_both(&self) -> ActionHandle {
        self.handle_of(HAND_POSE_BOTH)
    }

    pub fn vibrate_hand(&self) -> ActionHandle {
        self.handle_of(VIBRATE_HAND)
    }

    pub fn quit_session(&self) -> ActionHandle {
        self.handle_of(QUIT_SESSION)
    }

    pub fn left_hand(&self) -> PathHandle {
        self.action_set.subaction_path(TopLevelPath::UserHandLeft)
    }

    pub fn right_hand(&self) -> PathHandle {
        self.action_set.subaction_path(TopLevelPath::UserHandRight)
    }

    pub fn create_hand_pose_left_hand_action_space(
        &self,
        session: SessionHandle,
    ) -> Result<SpaceHandle, RuntimeError> {
        self.action_set
            .create_action_space(session, self.hand_pose(), self.left_hand())
    }

    pub fn create_hand_pose_right_hand_action_space(
        &self,
        session: SessionHandle,
    ) -> Result<SpaceHandle, RuntimeError> {
        self.action_set
            .create_action_space(session, self.hand_pose(), self.right_hand())
    }

    pub fn create_hand_pose_both_action_space(
        &self,
        session: SessionHandle,
    ) -> Result<SpaceHandle, RuntimeError> {
        self.action_set
            .create_action_space(session, self.hand_pose_both(), PathHandle::NULL)
    }
}

/// The per-hand view of the gameplay states
#[derive(Debug, Clone, Copy)]
pub struct SubactionStates<'a> {
    pub subaction_path: PathHandle,
    pub grab_object: &'a ActionStateFloat,
    pub hand_pose: &'a ActionStatePose,
}

#[derive(Debug, Clone, Default)]
pub struct GameplayActionStates {
    states: ActionStates,
}

impl GameplayActionStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_action_states<R: XrRuntime>(
        &mut self,
        session: SessionHandle,
        action_set: &GameplayActionSet<R>,
    ) -> Result<(), RuntimeError> {
        self.states.update(session, action_set.inner())
    }

    /**
     * The grab and pose states of the hand `subaction_path` names
     *
     * Returns `None` for the null path, for any path that is not one of the set's hands, and before the
     * first update.
     */
    pub fn subaction_states<R: XrRuntime>(
        &self,
        action_set: &GameplayActionSet<R>,
        subaction_path: PathHandle,
    ) -> Option<SubactionStates<'_>> {
        let hand = action_set.inner().top_level_path(subaction_path)?;
        Some(SubactionStates {
            subaction_path,
            grab_object: self.grab_object(hand)?,
            hand_pose: self.hand_pose(hand)?,
        })
    }

    pub fn grab_object(&self, hand: TopLevelPath) -> Option<&ActionStateFloat> {
        self.states.float(GRAB_OBJECT, Some(hand))
    }

    pub fn hand_pose(&self, hand: TopLevelPath) -> Option<&ActionStatePose> {
        self.states.pose(HAND_POSE, Some(hand))
    }

    pub fn hand_pose_both(&self) -> Option<&ActionStatePose> {
        self.states.pose(HAND_POSE_BOTH, None)
    }

    pub fn quit_session(&self) -> Option<&ActionStateBoolean> {
        self.states.boolean(QUIT_SESSION, None)
    }

    pub fn states(&self) -> &ActionStates {
        &self.states
    }
}
