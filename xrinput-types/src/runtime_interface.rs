use crate::{
    action::{
        ActionStateBoolean, ActionStateFloat, ActionStatePose, ActionStateVector2f, ActionType,
    },
    ActionHandle, ActionSetHandle, InstanceHandle, PathHandle, Posef, RuntimeError,
    SessionHandle, SpaceHandle, SuggestedBinding,
};

#[derive(Debug, Clone, Copy)]
pub struct ActionSetCreateInfo<'a> {
    pub name: &'a str,
    pub localized_name: &'a str,
    pub priority: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ActionCreateInfo<'a> {
    pub name: &'a str,
    pub localized_name: &'a str,
    pub action_type: ActionType,
    pub subaction_paths: &'a [PathHandle],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionStateGetInfo {
    pub action: ActionHandle,
    /// `PathHandle::NULL` queries the action across every sub-action path
    pub subaction_path: PathHandle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionSpaceCreateInfo {
    pub action: ActionHandle,
    pub subaction_path: PathHandle,
    pub pose_in_action_space: Posef,
}

/**
 * The calls xrinput makes into an XR runtime
 *
 * Every method maps onto exactly one OpenXR entry point and reports failure with the runtime's own result code.
 * Implementations: `OpenXrRuntime` in openxr-driver and `HeadlessRuntime` in xrinput-core.
 */
pub trait XrRuntime {
    fn string_to_path(
        &self,
        instance: InstanceHandle,
        path_string: &str,
    ) -> Result<PathHandle, RuntimeError>;

    fn path_to_string(
        &self,
        instance: InstanceHandle,
        path: PathHandle,
    ) -> Result<String, RuntimeError>;

    fn create_action_set(
        &self,
        instance: InstanceHandle,
        create_info: &ActionSetCreateInfo,
    ) -> Result<ActionSetHandle, RuntimeError>;

    fn destroy_action_set(&self, action_set: ActionSetHandle) -> Result<(), RuntimeError>;

    fn create_action(
        &self,
        action_set: ActionSetHandle,
        create_info: &ActionCreateInfo,
    ) -> Result<ActionHandle, RuntimeError>;

    fn suggest_interaction_profile_bindings(
        &self,
        instance: InstanceHandle,
        interaction_profile: PathHandle,
        suggested_bindings: &[SuggestedBinding],
    ) -> Result<(), RuntimeError>;

    fn get_action_state_boolean(
        &self,
        session: SessionHandle,
        get_info: &ActionStateGetInfo,
    ) -> Result<ActionStateBoolean, RuntimeError>;

    fn get_action_state_float(
        &self,
        session: SessionHandle,
        get_info: &ActionStateGetInfo,
    ) -> Result<ActionStateFloat, RuntimeError>;

    fn get_action_state_vector2f(
        &self,
        session: SessionHandle,
        get_info: &ActionStateGetInfo,
    ) -> Result<ActionStateVector2f, RuntimeError>;

    fn get_action_state_pose(
        &self,
        session: SessionHandle,
        get_info: &ActionStateGetInfo,
    ) -> Result<ActionStatePose, RuntimeError>;

    fn create_action_space(
        &self,
        session: SessionHandle,
        create_info: &ActionSpaceCreateInfo,
    ) -> Result<SpaceHandle, RuntimeError>;
}
