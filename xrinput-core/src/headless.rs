use std::collections::HashMap;

use mint::Vector2;
use parking_lot::Mutex;
use slotmap::{new_key_type, Key, KeyData, SlotMap};
use strum_macros::{Display, EnumIter};
use xrinput_types::{
    action::{
        ActionStateBoolean, ActionStateFloat, ActionStatePose, ActionStateVector2f, ActionType,
    },
    runtime_interface::{
        ActionCreateInfo, ActionSetCreateInfo, ActionSpaceCreateInfo, ActionStateGetInfo,
        XrRuntime,
    },
    ActionHandle, ActionSetHandle, InstanceHandle, PathHandle, ResultCode, RuntimeError,
    SessionHandle, SpaceHandle, SuggestedBinding, Time,
};

use crate::{
    manifest::{
        MAX_ACTION_NAME_SIZE, MAX_ACTION_SET_NAME_SIZE, MAX_LOCALIZED_ACTION_NAME_SIZE,
        MAX_LOCALIZED_ACTION_SET_NAME_SIZE,
    },
    paths::PathManager,
    profiles::known_profiles,
};

const TOP_LEVEL_USER_PATHS: [&str; 5] = [
    "/user/hand/left",
    "/user/hand/right",
    "/user/head",
    "/user/gamepad",
    "/user/treadmill",
];

const BOOLEAN_THRESHOLD: f32 = 0.5;

/// One entry point of the runtime interface, used to count calls and inject failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Call {
    StringToPath,
    PathToString,
    CreateActionSet,
    DestroyActionSet,
    CreateAction,
    SuggestInteractionProfileBindings,
    GetActionStateBoolean,
    GetActionStateFloat,
    GetActionStateVector2f,
    GetActionStatePose,
    CreateActionSpace,
}

/// A simulated reading of one input component
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputValue {
    Boolean(bool),
    Float(f32),
    Vector2f(Vector2<f32>),
}

new_key_type! {
    struct ActionSetKey;
    struct ActionKey;
    struct SpaceKey;
}

struct ActionSetData {
    name: String,
    localized_name: String,
    actions: Vec<ActionKey>,
}

struct ActionData {
    name: String,
    localized_name: String,
    action_type: ActionType,
    subaction_paths: Vec<PathHandle>,
}

struct SpaceData {
    action: ActionKey,
    subaction_path: PathHandle,
}

#[derive(Default)]
struct State {
    action_sets: SlotMap<ActionSetKey, ActionSetData>,
    actions: SlotMap<ActionKey, ActionData>,
    spaces: SlotMap<SpaceKey, SpaceData>,

    suggested_bindings: HashMap<PathHandle, Vec<SuggestedBinding>>,
    current_profile: Option<PathHandle>,
    inputs: HashMap<PathHandle, (InputValue, Time)>,
    time: Time,
    //The value each (action, subaction path) reported on its previous read
    last_read: HashMap<(ActionHandle, PathHandle), InputValue>,

    calls: HashMap<Call, usize>,
    failures: HashMap<(Call, usize), ResultCode>,
}

/**
 * An in-process XR runtime with one instance and one session
 *
 * Controllers are simulated: pick the current interaction profile with `set_interaction_profile`
 * and feed component readings with `set_input`. Action states are derived from the suggested bindings
 * of the current profile.
 *
 * Every call through `XrRuntime` is counted, and any call can be made to fail with `fail_nth_call`.
 */
pub struct HeadlessRuntime {
    paths: PathManager,
    instance: InstanceHandle,
    session: SessionHandle,
    state: Mutex<State>,
}

impl HeadlessRuntime {
    pub fn new() -> Self {
        Self {
            paths: PathManager::new(),
            instance: InstanceHandle::from_raw(1),
            session: SessionHandle::from_raw(1),
            state: Mutex::default(),
        }
    }

    pub fn instance(&self) -> InstanceHandle {
        self.instance
    }

    pub fn session(&self) -> SessionHandle {
        self.session
    }

    pub fn call_count(&self, call: Call) -> usize {
        self.state.lock().calls.get(&call).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.state.lock().calls.values().sum()
    }

    /// Makes the `nth` call (counting from 1 since the runtime was created) of `call` fail with `code`
    pub fn fail_nth_call(&self, call: Call, nth: usize, code: ResultCode) {
        self.state.lock().failures.insert((call, nth), code);
    }

    pub fn action_set_count(&self) -> usize {
        self.state.lock().action_sets.len()
    }

    pub fn action_count(&self) -> usize {
        self.state.lock().actions.len()
    }

    /// The bindings last suggested for `interaction_profile`, in the order they were submitted
    pub fn suggested_bindings(&self, interaction_profile: &str) -> Option<Vec<SuggestedBinding>> {
        let profile = self.paths.get_path(interaction_profile).ok()?;
        self.state.lock().suggested_bindings.get(&profile).cloned()
    }

    pub fn space_count(&self) -> usize {
        self.state.lock().spaces.len()
    }

    /**
     * The action and subaction path an action space tracks
     *
     * Spaces are not released with their action set. They live as long as the runtime.
     */
    pub fn action_space(&self, space: SpaceHandle) -> Option<(ActionHandle, PathHandle)> {
        let key: SpaceKey = KeyData::from_ffi(space.into_raw()).into();
        self.state.lock().spaces.get(key).map(|data| {
            (
                ActionHandle::from_raw(data.action.data().as_ffi()),
                data.subaction_path,
            )
        })
    }

    /// Switches the simulated controllers to `interaction_profile`
    pub fn set_interaction_profile(&self, interaction_profile: &str) -> Result<(), RuntimeError> {
        if known_profiles().get(interaction_profile).is_none() {
            return Err(RuntimeError(ResultCode::ERROR_PATH_UNSUPPORTED));
        }
        let profile = self.intern(interaction_profile)?;
        log::debug!("Headless runtime now simulates {interaction_profile}");
        self.state.lock().current_profile = Some(profile);
        Ok(())
    }

    pub fn clear_interaction_profile(&self) {
        self.state.lock().current_profile = None;
    }

    /// Sets the reading of the component at `binding`, e.g. `/user/hand/left/input/trigger/value`
    pub fn set_input(&self, binding: &str, value: InputValue) -> Result<(), RuntimeError> {
        let path = self.intern(binding)?;
        let mut state = self.state.lock();
        state.time.0 += 1_000_000;
        let time = state.time;
        state.inputs.insert(path, (value, time));
        Ok(())
    }

    fn intern(&self, path_string: &str) -> Result<PathHandle, RuntimeError> {
        self.paths
            .get_path(path_string)
            .map_err(|_| RuntimeError(ResultCode::ERROR_PATH_FORMAT_INVALID))
    }

    fn check_instance(&self, instance: InstanceHandle) -> Result<(), RuntimeError> {
        if instance == self.instance {
            Ok(())
        } else {
            Err(RuntimeError(ResultCode::ERROR_HANDLE_INVALID))
        }
    }

    fn check_session(&self, session: SessionHandle) -> Result<(), RuntimeError> {
        if session == self.session {
            Ok(())
        } else {
            Err(RuntimeError(ResultCode::ERROR_HANDLE_INVALID))
        }
    }

    fn path_string(&self, path: PathHandle) -> Option<String> {
        self.paths.get_path_string(path)
    }

    /**
     * Collects the simulated readings bound to `get_info.action` under the current interaction profile
     *
     * Returns whether any binding applies, plus the readings that have been set
     */
    fn sources(
        &self,
        state: &State,
        get_info: &ActionStateGetInfo,
        expected: ActionType,
    ) -> Result<(bool, Vec<(InputValue, Time)>), RuntimeError> {
        let action = state
            .actions
            .get(action_key(get_info.action))
            .ok_or(RuntimeError(ResultCode::ERROR_HANDLE_INVALID))?;

        if action.action_type != expected {
            return Err(RuntimeError(ResultCode::ERROR_ACTION_TYPE_MISMATCH));
        }

        let prefix = if get_info.subaction_path.is_null() {
            None
        } else if action.subaction_paths.contains(&get_info.subaction_path) {
            self.path_string(get_info.subaction_path)
                .map(|user_path| format!("{user_path}/"))
        } else {
            return Err(RuntimeError(ResultCode::ERROR_PATH_UNSUPPORTED));
        };

        let bindings = match state
            .current_profile
            .and_then(|profile| state.suggested_bindings.get(&profile))
        {
            Some(bindings) => bindings,
            None => return Ok((false, Vec::new())),
        };

        let mut active = false;
        let mut readings = Vec::new();
        for binding in bindings
            .iter()
            .filter(|binding| binding.action == get_info.action)
        {
            if let Some(prefix) = &prefix {
                let applies = self
                    .path_string(binding.binding)
                    .map_or(false, |path| path.starts_with(prefix.as_str()));
                if !applies {
                    continue;
                }
            }
            active = true;
            if let Some(reading) = state.inputs.get(&binding.binding) {
                readings.push(*reading);
            }
        }

        Ok((active, readings))
    }
}

impl Default for HeadlessRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl InputValue {
    fn at_rest(self) -> bool {
        match self {
            InputValue::Boolean(pressed) => !pressed,
            InputValue::Float(value) => value == 0.,
            InputValue::Vector2f(value) => value.x == 0. && value.y == 0.,
        }
    }
}

impl State {
    /**
     * Records the value a state read reports and returns whether it changed since the previous read
     *
     * Each read stands in for a sync of that (action, subaction path). The first read compares against rest.
     */
    fn sync(&mut self, get_info: &ActionStateGetInfo, is_active: bool, value: InputValue) -> bool {
        let previous = self
            .last_read
            .insert((get_info.action, get_info.subaction_path), value);
        is_active && previous.map_or(!value.at_rest(), |previous| previous != value)
    }

    /// Counts the call and returns the injected failure for it, if there is one
    fn begin(&mut self, call: Call) -> Result<(), RuntimeError> {
        let count = self.calls.entry(call).or_insert(0);
        *count += 1;
        match self.failures.remove(&(call, *count)) {
            Some(code) => {
                log::debug!("Headless runtime failing {call} #{count} with {code}");
                Err(RuntimeError(code))
            }
            None => Ok(()),
        }
    }
}

fn action_set_key(handle: ActionSetHandle) -> ActionSetKey {
    KeyData::from_ffi(handle.into_raw()).into()
}

fn action_key(handle: ActionHandle) -> ActionKey {
    KeyData::from_ffi(handle.into_raw()).into()
}

fn check_name(name: &str, size: usize, invalid: ResultCode) -> Result<(), RuntimeError> {
    let well_formed = name
        .bytes()
        .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.'));
    if name.is_empty() || name.len() >= size || !well_formed {
        Err(RuntimeError(invalid))
    } else {
        Ok(())
    }
}

fn check_localized_name(name: &str, size: usize, invalid: ResultCode) -> Result<(), RuntimeError> {
    if name.is_empty() || name.len() >= size {
        Err(RuntimeError(invalid))
    } else {
        Ok(())
    }
}

fn latest(readings: &[(InputValue, Time)]) -> Time {
    readings
        .iter()
        .map(|(_, time)| *time)
        .max()
        .unwrap_or_default()
}

impl XrRuntime for HeadlessRuntime {
    fn string_to_path(
        &self,
        instance: InstanceHandle,
        path_string: &str,
    ) -> Result<PathHandle, RuntimeError> {
        self.state.lock().begin(Call::StringToPath)?;
        self.check_instance(instance)?;
        self.intern(path_string)
    }

    fn path_to_string(
        &self,
        instance: InstanceHandle,
        path: PathHandle,
    ) -> Result<String, RuntimeError> {
        self.state.lock().begin(Call::PathToString)?;
        self.check_instance(instance)?;
        self.path_string(path)
            .ok_or(RuntimeError(ResultCode::ERROR_PATH_INVALID))
    }

    fn create_action_set(
        &self,
        instance: InstanceHandle,
        create_info: &ActionSetCreateInfo,
    ) -> Result<ActionSetHandle, RuntimeError> {
        let mut state = self.state.lock();
        state.begin(Call::CreateActionSet)?;
        self.check_instance(instance)?;

        check_name(
            create_info.name,
            MAX_ACTION_SET_NAME_SIZE,
            ResultCode::ERROR_NAME_INVALID,
        )?;
        check_localized_name(
            create_info.localized_name,
            MAX_LOCALIZED_ACTION_SET_NAME_SIZE,
            ResultCode::ERROR_LOCALIZED_NAME_INVALID,
        )?;
        for (_, existing) in &state.action_sets {
            if existing.name == create_info.name {
                return Err(RuntimeError(ResultCode::ERROR_NAME_DUPLICATED));
            }
            if existing.localized_name == create_info.localized_name {
                return Err(RuntimeError(ResultCode::ERROR_LOCALIZED_NAME_DUPLICATED));
            }
        }

        let key = state.action_sets.insert(ActionSetData {
            name: create_info.name.to_owned(),
            localized_name: create_info.localized_name.to_owned(),
            actions: Vec::new(),
        });
        Ok(ActionSetHandle::from_raw(key.data().as_ffi()))
    }

    fn destroy_action_set(&self, action_set: ActionSetHandle) -> Result<(), RuntimeError> {
        let mut state = self.state.lock();
        state.begin(Call::DestroyActionSet)?;

        let removed = state
            .action_sets
            .remove(action_set_key(action_set))
            .ok_or(RuntimeError(ResultCode::ERROR_HANDLE_INVALID))?;
        for action in removed.actions {
            state.actions.remove(action);
        }
        Ok(())
    }

    fn create_action(
        &self,
        action_set: ActionSetHandle,
        create_info: &ActionCreateInfo,
    ) -> Result<ActionHandle, RuntimeError> {
        let mut state = self.state.lock();
        state.begin(Call::CreateAction)?;

        let set_key = action_set_key(action_set);
        if !state.action_sets.contains_key(set_key) {
            return Err(RuntimeError(ResultCode::ERROR_HANDLE_INVALID));
        }

        check_name(
            create_info.name,
            MAX_ACTION_NAME_SIZE,
            ResultCode::ERROR_NAME_INVALID,
        )?;
        check_localized_name(
            create_info.localized_name,
            MAX_LOCALIZED_ACTION_NAME_SIZE,
            ResultCode::ERROR_LOCALIZED_NAME_INVALID,
        )?;
        for key in &state.action_sets[set_key].actions {
            let existing = &state.actions[*key];
            if existing.name == create_info.name {
                return Err(RuntimeError(ResultCode::ERROR_NAME_DUPLICATED));
            }
            if existing.localized_name == create_info.localized_name {
                return Err(RuntimeError(ResultCode::ERROR_LOCALIZED_NAME_DUPLICATED));
            }
        }

        for (i, subaction_path) in create_info.subaction_paths.iter().enumerate() {
            let is_user_path = self
                .path_string(*subaction_path)
                .map_or(false, |path| TOP_LEVEL_USER_PATHS.contains(&path.as_str()));
            if !is_user_path || create_info.subaction_paths[..i].contains(subaction_path) {
                return Err(RuntimeError(ResultCode::ERROR_PATH_UNSUPPORTED));
            }
        }

        let key = state.actions.insert(ActionData {
            name: create_info.name.to_owned(),
            localized_name: create_info.localized_name.to_owned(),
            action_type: create_info.action_type,
            subaction_paths: create_info.subaction_paths.to_vec(),
        });
        state.action_sets[set_key].actions.push(key);
        Ok(ActionHandle::from_raw(key.data().as_ffi()))
    }

    fn suggest_interaction_profile_bindings(
        &self,
        instance: InstanceHandle,
        interaction_profile: PathHandle,
        suggested_bindings: &[SuggestedBinding],
    ) -> Result<(), RuntimeError> {
        let mut state = self.state.lock();
        state.begin(Call::SuggestInteractionProfileBindings)?;
        self.check_instance(instance)?;

        let profile = self
            .path_string(interaction_profile)
            .and_then(|profile| known_profiles().get(&profile))
            .ok_or(RuntimeError(ResultCode::ERROR_PATH_UNSUPPORTED))?;

        for suggested in suggested_bindings {
            if !state.actions.contains_key(action_key(suggested.action)) {
                return Err(RuntimeError(ResultCode::ERROR_HANDLE_INVALID));
            }
            let supported = self
                .path_string(suggested.binding)
                .map_or(false, |binding| profile.source_type(&binding).is_some());
            if !supported {
                return Err(RuntimeError(ResultCode::ERROR_PATH_UNSUPPORTED));
            }
        }

        state
            .suggested_bindings
            .insert(interaction_profile, suggested_bindings.to_vec());
        Ok(())
    }

    fn get_action_state_boolean(
        &self,
        session: SessionHandle,
        get_info: &ActionStateGetInfo,
    ) -> Result<ActionStateBoolean, RuntimeError> {
        let mut state = self.state.lock();
        state.begin(Call::GetActionStateBoolean)?;
        self.check_session(session)?;

        let (is_active, readings) = self.sources(&state, get_info, ActionType::BooleanInput)?;
        let current_state = readings.iter().any(|(value, _)| match value {
            InputValue::Boolean(pressed) => *pressed,
            InputValue::Float(value) => *value > BOOLEAN_THRESHOLD,
            InputValue::Vector2f(_) => false,
        });
        let changed_since_last_sync =
            state.sync(get_info, is_active, InputValue::Boolean(current_state));
        Ok(ActionStateBoolean {
            current_state,
            changed_since_last_sync,
            last_change_time: latest(&readings),
            is_active,
        })
    }

    fn get_action_state_float(
        &self,
        session: SessionHandle,
        get_info: &ActionStateGetInfo,
    ) -> Result<ActionStateFloat, RuntimeError> {
        let mut state = self.state.lock();
        state.begin(Call::GetActionStateFloat)?;
        self.check_session(session)?;

        let (is_active, readings) = self.sources(&state, get_info, ActionType::FloatInput)?;
        //The reading furthest from rest wins
        let current_state = readings
            .iter()
            .filter_map(|(value, _)| match value {
                InputValue::Boolean(pressed) => Some(if *pressed { 1. } else { 0. }),
                InputValue::Float(value) => Some(*value),
                InputValue::Vector2f(_) => None,
            })
            .fold(0f32, |acc, value| {
                if value.abs() > acc.abs() {
                    value
                } else {
                    acc
                }
            });
        let changed_since_last_sync =
            state.sync(get_info, is_active, InputValue::Float(current_state));
        Ok(ActionStateFloat {
            current_state,
            changed_since_last_sync,
            last_change_time: latest(&readings),
            is_active,
        })
    }

    fn get_action_state_vector2f(
        &self,
        session: SessionHandle,
        get_info: &ActionStateGetInfo,
    ) -> Result<ActionStateVector2f, RuntimeError> {
        let mut state = self.state.lock();
        state.begin(Call::GetActionStateVector2f)?;
        self.check_session(session)?;

        let (is_active, readings) = self.sources(&state, get_info, ActionType::Vector2fInput)?;
        let current_state = readings
            .iter()
            .filter_map(|(value, _)| match value {
                InputValue::Vector2f(value) => Some(*value),
                _ => None,
            })
            .fold(Vector2::<f32> { x: 0., y: 0. }, |acc, value| {
                if value.x.hypot(value.y) > acc.x.hypot(acc.y) {
                    value
                } else {
                    acc
                }
            });
        let changed_since_last_sync =
            state.sync(get_info, is_active, InputValue::Vector2f(current_state));
        Ok(ActionStateVector2f {
            current_state,
            changed_since_last_sync,
            last_change_time: latest(&readings),
            is_active,
        })
    }

    fn get_action_state_pose(
        &self,
        session: SessionHandle,
        get_info: &ActionStateGetInfo,
    ) -> Result<ActionStatePose, RuntimeError> {
        let mut state = self.state.lock();
        state.begin(Call::GetActionStatePose)?;
        self.check_session(session)?;

        let (is_active, _) = self.sources(&state, get_info, ActionType::PoseInput)?;
        Ok(ActionStatePose { is_active })
    }

    fn create_action_space(
        &self,
        session: SessionHandle,
        create_info: &ActionSpaceCreateInfo,
    ) -> Result<SpaceHandle, RuntimeError> {
        let mut state = self.state.lock();
        state.begin(Call::CreateActionSpace)?;
        self.check_session(session)?;

        let action = action_key(create_info.action);
        let data = state
            .actions
            .get(action)
            .ok_or(RuntimeError(ResultCode::ERROR_HANDLE_INVALID))?;
        if data.action_type != ActionType::PoseInput {
            return Err(RuntimeError(ResultCode::ERROR_ACTION_TYPE_MISMATCH));
        }
        if !create_info.subaction_path.is_null()
            && !data.subaction_paths.contains(&create_info.subaction_path)
        {
            return Err(RuntimeError(ResultCode::ERROR_PATH_UNSUPPORTED));
        }

        let key = state.spaces.insert(SpaceData {
            action,
            subaction_path: create_info.subaction_path,
        });
        Ok(SpaceHandle::from_raw(key.data().as_ffi()))
    }
}
