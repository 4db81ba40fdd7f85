use std::{ffi::CString, os::raw::c_char, ptr};

use openxr::{
    sys::{
        self, MAX_ACTION_NAME_SIZE, MAX_ACTION_SET_NAME_SIZE, MAX_LOCALIZED_ACTION_NAME_SIZE,
        MAX_LOCALIZED_ACTION_SET_NAME_SIZE,
    },
    ApplicationInfo, Entry, ExtensionSet, Instance,
};
use thiserror::Error;
use xrinput_types::{
    action::{ActionStateBoolean, ActionStateFloat, ActionStatePose, ActionStateVector2f},
    runtime_interface::{
        ActionCreateInfo, ActionSetCreateInfo, ActionSpaceCreateInfo, ActionStateGetInfo,
        XrRuntime,
    },
    ActionHandle, ActionSetHandle, InstanceHandle, PathHandle, ResultCode, RuntimeError,
    SessionHandle, SpaceHandle, SuggestedBinding,
};

mod xr_api;

use xr_api::{cvt, place_cstr};

#[derive(Debug, Error)]
pub enum OpenXrDriverError {
    #[error("could not load the OpenXR loader: {0}")]
    Load(String),
    #[error("could not create an OpenXR instance: {0}")]
    CreateInstance(RuntimeError),
}

/**
 * `XrRuntime` backed by the system's OpenXR loader
 *
 * Every call goes straight through the instance's function pointer table. Sessions are owned by the
 * application and passed in by handle.
 */
pub struct OpenXrRuntime {
    instance: Instance,
}

impl OpenXrRuntime {
    /// Loads the OpenXR loader and creates an instance with no extensions enabled
    pub fn new(application_name: &str) -> Result<Self, OpenXrDriverError> {
        let entry = unsafe { Entry::load() }
            .map_err(|err| OpenXrDriverError::Load(err.to_string()))?;

        let instance = entry
            .create_instance(
                &ApplicationInfo {
                    application_name,
                    application_version: 1,
                    engine_name: "xrinput",
                    engine_version: 1,
                },
                &ExtensionSet::default(),
                &[],
            )
            .map_err(|err| {
                OpenXrDriverError::CreateInstance(RuntimeError(ResultCode(err.into_raw())))
            })?;

        Ok(Self::from_instance(instance))
    }

    pub fn from_instance(instance: Instance) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> InstanceHandle {
        InstanceHandle::from_raw(self.instance.as_raw().into_raw())
    }

    pub fn openxr_instance(&self) -> &Instance {
        &self.instance
    }

    pub fn runtime_name(&self) -> Result<String, RuntimeError> {
        self.instance
            .properties()
            .map(|properties| properties.runtime_name)
            .map_err(|err| RuntimeError(ResultCode(err.into_raw())))
    }
}

impl XrRuntime for OpenXrRuntime {
    fn string_to_path(
        &self,
        instance: InstanceHandle,
        path_string: &str,
    ) -> Result<PathHandle, RuntimeError> {
        let path_string = CString::new(path_string)
            .map_err(|_| RuntimeError(ResultCode::ERROR_PATH_FORMAT_INVALID))?;
        let mut path = sys::Path::NULL;
        cvt(unsafe {
            (self.instance.fp().string_to_path)(
                xr_api::instance(instance),
                path_string.as_ptr(),
                &mut path,
            )
        })?;
        Ok(PathHandle::from_raw(path.into_raw()))
    }

    fn path_to_string(
        &self,
        instance: InstanceHandle,
        path: PathHandle,
    ) -> Result<String, RuntimeError> {
        let fp = self.instance.fp();
        let mut count = 0u32;
        cvt(unsafe {
            (fp.path_to_string)(
                xr_api::instance(instance),
                xr_api::path(path),
                0,
                &mut count,
                ptr::null_mut(),
            )
        })?;

        let mut buffer = vec![0 as c_char; count as usize];
        cvt(unsafe {
            (fp.path_to_string)(
                xr_api::instance(instance),
                xr_api::path(path),
                count,
                &mut count,
                buffer.as_mut_ptr(),
            )
        })?;
        xr_api::read_cstr(&buffer)
    }

    fn create_action_set(
        &self,
        instance: InstanceHandle,
        create_info: &ActionSetCreateInfo,
    ) -> Result<ActionSetHandle, RuntimeError> {
        let mut action_set_name = [0 as c_char; MAX_ACTION_SET_NAME_SIZE];
        let mut localized_action_set_name = [0 as c_char; MAX_LOCALIZED_ACTION_SET_NAME_SIZE];
        place_cstr(
            &mut action_set_name,
            create_info.name,
            ResultCode::ERROR_NAME_INVALID,
        )?;
        place_cstr(
            &mut localized_action_set_name,
            create_info.localized_name,
            ResultCode::ERROR_LOCALIZED_NAME_INVALID,
        )?;

        let mut action_set = sys::ActionSet::NULL;
        cvt(unsafe {
            (self.instance.fp().create_action_set)(
                xr_api::instance(instance),
                &sys::ActionSetCreateInfo {
                    ty: sys::ActionSetCreateInfo::TYPE,
                    next: ptr::null(),
                    action_set_name,
                    localized_action_set_name,
                    priority: create_info.priority,
                },
                &mut action_set,
            )
        })?;
        Ok(ActionSetHandle::from_raw(action_set.into_raw()))
    }

    fn destroy_action_set(&self, action_set: ActionSetHandle) -> Result<(), RuntimeError> {
        cvt(unsafe { (self.instance.fp().destroy_action_set)(xr_api::action_set(action_set)) })
    }

    fn create_action(
        &self,
        action_set: ActionSetHandle,
        create_info: &ActionCreateInfo,
    ) -> Result<ActionHandle, RuntimeError> {
        let mut action_name = [0 as c_char; MAX_ACTION_NAME_SIZE];
        let mut localized_action_name = [0 as c_char; MAX_LOCALIZED_ACTION_NAME_SIZE];
        place_cstr(
            &mut action_name,
            create_info.name,
            ResultCode::ERROR_NAME_INVALID,
        )?;
        place_cstr(
            &mut localized_action_name,
            create_info.localized_name,
            ResultCode::ERROR_LOCALIZED_NAME_INVALID,
        )?;

        let subaction_paths = create_info
            .subaction_paths
            .iter()
            .map(|path| xr_api::path(*path))
            .collect::<Vec<_>>();

        let mut action = sys::Action::NULL;
        cvt(unsafe {
            (self.instance.fp().create_action)(
                xr_api::action_set(action_set),
                &sys::ActionCreateInfo {
                    ty: sys::ActionCreateInfo::TYPE,
                    next: ptr::null(),
                    action_name,
                    action_type: xr_api::action_type(create_info.action_type),
                    count_subaction_paths: subaction_paths.len() as u32,
                    subaction_paths: if subaction_paths.is_empty() {
                        ptr::null()
                    } else {
                        subaction_paths.as_ptr()
                    },
                    localized_action_name,
                },
                &mut action,
            )
        })?;
        Ok(ActionHandle::from_raw(action.into_raw()))
    }

    fn suggest_interaction_profile_bindings(
        &self,
        instance: InstanceHandle,
        interaction_profile: PathHandle,
        suggested_bindings: &[SuggestedBinding],
    ) -> Result<(), RuntimeError> {
        let bindings = suggested_bindings
            .iter()
            .map(xr_api::suggested_binding)
            .collect::<Vec<_>>();

        cvt(unsafe {
            (self.instance.fp().suggest_interaction_profile_bindings)(
                xr_api::instance(instance),
                &sys::InteractionProfileSuggestedBinding {
                    ty: sys::InteractionProfileSuggestedBinding::TYPE,
                    next: ptr::null(),
                    interaction_profile: xr_api::path(interaction_profile),
                    count_suggested_bindings: bindings.len() as u32,
                    suggested_bindings: bindings.as_ptr(),
                },
            )
        })
    }

    fn get_action_state_boolean(
        &self,
        session: SessionHandle,
        get_info: &ActionStateGetInfo,
    ) -> Result<ActionStateBoolean, RuntimeError> {
        let mut state = sys::ActionStateBoolean {
            ty: sys::ActionStateBoolean::TYPE,
            next: ptr::null_mut(),
            current_state: sys::FALSE,
            changed_since_last_sync: sys::FALSE,
            last_change_time: sys::Time::from_nanos(0),
            is_active: sys::FALSE,
        };
        cvt(unsafe {
            (self.instance.fp().get_action_state_boolean)(
                xr_api::session(session),
                &xr_api::get_info(get_info),
                &mut state,
            )
        })?;
        Ok(ActionStateBoolean {
            current_state: xr_api::bool32(state.current_state),
            changed_since_last_sync: xr_api::bool32(state.changed_since_last_sync),
            last_change_time: xr_api::time(state.last_change_time),
            is_active: xr_api::bool32(state.is_active),
        })
    }

    fn get_action_state_float(
        &self,
        session: SessionHandle,
        get_info: &ActionStateGetInfo,
    ) -> Result<ActionStateFloat, RuntimeError> {
        let mut state = sys::ActionStateFloat {
            ty: sys::ActionStateFloat::TYPE,
            next: ptr::null_mut(),
            current_state: 0.,
            changed_since_last_sync: sys::FALSE,
            last_change_time: sys::Time::from_nanos(0),
            is_active: sys::FALSE,
        };
        cvt(unsafe {
            (self.instance.fp().get_action_state_float)(
                xr_api::session(session),
                &xr_api::get_info(get_info),
                &mut state,
            )
        })?;
        Ok(ActionStateFloat {
            current_state: state.current_state,
            changed_since_last_sync: xr_api::bool32(state.changed_since_last_sync),
            last_change_time: xr_api::time(state.last_change_time),
            is_active: xr_api::bool32(state.is_active),
        })
    }

    fn get_action_state_vector2f(
        &self,
        session: SessionHandle,
        get_info: &ActionStateGetInfo,
    ) -> Result<ActionStateVector2f, RuntimeError> {
        let mut state = sys::ActionStateVector2f {
            ty: sys::ActionStateVector2f::TYPE,
            next: ptr::null_mut(),
            current_state: sys::Vector2f { x: 0., y: 0. },
            changed_since_last_sync: sys::FALSE,
            last_change_time: sys::Time::from_nanos(0),
            is_active: sys::FALSE,
        };
        cvt(unsafe {
            (self.instance.fp().get_action_state_vector2f)(
                xr_api::session(session),
                &xr_api::get_info(get_info),
                &mut state,
            )
        })?;
        Ok(ActionStateVector2f {
            current_state: mint::Vector2 {
                x: state.current_state.x,
                y: state.current_state.y,
            },
            changed_since_last_sync: xr_api::bool32(state.changed_since_last_sync),
            last_change_time: xr_api::time(state.last_change_time),
            is_active: xr_api::bool32(state.is_active),
        })
    }

    fn get_action_state_pose(
        &self,
        session: SessionHandle,
        get_info: &ActionStateGetInfo,
    ) -> Result<ActionStatePose, RuntimeError> {
        let mut state = sys::ActionStatePose {
            ty: sys::ActionStatePose::TYPE,
            next: ptr::null_mut(),
            is_active: sys::FALSE,
        };
        cvt(unsafe {
            (self.instance.fp().get_action_state_pose)(
                xr_api::session(session),
                &xr_api::get_info(get_info),
                &mut state,
            )
        })?;
        Ok(ActionStatePose {
            is_active: xr_api::bool32(state.is_active),
        })
    }

    fn create_action_space(
        &self,
        session: SessionHandle,
        create_info: &ActionSpaceCreateInfo,
    ) -> Result<SpaceHandle, RuntimeError> {
        let mut space = sys::Space::NULL;
        cvt(unsafe {
            (self.instance.fp().create_action_space)(
                xr_api::session(session),
                &sys::ActionSpaceCreateInfo {
                    ty: sys::ActionSpaceCreateInfo::TYPE,
                    next: ptr::null(),
                    action: xr_api::action(create_info.action),
                    subaction_path: xr_api::path(create_info.subaction_path),
                    pose_in_action_space: xr_api::posef(&create_info.pose_in_action_space),
                },
                &mut space,
            )
        })?;
        Ok(SpaceHandle::from_raw(space.into_raw()))
    }
}
