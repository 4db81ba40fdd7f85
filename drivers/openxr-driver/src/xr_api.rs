use std::{ffi::CStr, os::raw::c_char};

use openxr::sys;
use xrinput_types::{
    action::ActionType, runtime_interface::ActionStateGetInfo, ActionHandle, ActionSetHandle,
    InstanceHandle, PathHandle, Posef, ResultCode, RuntimeError, SessionHandle, SuggestedBinding,
    Time,
};

// FFI helpers
pub(crate) fn cvt(x: sys::Result) -> Result<(), RuntimeError> {
    ResultCode(x.into_raw()).into_result().map(drop)
}

/// Copies `s` into a fixed size, null terminated buffer, failing with `too_long` if it does not fit
pub(crate) fn place_cstr(
    out: &mut [c_char],
    s: &str,
    too_long: ResultCode,
) -> Result<(), RuntimeError> {
    if s.len() + 1 > out.len() || s.bytes().any(|b| b == 0) {
        return Err(RuntimeError(too_long));
    }
    for (i, o) in s.bytes().zip(out.iter_mut()) {
        *o = i as c_char;
    }
    out[s.len()] = 0;
    Ok(())
}

/// Reads a null terminated string out of a buffer filled by the runtime
pub(crate) fn read_cstr(buffer: &[c_char]) -> Result<String, RuntimeError> {
    if !buffer.contains(&0) {
        return Err(RuntimeError(ResultCode::ERROR_RUNTIME_FAILURE));
    }
    let s = unsafe { CStr::from_ptr(buffer.as_ptr()) };
    Ok(s.to_string_lossy().into_owned())
}

pub(crate) fn instance(handle: InstanceHandle) -> sys::Instance {
    sys::Instance::from_raw(handle.into_raw())
}

pub(crate) fn session(handle: SessionHandle) -> sys::Session {
    sys::Session::from_raw(handle.into_raw())
}

pub(crate) fn action_set(handle: ActionSetHandle) -> sys::ActionSet {
    sys::ActionSet::from_raw(handle.into_raw())
}

pub(crate) fn action(handle: ActionHandle) -> sys::Action {
    sys::Action::from_raw(handle.into_raw())
}

pub(crate) fn path(handle: PathHandle) -> sys::Path {
    sys::Path::from_raw(handle.into_raw())
}

pub(crate) fn action_type(action_type: ActionType) -> sys::ActionType {
    match action_type {
        ActionType::BooleanInput => sys::ActionType::BOOLEAN_INPUT,
        ActionType::FloatInput => sys::ActionType::FLOAT_INPUT,
        ActionType::Vector2fInput => sys::ActionType::VECTOR2F_INPUT,
        ActionType::PoseInput => sys::ActionType::POSE_INPUT,
        ActionType::VibrationOutput => sys::ActionType::VIBRATION_OUTPUT,
    }
}

pub(crate) fn suggested_binding(binding: &SuggestedBinding) -> sys::ActionSuggestedBinding {
    sys::ActionSuggestedBinding {
        action: action(binding.action),
        binding: path(binding.binding),
    }
}

pub(crate) fn get_info(get_info: &ActionStateGetInfo) -> sys::ActionStateGetInfo {
    sys::ActionStateGetInfo {
        ty: sys::ActionStateGetInfo::TYPE,
        next: std::ptr::null(),
        action: action(get_info.action),
        subaction_path: path(get_info.subaction_path),
    }
}

pub(crate) fn posef(pose: &Posef) -> sys::Posef {
    sys::Posef {
        orientation: sys::Quaternionf {
            x: pose.orientation.v.x,
            y: pose.orientation.v.y,
            z: pose.orientation.v.z,
            w: pose.orientation.s,
        },
        position: sys::Vector3f {
            x: pose.position.x,
            y: pose.position.y,
            z: pose.position.z,
        },
    }
}

pub(crate) fn bool32(b: sys::Bool32) -> bool {
    b != sys::FALSE
}

pub(crate) fn time(time: sys::Time) -> Time {
    Time(time.as_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_cstr_terminates() {
        let mut buffer = [1 as c_char; 8];
        place_cstr(&mut buffer, "grab", ResultCode::ERROR_NAME_INVALID).unwrap();
        assert_eq!(read_cstr(&buffer).unwrap(), "grab");
        assert_eq!(buffer[4], 0);
    }

    #[test]
    fn place_cstr_needs_room_for_the_terminator() {
        let mut buffer = [0 as c_char; 4];
        assert_eq!(
            place_cstr(&mut buffer, "grab", ResultCode::ERROR_NAME_INVALID),
            Err(RuntimeError(ResultCode::ERROR_NAME_INVALID))
        );
        place_cstr(&mut buffer, "gra", ResultCode::ERROR_NAME_INVALID).unwrap();
    }

    #[test]
    fn place_cstr_rejects_interior_nul() {
        let mut buffer = [0 as c_char; 8];
        assert!(place_cstr(&mut buffer, "a\0b", ResultCode::ERROR_NAME_INVALID).is_err());
    }

    #[test]
    fn unterminated_buffers_are_rejected() {
        assert!(read_cstr(&[b'a' as c_char; 3]).is_err());
    }

    #[test]
    fn cvt_keeps_qualified_successes() {
        assert_eq!(cvt(sys::Result::SUCCESS), Ok(()));
        assert_eq!(cvt(sys::Result::SESSION_LOSS_PENDING), Ok(()));
        assert_eq!(
            cvt(sys::Result::ERROR_PATH_UNSUPPORTED),
            Err(RuntimeError(ResultCode::ERROR_PATH_UNSUPPORTED))
        );
    }

    #[test]
    fn identity_pose() {
        let pose = posef(&Posef::IDENTITY);
        assert_eq!(pose.orientation.w, 1.);
        assert_eq!(pose.position.x, 0.);
    }
}
