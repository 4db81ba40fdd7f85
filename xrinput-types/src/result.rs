use std::fmt;

use thiserror::Error;

/// A raw `XrResult` value. Negative codes are failures, everything else is some form of success.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultCode(pub i32);

macro_rules! result_codes {
    ($($name:ident = $value:literal,)*) => {
        impl ResultCode {
            $(pub const $name: Self = Self($value);)*

            fn name(self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some(concat!("XR_", stringify!($name))),)*
                    _ => None,
                }
            }
        }
    };
}

result_codes! {
    SUCCESS = 0,
    TIMEOUT_EXPIRED = 1,
    SESSION_LOSS_PENDING = 3,
    EVENT_UNAVAILABLE = 4,
    SESSION_NOT_FOCUSED = 8,
    ERROR_VALIDATION_FAILURE = -1,
    ERROR_RUNTIME_FAILURE = -2,
    ERROR_OUT_OF_MEMORY = -3,
    ERROR_FUNCTION_UNSUPPORTED = -7,
    ERROR_LIMIT_REACHED = -10,
    ERROR_HANDLE_INVALID = -12,
    ERROR_INSTANCE_LOST = -13,
    ERROR_SESSION_LOST = -17,
    ERROR_PATH_INVALID = -19,
    ERROR_PATH_COUNT_EXCEEDED = -20,
    ERROR_PATH_FORMAT_INVALID = -21,
    ERROR_PATH_UNSUPPORTED = -22,
    ERROR_ACTION_TYPE_MISMATCH = -27,
    ERROR_CALL_ORDER_INVALID = -37,
    ERROR_NAME_DUPLICATED = -44,
    ERROR_NAME_INVALID = -45,
    ERROR_ACTIONSET_NOT_ATTACHED = -46,
    ERROR_ACTIONSETS_ALREADY_ATTACHED = -47,
    ERROR_LOCALIZED_NAME_DUPLICATED = -48,
    ERROR_LOCALIZED_NAME_INVALID = -49,
}

impl ResultCode {
    pub fn is_success(self) -> bool {
        self.0 >= 0
    }

    /// Splits a raw code into the `Result` shape used throughout xrinput
    pub fn into_result(self) -> Result<Self, RuntimeError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(RuntimeError(self))
        }
    }
}

impl fmt::Debug for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "XrResult({})", self.0),
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A call into the XR runtime failed. The runtime's own code is carried unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("XR runtime call failed with {0}")]
pub struct RuntimeError(pub ResultCode);

impl RuntimeError {
    pub fn code(self) -> ResultCode {
        self.0
    }
}

impl From<ResultCode> for RuntimeError {
    fn from(code: ResultCode) -> Self {
        RuntimeError(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_codes_are_not_errors() {
        assert_eq!(ResultCode::SUCCESS.into_result(), Ok(ResultCode::SUCCESS));
        assert_eq!(
            ResultCode::SESSION_LOSS_PENDING.into_result(),
            Ok(ResultCode::SESSION_LOSS_PENDING)
        );
        assert_eq!(
            ResultCode::ERROR_PATH_UNSUPPORTED.into_result(),
            Err(RuntimeError(ResultCode::ERROR_PATH_UNSUPPORTED))
        );
    }

    #[test]
    fn display() {
        assert_eq!(
            RuntimeError(ResultCode::ERROR_HANDLE_INVALID).to_string(),
            "XR runtime call failed with XR_ERROR_HANDLE_INVALID"
        );
        assert_eq!(ResultCode(-1000).to_string(), "XrResult(-1000)");
    }
}
