pub mod action;
pub mod result;
pub mod runtime_interface;
pub mod user_path;

pub use result::{ResultCode, RuntimeError};

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(u64);

        impl $name {
            pub const NULL: Self = Self(0);

            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn into_raw(self) -> u64 {
                self.0
            }

            pub const fn is_null(self) -> bool {
                self.0 == 0
            }
        }
    };
}

handle!(
    /// A live runtime instance, supplied by whoever owns the session lifecycle
    InstanceHandle
);
handle!(SessionHandle);
handle!(ActionSetHandle);
handle!(ActionHandle);
handle!(SpaceHandle);
handle!(
    /**
     * An interned path string such as `/user/hand/left/input/trigger/value`
     *
     * Resolving the same string twice on the same instance always yields the same handle.
     * `PathHandle::NULL` is the null path and never names anything.
     */
    PathHandle
);

/// Nanoseconds in the runtime's clock domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time(pub i64);

/// One entry of an interaction profile's suggested binding table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuggestedBinding {
    pub action: ActionHandle,
    pub binding: PathHandle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posef {
    pub orientation: mint::Quaternion<f32>,
    pub position: mint::Vector3<f32>,
}

impl Posef {
    pub const IDENTITY: Self = Self {
        orientation: mint::Quaternion {
            v: mint::Vector3 {
                x: 0.,
                y: 0.,
                z: 0.,
            },
            s: 1.,
        },
        position: mint::Vector3 {
            x: 0.,
            y: 0.,
            z: 0.,
        },
    };
}

impl Default for Posef {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_handles() {
        assert!(PathHandle::NULL.is_null());
        assert!(ActionSetHandle::default().is_null());
        assert!(!ActionHandle::from_raw(7).is_null());
        assert_eq!(SpaceHandle::from_raw(42).into_raw(), 42);
    }
}
