use strum_macros::EnumIter;

/// The top level user paths an action can be narrowed to.
/// Declaration order is the order sub-action paths are resolved and queried in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum TopLevelPath {
    UserHandLeft,
    UserHandRight,
}

impl TopLevelPath {
    pub fn as_str(self) -> &'static str {
        match self {
            TopLevelPath::UserHandLeft => "/user/hand/left",
            TopLevelPath::UserHandRight => "/user/hand/right",
        }
    }

    /// Finds the top level path a binding path lives under, e.g. `/user/hand/left/input/x/click`
    pub fn of_binding(binding: &str) -> Option<Self> {
        [TopLevelPath::UserHandLeft, TopLevelPath::UserHandRight]
            .into_iter()
            .find(|user_path| {
                binding
                    .strip_prefix(user_path.as_str())
                    .map_or(false, |rest| rest.starts_with('/'))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_prefix() {
        assert_eq!(
            TopLevelPath::of_binding("/user/hand/left/input/select/click"),
            Some(TopLevelPath::UserHandLeft)
        );
        assert_eq!(
            TopLevelPath::of_binding("/user/hand/right/output/haptic"),
            Some(TopLevelPath::UserHandRight)
        );
        assert_eq!(TopLevelPath::of_binding("/user/hand/leftish/input/a"), None);
        assert_eq!(TopLevelPath::of_binding("/user/head/input/volume_up"), None);
        assert_eq!(TopLevelPath::of_binding("/user/hand/left"), None);
    }
}
