pub mod action_set;
pub mod action_states;
pub mod bindings;
pub mod gameplay;
pub mod headless;
pub mod manifest;
pub mod paths;
pub mod profiles;

pub use xrinput_types as types;
