use std::{collections::HashMap, sync::Arc};

use strum::IntoEnumIterator;
use xrinput_types::{
    action::ActionType,
    runtime_interface::{ActionCreateInfo, ActionSetCreateInfo, ActionSpaceCreateInfo, XrRuntime},
    user_path::TopLevelPath,
    ActionHandle, ActionSetHandle, InstanceHandle, PathHandle, Posef, ResultCode, RuntimeError,
    SessionHandle, SpaceHandle,
};

use crate::manifest::ActionSetManifest;

#[derive(Debug, Clone)]
pub struct Action {
    pub handle: ActionHandle,
    pub name: String,
    pub action_type: ActionType,
    /// The hands the action was created with, left before right
    pub subaction_paths: Vec<TopLevelPath>,
    /// Whether the action's state is read per hand or once through the null path
    pub use_subaction_paths: bool,
}

/**
 * A runtime action set and the actions it owns
 *
 * Initialization stops at the first failing runtime call and does not roll back: whatever was created stays
 * owned by the set until it is destroyed. Destroying is idempotent and also happens on drop.
 */
pub struct ActionSet<R: XrRuntime> {
    runtime: Arc<R>,
    handle: ActionSetHandle,
    name: String,
    actions: Vec<Action>,
    subaction_paths: HashMap<TopLevelPath, PathHandle>,
}

impl<R: XrRuntime> ActionSet<R> {
    pub fn new(runtime: Arc<R>) -> Self {
        Self {
            runtime,
            handle: ActionSetHandle::NULL,
            name: String::new(),
            actions: Vec::new(),
            subaction_paths: HashMap::new(),
        }
    }

    pub fn initialize(
        &mut self,
        instance: InstanceHandle,
        manifest: &ActionSetManifest,
    ) -> Result<(), RuntimeError> {
        if !self.handle.is_null() {
            return Err(RuntimeError(ResultCode::ERROR_CALL_ORDER_INVALID));
        }

        self.name = manifest.name.clone();
        self.handle = self.runtime.create_action_set(
            instance,
            &ActionSetCreateInfo {
                name: &manifest.name,
                localized_name: &manifest.localized_name,
                priority: manifest.priority,
            },
        )?;

        for top_level_path in manifest.used_top_level_paths() {
            let path = self
                .runtime
                .string_to_path(instance, top_level_path.as_str())?;
            self.subaction_paths.insert(top_level_path, path);
        }

        for description in &manifest.actions {
            let subaction_paths = manifest.subaction_paths(&description.name);
            let paths = subaction_paths
                .iter()
                .map(|top_level_path| self.subaction_path(*top_level_path))
                .collect::<Vec<_>>();

            let handle = self.runtime.create_action(
                self.handle,
                &ActionCreateInfo {
                    name: &description.name,
                    localized_name: &description.localized_name,
                    action_type: description.action_type,
                    subaction_paths: &paths,
                },
            )?;

            self.actions.push(Action {
                handle,
                name: description.name.clone(),
                action_type: description.action_type,
                subaction_paths,
                use_subaction_paths: description.use_subaction_paths,
            });
        }

        log::debug!(
            "Created action set `{}` with {} actions",
            self.name,
            self.actions.len()
        );
        Ok(())
    }

    /// Releases the action set and its actions. Does nothing once the handle is null.
    pub fn destroy(&mut self) {
        if self.handle.is_null() {
            return;
        }

        if let Err(err) = self.runtime.destroy_action_set(self.handle) {
            log::error!("xrinput: destroying action set `{}` failed with {err}", self.name);
        }
        self.handle = ActionSetHandle::NULL;
        self.actions.clear();
    }

    pub fn handle(&self) -> ActionSetHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn runtime(&self) -> &Arc<R> {
        &self.runtime
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.name == name)
    }

    /// The handle of a resolved hand, or `PathHandle::NULL` if the set never resolved it
    pub fn subaction_path(&self, top_level_path: TopLevelPath) -> PathHandle {
        self.subaction_paths
            .get(&top_level_path)
            .copied()
            .unwrap_or(PathHandle::NULL)
    }

    /// Maps a path handle back to the hand it names, `None` for the null path and anything else
    pub fn top_level_path(&self, path: PathHandle) -> Option<TopLevelPath> {
        if path.is_null() {
            return None;
        }
        TopLevelPath::iter().find(|top_level_path| self.subaction_path(*top_level_path) == path)
    }

    /// Creates a space tracking a pose action, optionally narrowed to one hand
    pub fn create_action_space(
        &self,
        session: SessionHandle,
        action: ActionHandle,
        subaction_path: PathHandle,
    ) -> Result<SpaceHandle, RuntimeError> {
        self.runtime.create_action_space(
            session,
            &ActionSpaceCreateInfo {
                action,
                subaction_path,
                pose_in_action_space: Posef::IDENTITY,
            },
        )
    }
}

impl<R: XrRuntime> Drop for ActionSet<R> {
    fn drop(&mut self) {
        self.destroy();
    }
}
