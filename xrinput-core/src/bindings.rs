use std::{collections::HashMap, sync::Arc};

use xrinput_types::{
    runtime_interface::XrRuntime, InstanceHandle, PathHandle, ResultCode, RuntimeError,
    SuggestedBinding,
};

use crate::{action_set::ActionSet, manifest::ActionSetManifest};

/// The binding table submitted for one interaction profile
#[derive(Debug, Clone)]
pub struct ProfileBindingTable {
    pub interaction_profile: String,
    pub interaction_profile_path: PathHandle,
    pub bindings: Vec<SuggestedBinding>,
}

/**
 * The suggested bindings of one action set, one table per interaction profile
 *
 * `initialize` checks that the set holds every bound action and resolves every path it needs before filling
 * any table, so the tables are either complete or absent.
 */
pub struct SuggestedBindings<R: XrRuntime> {
    runtime: Arc<R>,
    tables: Vec<ProfileBindingTable>,
}

impl<R: XrRuntime> SuggestedBindings<R> {
    pub fn new(runtime: Arc<R>) -> Self {
        Self {
            runtime,
            tables: Vec::new(),
        }
    }

    pub fn initialize(
        &mut self,
        instance: InstanceHandle,
        action_set: &ActionSet<R>,
        manifest: &ActionSetManifest,
    ) -> Result<(), RuntimeError> {
        let mut actions = HashMap::new();
        for (name, _) in manifest
            .suggested_bindings
            .iter()
            .flat_map(|suggested| suggested.iter())
        {
            match action_set.action(name) {
                Some(action) if !action.handle.is_null() => {
                    actions.insert(name, action.handle);
                }
                _ => {
                    log::error!(
                        "Action set `{}` has no action `{name}` to bind",
                        action_set.name()
                    );
                    return Err(RuntimeError(ResultCode::ERROR_HANDLE_INVALID));
                }
            }
        }

        let mut profile_paths = Vec::with_capacity(manifest.suggested_bindings.len());
        for suggested in &manifest.suggested_bindings {
            profile_paths.push(
                self.runtime
                    .string_to_path(instance, &suggested.interaction_profile)?,
            );
        }

        let mut binding_paths = HashMap::new();
        for binding in manifest.binding_paths() {
            binding_paths.insert(binding, self.runtime.string_to_path(instance, binding)?);
        }

        self.tables = manifest
            .suggested_bindings
            .iter()
            .zip(profile_paths)
            .map(|(suggested, interaction_profile_path)| ProfileBindingTable {
                interaction_profile: suggested.interaction_profile.clone(),
                interaction_profile_path,
                bindings: suggested
                    .iter()
                    .map(|(action, binding)| SuggestedBinding {
                        action: actions[action],
                        binding: binding_paths[binding],
                    })
                    .collect(),
            })
            .collect();

        Ok(())
    }

    /// Submits every table in manifest order, stopping at the first failing call
    pub fn suggest_interaction_profile_bindings(
        &self,
        instance: InstanceHandle,
    ) -> Result<(), RuntimeError> {
        for table in &self.tables {
            log::debug!(
                "Suggesting {} bindings for {}",
                table.bindings.len(),
                table.interaction_profile
            );
            self.runtime.suggest_interaction_profile_bindings(
                instance,
                table.interaction_profile_path,
                &table.bindings,
            )?;
        }
        Ok(())
    }

    pub fn tables(&self) -> &[ProfileBindingTable] {
        &self.tables
    }

    pub fn table(&self, interaction_profile: &str) -> Option<&ProfileBindingTable> {
        self.tables
            .iter()
            .find(|table| table.interaction_profile == interaction_profile)
    }
}
