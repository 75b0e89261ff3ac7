//! Per-session shell state.

use notes_core::{Package, ServiceResult, Workspace};

/// State that survives between shell commands.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    current_package: Option<Package>,
}

impl SessionContext {
    pub fn current_package(&self) -> Option<&Package> {
        self.current_package.as_ref()
    }

    pub fn current_package_id(&self) -> Option<&str> {
        self.current_package.as_ref().map(|package| package.id.as_str())
    }

    pub fn prompt(&self) -> String {
        let name = self
            .current_package
            .as_ref()
            .map(|package| package.name.as_str())
            .unwrap_or("");
        format!("notes:{name} > ")
    }

    pub fn switch_to(&mut self, package: Package) {
        self.current_package = Some(package);
    }

    /// Drops the current package when `deleted_id` is it.
    pub fn forget_if_deleted(&mut self, deleted_id: &str) {
        if self.current_package_id() == Some(deleted_id) {
            self.current_package = None;
        }
    }

    /// Reloads the current package so renames and status changes show up.
    pub fn refresh(&mut self, workspace: &Workspace<'_>) -> ServiceResult<()> {
        if let Some(id) = self.current_package_id().map(str::to_string) {
            self.current_package = workspace.packages.get_package(&id)?;
        }
        Ok(())
    }
}
