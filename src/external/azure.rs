//! Azure CLI abstractions
//!
//! Translates resource lookups into `az` invocations and reduces each
//! invocation to an [`ExistenceVerdict`]. Absence is data here, not an error:
//! a missing resource, a non-zero exit and a spawn failure all come back as
//! `exists: false` with the captured diagnostic text.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::command::{CommandError, CommandExecutor, CommandOutput};

#[cfg(test)]
use mockall::automock;

pub const DEFAULT_AZ_PROGRAM: &str = "az";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    ResourceGroup,
    Workspace,
    Registry,
    Model,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResourceKind::ResourceGroup => "resource group",
            ResourceKind::Workspace => "workspace",
            ResourceKind::Registry => "registry",
            ResourceKind::Model => "model",
        };
        f.write_str(label)
    }
}

/// Where a model lookup is scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelScope {
    Registry(String),
    Workspace(String),
}

/// Identity of a single resource to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentity {
    pub kind: ResourceKind,
    pub name: String,
    pub resource_group: String,
    pub version: Option<String>,
    pub scope: Option<ModelScope>,
}

impl ResourceIdentity {
    pub fn resource_group(name: &str) -> Self {
        Self {
            kind: ResourceKind::ResourceGroup,
            name: name.to_string(),
            resource_group: name.to_string(),
            version: None,
            scope: None,
        }
    }

    pub fn workspace(name: &str, resource_group: &str) -> Self {
        Self {
            kind: ResourceKind::Workspace,
            name: name.to_string(),
            resource_group: resource_group.to_string(),
            version: None,
            scope: None,
        }
    }

    pub fn registry(name: &str, resource_group: &str) -> Self {
        Self {
            kind: ResourceKind::Registry,
            name: name.to_string(),
            resource_group: resource_group.to_string(),
            version: None,
            scope: None,
        }
    }

    pub fn model_in_registry(name: &str, version: &str, registry: &str, resource_group: &str) -> Self {
        Self {
            kind: ResourceKind::Model,
            name: name.to_string(),
            resource_group: resource_group.to_string(),
            version: Some(version.to_string()),
            scope: Some(ModelScope::Registry(registry.to_string())),
        }
    }

    pub fn model_in_workspace(name: &str, version: &str, workspace: &str, resource_group: &str) -> Self {
        Self {
            kind: ResourceKind::Model,
            name: name.to_string(),
            resource_group: resource_group.to_string(),
            version: Some(version.to_string()),
            scope: Some(ModelScope::Workspace(workspace.to_string())),
        }
    }

    /// First identity field that is empty or whitespace, if any.
    pub fn blank_field(&self) -> Option<&'static str> {
        let mut fields = vec![("name", self.name.as_str()), ("resource group", self.resource_group.as_str())];
        if let Some(version) = &self.version {
            fields.push(("version", version.as_str()));
        }
        match &self.scope {
            Some(ModelScope::Registry(registry)) => fields.push(("registry name", registry.as_str())),
            Some(ModelScope::Workspace(workspace)) => fields.push(("workspace name", workspace.as_str())),
            None => {}
        }
        fields
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
    }
}

/// A single `az` invocation, rendered to an argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AzureCommand {
    Show(ResourceIdentity),
    ShareModel {
        model_name: String,
        model_version: String,
        workspace: String,
        resource_group: String,
        registry: String,
    },
}

impl AzureCommand {
    pub fn args(&self) -> Vec<String> {
        match self {
            AzureCommand::Show(identity) => {
                let verb: &[&str] = match identity.kind {
                    ResourceKind::ResourceGroup => &["group", "show"],
                    ResourceKind::Workspace => &["ml", "workspace", "show"],
                    ResourceKind::Registry => &["ml", "registry", "show"],
                    ResourceKind::Model => &["ml", "model", "show"],
                };
                let mut args: Vec<String> = verb.iter().map(|s| s.to_string()).collect();
                args.extend(["--name".to_string(), identity.name.clone()]);
                if let Some(version) = &identity.version {
                    args.extend(["--version".to_string(), version.clone()]);
                }
                match &identity.scope {
                    Some(ModelScope::Registry(registry)) => {
                        args.extend(["--registry-name".to_string(), registry.clone()]);
                    }
                    Some(ModelScope::Workspace(workspace)) => {
                        args.extend(["--workspace-name".to_string(), workspace.clone()]);
                    }
                    None => {}
                }
                args.extend(["--resource-group".to_string(), identity.resource_group.clone()]);
                args
            }
            AzureCommand::ShareModel {
                model_name,
                model_version,
                workspace,
                resource_group,
                registry,
            } => [
                "ml",
                "model",
                "share",
                "--name",
                model_name.as_str(),
                "--version",
                model_version.as_str(),
                "--resource-group",
                resource_group.as_str(),
                "--workspace-name",
                workspace.as_str(),
                "--share-with-name",
                model_name.as_str(),
                "--share-with-version",
                model_version.as_str(),
                "--registry-name",
                registry.as_str(),
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    fn blank_field(&self) -> Option<&'static str> {
        match self {
            AzureCommand::Show(identity) => identity.blank_field(),
            AzureCommand::ShareModel {
                model_name,
                model_version,
                workspace,
                resource_group,
                registry,
            } => [
                ("model name", model_name),
                ("model version", model_version),
                ("workspace name", workspace),
                ("resource group", resource_group),
                ("registry name", registry),
            ]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field),
        }
    }

    fn describe(&self) -> String {
        match self {
            AzureCommand::Show(identity) => format!("{} '{}'", identity.kind, identity.name),
            AzureCommand::ShareModel { model_name, registry, .. } => {
                format!("share of model '{model_name}' to registry '{registry}'")
            }
        }
    }
}

/// Result of a probe or move: whether it succeeded, plus the text to log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExistenceVerdict {
    pub exists: bool,
    pub diagnostic: String,
}

impl ExistenceVerdict {
    pub fn present(diagnostic: impl Into<String>) -> Self {
        Self {
            exists: true,
            diagnostic: diagnostic.into(),
        }
    }

    pub fn absent(diagnostic: impl Into<String>) -> Self {
        Self {
            exists: false,
            diagnostic: diagnostic.into(),
        }
    }

    /// Reduce one invocation to a verdict. Exit 0 passes stdout through;
    /// anything else passes stderr through, falling back to the invocation
    /// error text when stderr is empty.
    pub fn from_invocation(program: &str, result: Result<CommandOutput, CommandError>) -> Self {
        match result {
            Ok(output) if output.success() => Self::present(output.stdout),
            Ok(output) => {
                if output.stderr.is_empty() {
                    Self::absent(format!(
                        "The process '{program}' failed with exit code {}",
                        output.status_code
                    ))
                } else {
                    Self::absent(output.stderr)
                }
            }
            Err(error) => Self::absent(error.to_string()),
        }
    }
}

/// Resource lookups and the model share, each reduced to a verdict.
///
/// Implementations never return errors; callers must reject blank inputs
/// before calling.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResourceProber: Send + Sync {
    async fn probe_resource_group(&self, resource_group: &str) -> ExistenceVerdict;

    async fn probe_workspace(&self, workspace_name: &str, resource_group: &str) -> ExistenceVerdict;

    async fn probe_registry(&self, registry_name: &str, resource_group: &str) -> ExistenceVerdict;

    async fn probe_model_in_registry(
        &self,
        model_name: &str,
        model_version: &str,
        registry_name: &str,
        resource_group: &str,
    ) -> ExistenceVerdict;

    async fn probe_model_in_workspace(
        &self,
        model_name: &str,
        model_version: &str,
        workspace_name: &str,
        resource_group: &str,
    ) -> ExistenceVerdict;

    /// Share a model version from a workspace into a registry.
    async fn move_model(
        &self,
        model_name: &str,
        model_version: &str,
        source_workspace: &str,
        source_resource_group: &str,
        destination_registry: &str,
    ) -> ExistenceVerdict;
}

/// Real Azure CLI implementation
pub struct AzureCliProber {
    executor: Arc<dyn CommandExecutor>,
    program: String,
}

impl AzureCliProber {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            executor,
            program: DEFAULT_AZ_PROGRAM.to_string(),
        }
    }

    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run one command and reduce it to a verdict.
    pub async fn run(&self, command: &AzureCommand) -> ExistenceVerdict {
        let subject = command.describe();

        if let Some(field) = command.blank_field() {
            warn!(subject = %subject, field, "Refusing to invoke az with a blank field");
            return ExistenceVerdict::absent(format!("{field} must not be blank"));
        }

        let args = command.args();
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        debug!(program = %self.program, args = ?arg_refs, "Invoking Azure CLI");

        let result = self.executor.execute(&self.program, &arg_refs).await;
        let verdict = ExistenceVerdict::from_invocation(&self.program, result);

        if verdict.exists {
            info!(subject = %subject, output = %verdict.diagnostic, "✅ Found");
        } else {
            warn!(subject = %subject, diagnostic = %verdict.diagnostic, "❌ Not found or error occurred");
        }
        verdict
    }
}

#[async_trait]
impl ResourceProber for AzureCliProber {
    async fn probe_resource_group(&self, resource_group: &str) -> ExistenceVerdict {
        self.run(&AzureCommand::Show(ResourceIdentity::resource_group(resource_group)))
            .await
    }

    async fn probe_workspace(&self, workspace_name: &str, resource_group: &str) -> ExistenceVerdict {
        self.run(&AzureCommand::Show(ResourceIdentity::workspace(workspace_name, resource_group)))
            .await
    }

    async fn probe_registry(&self, registry_name: &str, resource_group: &str) -> ExistenceVerdict {
        self.run(&AzureCommand::Show(ResourceIdentity::registry(registry_name, resource_group)))
            .await
    }

    async fn probe_model_in_registry(
        &self,
        model_name: &str,
        model_version: &str,
        registry_name: &str,
        resource_group: &str,
    ) -> ExistenceVerdict {
        self.run(&AzureCommand::Show(ResourceIdentity::model_in_registry(
            model_name,
            model_version,
            registry_name,
            resource_group,
        )))
        .await
    }

    async fn probe_model_in_workspace(
        &self,
        model_name: &str,
        model_version: &str,
        workspace_name: &str,
        resource_group: &str,
    ) -> ExistenceVerdict {
        self.run(&AzureCommand::Show(ResourceIdentity::model_in_workspace(
            model_name,
            model_version,
            workspace_name,
            resource_group,
        )))
        .await
    }

    async fn move_model(
        &self,
        model_name: &str,
        model_version: &str,
        source_workspace: &str,
        source_resource_group: &str,
        destination_registry: &str,
    ) -> ExistenceVerdict {
        self.run(&AzureCommand::ShareModel {
            model_name: model_name.to_string(),
            model_version: model_version.to_string(),
            workspace: source_workspace.to_string(),
            resource_group: source_resource_group.to_string(),
            registry: destination_registry.to_string(),
        })
        .await
    }
}
