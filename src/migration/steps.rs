use serde::Serialize;
use std::fmt;

use super::request::MigrationRequest;

/// Pipeline steps, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepName {
    ValidateInputs,
    CheckSourceResourceGroup,
    CheckDestinationResourceGroup,
    CheckSourceWorkspace,
    CheckDestinationRegistry,
    CheckModelInSourceWorkspace,
    MoveModel,
}

impl StepName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepName::ValidateInputs => "validate_inputs",
            StepName::CheckSourceResourceGroup => "check_source_resource_group",
            StepName::CheckDestinationResourceGroup => "check_destination_resource_group",
            StepName::CheckSourceWorkspace => "check_source_workspace",
            StepName::CheckDestinationRegistry => "check_destination_registry",
            StepName::CheckModelInSourceWorkspace => "check_model_in_source_workspace",
            StepName::MoveModel => "move_model",
        }
    }
}

/// A step that calls the Azure CLI, in plan order.
///
/// Input validation is not part of the plan; it runs before a plan can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedStep {
    CheckSourceResourceGroup,
    CheckDestinationResourceGroup,
    CheckSourceWorkspace,
    CheckDestinationRegistry,
    CheckModelInSourceWorkspace,
    MoveModel,
}

impl PlannedStep {
    pub fn name(&self) -> StepName {
        match self {
            PlannedStep::CheckSourceResourceGroup => StepName::CheckSourceResourceGroup,
            PlannedStep::CheckDestinationResourceGroup => StepName::CheckDestinationResourceGroup,
            PlannedStep::CheckSourceWorkspace => StepName::CheckSourceWorkspace,
            PlannedStep::CheckDestinationRegistry => StepName::CheckDestinationRegistry,
            PlannedStep::CheckModelInSourceWorkspace => StepName::CheckModelInSourceWorkspace,
            PlannedStep::MoveModel => StepName::MoveModel,
        }
    }

    /// The existence checks and the move for a validated request.
    ///
    /// The model check only runs when a source registry name was supplied,
    /// even though that name is not used by the check itself.
    pub fn plan(request: &MigrationRequest) -> Vec<PlannedStep> {
        let mut steps = vec![
            PlannedStep::CheckSourceResourceGroup,
            PlannedStep::CheckDestinationResourceGroup,
            PlannedStep::CheckSourceWorkspace,
            PlannedStep::CheckDestinationRegistry,
        ];
        if request.verifies_model_in_workspace() {
            steps.push(PlannedStep::CheckModelInSourceWorkspace);
        }
        steps.push(PlannedStep::MoveModel);
        steps
    }

    pub fn announcement(&self, request: &MigrationRequest) -> String {
        match self {
            PlannedStep::CheckSourceResourceGroup => format!(
                "🔹 Checking if resource group '{}' exists...",
                request.source_resource_group
            ),
            PlannedStep::CheckDestinationResourceGroup => format!(
                "🔹 Checking if destination resource group '{}' exists...",
                request.destination_resource_group
            ),
            PlannedStep::CheckSourceWorkspace => format!(
                "🔹 Checking if workspace '{}' exists in resource group '{}'...",
                request.source_workspace_name, request.source_resource_group
            ),
            PlannedStep::CheckDestinationRegistry => format!(
                "🔹 Checking if registry '{}' exists in resource group '{}'...",
                request.destination_registry_name, request.destination_registry_resource_group
            ),
            PlannedStep::CheckModelInSourceWorkspace => format!(
                "🔹 Checking if model '{}' exists in workspace '{}'...",
                request.model_name, request.source_workspace_name
            ),
            PlannedStep::MoveModel => format!(
                "🔹 Moving model '{}' to registry '{}'...",
                request.model_name, request.destination_registry_name
            ),
        }
    }

    pub fn confirmation(&self, request: &MigrationRequest) -> String {
        match self {
            PlannedStep::CheckSourceResourceGroup => {
                format!("✅ Resource group '{}' exists.", request.source_resource_group)
            }
            PlannedStep::CheckDestinationResourceGroup => {
                format!("✅ Resource group '{}' exists.", request.destination_resource_group)
            }
            PlannedStep::CheckSourceWorkspace => format!(
                "✅ Workspace '{}' exists in resource group '{}'.",
                request.source_workspace_name, request.source_resource_group
            ),
            PlannedStep::CheckDestinationRegistry => format!(
                "✅ Registry '{}' exists in resource group '{}'.",
                request.destination_registry_name, request.destination_registry_resource_group
            ),
            PlannedStep::CheckModelInSourceWorkspace => format!(
                "✅ Model '{}' exists in workspace '{}'.",
                request.model_name, request.source_workspace_name
            ),
            PlannedStep::MoveModel => format!(
                "✅ Model '{}' moved to registry '{}'.",
                request.model_name, request.destination_registry_name
            ),
        }
    }

    /// Message reported when an existence check comes back absent.
    pub fn failure_message(&self, request: &MigrationRequest) -> String {
        match self {
            PlannedStep::CheckSourceResourceGroup => {
                format!("Resource group '{}' does not exist.", request.source_resource_group)
            }
            PlannedStep::CheckDestinationResourceGroup => {
                format!("Resource group '{}' does not exist.", request.destination_resource_group)
            }
            PlannedStep::CheckSourceWorkspace => format!(
                "Workspace '{}' does not exist in resource group '{}'.",
                request.source_workspace_name, request.source_resource_group
            ),
            PlannedStep::CheckDestinationRegistry => format!(
                "Registry '{}' does not exist in resource group '{}'.",
                request.destination_registry_name, request.destination_registry_resource_group
            ),
            PlannedStep::CheckModelInSourceWorkspace => format!(
                "Model '{}' does not exist in workspace '{}'.",
                request.model_name, request.source_workspace_name
            ),
            PlannedStep::MoveModel => format!(
                "Failed to move model '{}' to registry '{}'.",
                request.model_name, request.destination_registry_name
            ),
        }
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
