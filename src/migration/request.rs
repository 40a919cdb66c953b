use std::fmt;

use super::outcome::MigrationError;

/// Raw inputs as supplied by the caller, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationInputs {
    pub source_registry_name: Option<String>,
    pub source_workspace_name: Option<String>,
    pub source_resource_group: Option<String>,
    pub destination_resource_group: Option<String>,
    pub destination_registry_name: Option<String>,
    pub destination_registry_resource_group: Option<String>,
    pub model_name: Option<String>,
    pub model_version: Option<String>,
}

/// Inputs that must be present and non-blank before any probing starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    SourceResourceGroup,
    SourceWorkspaceName,
    DestinationRegistryName,
    DestinationResourceGroup,
    ModelName,
    ModelVersion,
    DestinationRegistryResourceGroup,
}

impl RequiredField {
    /// Checked in this order; the first missing field is reported.
    pub const VALIDATION_ORDER: [RequiredField; 7] = [
        RequiredField::SourceResourceGroup,
        RequiredField::SourceWorkspaceName,
        RequiredField::DestinationRegistryName,
        RequiredField::DestinationResourceGroup,
        RequiredField::ModelName,
        RequiredField::ModelVersion,
        RequiredField::DestinationRegistryResourceGroup,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            RequiredField::SourceResourceGroup => "Source resource group",
            RequiredField::SourceWorkspaceName => "Source workspace name",
            RequiredField::DestinationRegistryName => "Destination registry name",
            RequiredField::DestinationResourceGroup => "Destination resource group",
            RequiredField::ModelName => "Model name",
            RequiredField::ModelVersion => "Model version",
            RequiredField::DestinationRegistryResourceGroup => "Destination registry resource group",
        }
    }

    /// Input name as declared for the hosting workflow.
    pub fn input_name(&self) -> &'static str {
        match self {
            RequiredField::SourceResourceGroup => "source_resource_group",
            RequiredField::SourceWorkspaceName => "source_workspace_name",
            RequiredField::DestinationRegistryName => "destination_registry_name",
            RequiredField::DestinationResourceGroup => "destination_resource_group",
            RequiredField::ModelName => "model_name",
            RequiredField::ModelVersion => "model_version",
            RequiredField::DestinationRegistryResourceGroup => "destination_registry_resource_group",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl MigrationInputs {
    fn raw(&self, field: RequiredField) -> Option<&String> {
        match field {
            RequiredField::SourceResourceGroup => self.source_resource_group.as_ref(),
            RequiredField::SourceWorkspaceName => self.source_workspace_name.as_ref(),
            RequiredField::DestinationRegistryName => self.destination_registry_name.as_ref(),
            RequiredField::DestinationResourceGroup => self.destination_resource_group.as_ref(),
            RequiredField::ModelName => self.model_name.as_ref(),
            RequiredField::ModelVersion => self.model_version.as_ref(),
            RequiredField::DestinationRegistryResourceGroup => {
                self.destination_registry_resource_group.as_ref()
            }
        }
    }

    fn required(&self, field: RequiredField) -> Result<String, MigrationError> {
        self.raw(field)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .ok_or(MigrationError::Configuration { field })
    }
}

/// Validated migration parameters. Every required field is non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRequest {
    pub source_workspace_name: String,
    pub source_resource_group: String,
    pub destination_resource_group: String,
    pub destination_registry_name: String,
    pub destination_registry_resource_group: String,
    pub model_name: String,
    pub model_version: String,
    /// Only its presence matters: it gates the model-in-workspace check.
    pub source_registry_name: Option<String>,
}

impl MigrationRequest {
    pub fn from_inputs(inputs: &MigrationInputs) -> Result<Self, MigrationError> {
        // Field initializers run top to bottom, matching VALIDATION_ORDER.
        Ok(Self {
            source_resource_group: inputs.required(RequiredField::SourceResourceGroup)?,
            source_workspace_name: inputs.required(RequiredField::SourceWorkspaceName)?,
            destination_registry_name: inputs.required(RequiredField::DestinationRegistryName)?,
            destination_resource_group: inputs.required(RequiredField::DestinationResourceGroup)?,
            model_name: inputs.required(RequiredField::ModelName)?,
            model_version: inputs.required(RequiredField::ModelVersion)?,
            destination_registry_resource_group: inputs
                .required(RequiredField::DestinationRegistryResourceGroup)?,
            source_registry_name: inputs
                .source_registry_name
                .as_ref()
                .map(|value| value.trim().to_string()),
        })
    }

    pub fn verifies_model_in_workspace(&self) -> bool {
        self.source_registry_name.is_some()
    }
}
