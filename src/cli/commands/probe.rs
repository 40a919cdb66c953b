use anyhow::Result;
use std::sync::Arc;

use crate::cli::commands::Command;
use crate::cli::ProbeTarget;
use crate::external::{ExistenceVerdict, ResourceProber};

pub struct ProbeCommand {
    target: ProbeTarget,
    prober: Arc<dyn ResourceProber>,
    json: bool,
}

impl ProbeCommand {
    pub fn new(target: ProbeTarget, prober: Arc<dyn ResourceProber>) -> Self {
        Self {
            target,
            prober,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub async fn verdict(&self) -> ExistenceVerdict {
        match &self.target {
            ProbeTarget::ResourceGroup { name } => self.prober.probe_resource_group(name).await,
            ProbeTarget::Workspace { name, resource_group } => {
                self.prober.probe_workspace(name, resource_group).await
            }
            ProbeTarget::Registry { name, resource_group } => {
                self.prober.probe_registry(name, resource_group).await
            }
            ProbeTarget::Model {
                name,
                version,
                resource_group,
                workspace_name,
                registry_name,
            } => match (workspace_name, registry_name) {
                (Some(workspace), _) => {
                    self.prober
                        .probe_model_in_workspace(name, version, workspace, resource_group)
                        .await
                }
                (None, Some(registry)) => {
                    self.prober
                        .probe_model_in_registry(name, version, registry, resource_group)
                        .await
                }
                (None, None) => ExistenceVerdict::absent("either a workspace or a registry name is required"),
            },
        }
    }
}

/// Status line followed by the diagnostic, always ending in a newline.
fn render_text(verdict: &ExistenceVerdict) -> String {
    let mut text = if verdict.exists {
        "✅ Found\n".to_string()
    } else {
        "❌ Not found or error occurred\n".to_string()
    };
    text.push_str(&verdict.diagnostic);
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

impl Command for ProbeCommand {
    async fn execute(&self) -> Result<i32> {
        let verdict = self.verdict().await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        } else {
            print!("{}", render_text(&verdict));
        }

        Ok(if verdict.exists { 0 } else { 1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::azure::MockResourceProber;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_model_probe_prefers_workspace_scope() {
        let mut prober = MockResourceProber::new();
        prober
            .expect_probe_model_in_workspace()
            .with(eq("m"), eq("2"), eq("ws"), eq("rg"))
            .times(1)
            .returning(|_, _, _, _| ExistenceVerdict::present("{}"));
        prober.expect_probe_model_in_registry().never();

        let command = ProbeCommand::new(
            ProbeTarget::Model {
                name: "m".to_string(),
                version: "2".to_string(),
                resource_group: "rg".to_string(),
                workspace_name: Some("ws".to_string()),
                registry_name: None,
            },
            Arc::new(prober),
        );

        assert!(command.verdict().await.exists);
    }

    #[tokio::test]
    async fn test_registry_probe_exit_code() {
        let mut prober = MockResourceProber::new();
        prober
            .expect_probe_registry()
            .with(eq("reg"), eq("rg"))
            .returning(|_, _| ExistenceVerdict::absent("(ResourceNotFound)"));

        let command = ProbeCommand::new(
            ProbeTarget::Registry {
                name: "reg".to_string(),
                resource_group: "rg".to_string(),
            },
            Arc::new(prober),
        )
        .with_json(true);

        assert_eq!(command.execute().await.unwrap(), 1);
    }

    #[test]
    fn test_text_output_ends_with_newline() {
        assert_eq!(
            render_text(&ExistenceVerdict::absent("Command not found: az")),
            "❌ Not found or error occurred\nCommand not found: az\n"
        );
        assert_eq!(
            render_text(&ExistenceVerdict::present("{}\n")),
            "✅ Found\n{}\n"
        );
        assert_eq!(render_text(&ExistenceVerdict::absent("")), "❌ Not found or error occurred\n");
    }
}
