use std::sync::Arc;
use tracing::{error, info, Instrument};

use super::outcome::{MigrationError, MigrationOutcome};
use super::request::{MigrationInputs, MigrationRequest};
use super::steps::{PlannedStep, StepName};
use crate::external::{ExistenceVerdict, ResourceProber};
use crate::observability::{create_migration_span, OperationTimer};
use crate::telemetry::generate_correlation_id;

/// Runs the precondition chain and, if every check passes, the move.
///
/// Steps run one at a time in plan order. The first absent verdict ends the
/// run; nothing is retried and nothing is rolled back.
pub struct MigrationOrchestrator {
    prober: Arc<dyn ResourceProber>,
    dry_run: bool,
}

impl MigrationOrchestrator {
    pub fn new(prober: Arc<dyn ResourceProber>) -> Self {
        Self {
            prober,
            dry_run: false,
        }
    }

    /// Run every precondition but stop short of the move.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self, inputs: &MigrationInputs) -> MigrationOutcome {
        let correlation_id = generate_correlation_id();
        let span = create_migration_span(
            inputs.model_name.as_deref(),
            inputs.model_version.as_deref(),
            &correlation_id,
        );

        async {
            let mut completed = Vec::new();
            match self.execute(inputs, &mut completed).await {
                Ok(message) => {
                    info!("{message}");
                    MigrationOutcome::success(message, completed, correlation_id.clone())
                }
                Err(err) => {
                    error!(step = %err.step(), "{err}");
                    MigrationOutcome::failure(&err, completed, correlation_id.clone())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn execute(
        &self,
        inputs: &MigrationInputs,
        completed: &mut Vec<StepName>,
    ) -> Result<String, MigrationError> {
        let request = MigrationRequest::from_inputs(inputs).inspect_err(|err| {
            if let MigrationError::Configuration { field } = err {
                error!(input = field.input_name(), "Missing required input");
            }
        })?;
        completed.push(StepName::ValidateInputs);

        for step in PlannedStep::plan(&request) {
            if step == PlannedStep::MoveModel && self.dry_run {
                return Ok(format!(
                    "🔍 Dry run: all preconditions passed; model '{}' version '{}' would be moved to registry '{}'.",
                    request.model_name, request.model_version, request.destination_registry_name
                ));
            }

            info!("{}", step.announcement(&request));
            let timer = OperationTimer::new(step.name().as_str());
            let verdict = self.run_step(step, &request).await;
            timer.finish();

            if !verdict.exists {
                return Err(match step {
                    PlannedStep::MoveModel => MigrationError::MoveFailed {
                        model: request.model_name.clone(),
                        registry: request.destination_registry_name.clone(),
                    },
                    _ => MigrationError::PreconditionNotMet {
                        step: step.name(),
                        message: step.failure_message(&request),
                    },
                });
            }

            completed.push(step.name());
            if step != PlannedStep::MoveModel {
                info!("{}", step.confirmation(&request));
            }
        }

        Ok(PlannedStep::MoveModel.confirmation(&request))
    }

    async fn run_step(&self, step: PlannedStep, request: &MigrationRequest) -> ExistenceVerdict {
        match step {
            PlannedStep::CheckSourceResourceGroup => {
                self.prober
                    .probe_resource_group(&request.source_resource_group)
                    .await
            }
            PlannedStep::CheckDestinationResourceGroup => {
                self.prober
                    .probe_resource_group(&request.destination_resource_group)
                    .await
            }
            PlannedStep::CheckSourceWorkspace => {
                self.prober
                    .probe_workspace(&request.source_workspace_name, &request.source_resource_group)
                    .await
            }
            PlannedStep::CheckDestinationRegistry => {
                self.prober
                    .probe_registry(
                        &request.destination_registry_name,
                        &request.destination_registry_resource_group,
                    )
                    .await
            }
            PlannedStep::CheckModelInSourceWorkspace => {
                self.prober
                    .probe_model_in_workspace(
                        &request.model_name,
                        &request.model_version,
                        &request.source_workspace_name,
                        &request.source_resource_group,
                    )
                    .await
            }
            PlannedStep::MoveModel => {
                self.prober
                    .move_model(
                        &request.model_name,
                        &request.model_version,
                        &request.source_workspace_name,
                        &request.source_resource_group,
                        &request.destination_registry_name,
                    )
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::azure::MockResourceProber;
    use crate::migration::request::tests::complete_inputs;
    use crate::migration::request::RequiredField;
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn found() -> ExistenceVerdict {
        ExistenceVerdict::present("{}")
    }

    fn missing() -> ExistenceVerdict {
        ExistenceVerdict::absent("(ResourceNotFound)")
    }

    /// Expect the four unconditional checks to pass, in order.
    fn expect_base_checks(prober: &mut MockResourceProber, seq: &mut Sequence) {
        prober
            .expect_probe_resource_group()
            .with(eq("rg-dev"))
            .times(1)
            .in_sequence(seq)
            .returning(|_| found());
        prober
            .expect_probe_resource_group()
            .with(eq("rg-prod"))
            .times(1)
            .in_sequence(seq)
            .returning(|_| found());
        prober
            .expect_probe_workspace()
            .with(eq("ws-dev"), eq("rg-dev"))
            .times(1)
            .in_sequence(seq)
            .returning(|_, _| found());
        prober
            .expect_probe_registry()
            .with(eq("reg-shared"), eq("rg-registry"))
            .times(1)
            .in_sequence(seq)
            .returning(|_, _| found());
    }

    #[tokio::test]
    async fn test_missing_input_never_probes() {
        let prober = MockResourceProber::new();
        let orchestrator = MigrationOrchestrator::new(Arc::new(prober));
        let mut inputs = complete_inputs();
        inputs.destination_registry_resource_group = None;

        let outcome = orchestrator.run(&inputs).await;

        assert!(!outcome.succeeded);
        assert_eq!(outcome.failed_step, Some(StepName::ValidateInputs));
        assert_eq!(
            outcome.message,
            format!("{} is required", RequiredField::DestinationRegistryResourceGroup)
        );
        assert!(outcome.completed_steps.is_empty());
    }

    #[tokio::test]
    async fn test_full_success_runs_every_step_in_order() {
        let mut prober = MockResourceProber::new();
        let mut seq = Sequence::new();
        expect_base_checks(&mut prober, &mut seq);
        prober
            .expect_probe_model_in_workspace()
            .with(eq("churn-model"), eq("7"), eq("ws-dev"), eq("rg-dev"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _| found());
        prober
            .expect_move_model()
            .with(eq("churn-model"), eq("7"), eq("ws-dev"), eq("rg-dev"), eq("reg-shared"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _, _| found());

        let mut inputs = complete_inputs();
        inputs.source_registry_name = Some("reg-dev".to_string());
        let outcome = MigrationOrchestrator::new(Arc::new(prober)).run(&inputs).await;

        assert!(outcome.succeeded);
        assert_eq!(outcome.failed_step, None);
        assert_eq!(outcome.message, "✅ Model 'churn-model' moved to registry 'reg-shared'.");
        assert_eq!(outcome.completed_steps.len(), 7);
        assert_eq!(outcome.completed_steps.last(), Some(&StepName::MoveModel));
    }

    #[tokio::test]
    async fn test_without_source_registry_model_check_is_skipped() {
        let mut prober = MockResourceProber::new();
        let mut seq = Sequence::new();
        expect_base_checks(&mut prober, &mut seq);
        prober.expect_probe_model_in_workspace().never();
        prober
            .expect_move_model()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _, _| found());

        let outcome = MigrationOrchestrator::new(Arc::new(prober))
            .run(&complete_inputs())
            .await;

        assert!(outcome.succeeded);
        assert!(!outcome
            .completed_steps
            .contains(&StepName::CheckModelInSourceWorkspace));
    }

    #[tokio::test]
    async fn test_missing_model_stops_before_move() {
        let mut prober = MockResourceProber::new();
        let mut seq = Sequence::new();
        expect_base_checks(&mut prober, &mut seq);
        prober
            .expect_probe_model_in_workspace()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _| missing());
        prober.expect_move_model().never();

        let mut inputs = complete_inputs();
        inputs.source_registry_name = Some("reg-dev".to_string());
        let outcome = MigrationOrchestrator::new(Arc::new(prober)).run(&inputs).await;

        assert!(!outcome.succeeded);
        assert_eq!(outcome.failed_step, Some(StepName::CheckModelInSourceWorkspace));
        assert_eq!(outcome.message, "Model 'churn-model' does not exist in workspace 'ws-dev'.");
    }

    #[tokio::test]
    async fn test_first_absent_resource_short_circuits() {
        let mut prober = MockResourceProber::new();
        prober
            .expect_probe_resource_group()
            .with(eq("rg-dev"))
            .times(1)
            .returning(|_| found());
        prober
            .expect_probe_resource_group()
            .with(eq("rg-prod"))
            .times(1)
            .returning(|_| missing());
        prober.expect_probe_workspace().never();
        prober.expect_probe_registry().never();
        prober.expect_move_model().never();

        let outcome = MigrationOrchestrator::new(Arc::new(prober))
            .run(&complete_inputs())
            .await;

        assert_eq!(outcome.failed_step, Some(StepName::CheckDestinationResourceGroup));
        assert_eq!(outcome.message, "Resource group 'rg-prod' does not exist.");
        assert_eq!(
            outcome.completed_steps,
            vec![StepName::ValidateInputs, StepName::CheckSourceResourceGroup]
        );
    }

    #[tokio::test]
    async fn test_failed_move_is_reported() {
        let mut prober = MockResourceProber::new();
        let mut seq = Sequence::new();
        expect_base_checks(&mut prober, &mut seq);
        prober
            .expect_move_model()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _, _| ExistenceVerdict::absent("The process 'az' failed with exit code 1"));

        let outcome = MigrationOrchestrator::new(Arc::new(prober))
            .run(&complete_inputs())
            .await;

        assert!(!outcome.succeeded);
        assert_eq!(outcome.failed_step, Some(StepName::MoveModel));
        assert_eq!(outcome.message, "Failed to move model 'churn-model' to registry 'reg-shared'.");
    }

    #[tokio::test]
    async fn test_dry_run_skips_move() {
        let mut prober = MockResourceProber::new();
        let mut seq = Sequence::new();
        expect_base_checks(&mut prober, &mut seq);
        prober.expect_move_model().never();

        let outcome = MigrationOrchestrator::new(Arc::new(prober))
            .with_dry_run(true)
            .run(&complete_inputs())
            .await;

        assert!(outcome.succeeded);
        assert!(outcome.message.contains("Dry run"));
        assert!(outcome.message.contains("churn-model"));
        assert!(outcome.message.contains("reg-shared"));
        assert!(!outcome.completed_steps.contains(&StepName::MoveModel));
    }

    #[tokio::test]
    async fn test_each_run_gets_a_fresh_correlation_id() {
        let orchestrator = MigrationOrchestrator::new(Arc::new(MockResourceProber::new()));
        let inputs = MigrationInputs::default();

        let first = orchestrator.run(&inputs).await;
        let second = orchestrator.run(&inputs).await;

        assert_ne!(first.correlation_id, second.correlation_id);
    }
}
