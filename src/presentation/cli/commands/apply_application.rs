use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::application::use_cases::apply_application::{
    ApplyApplicationConfig, ApplyApplicationError, ApplyApplicationUseCase, ReconcileOutcome,
    ReconcileReport,
};
use crate::domain::entities::client_context::ClientContext;
use crate::infrastructure::http::api_client::{GitOpsApi, HttpApiClient};
use crate::infrastructure::terminal::prompt::{ConsolePrompt, InputPrompt};

/// Handler for the `apply gitops-application` command
pub struct ApplyApplicationCommand {
    pub manifest_file: Option<String>,
    pub agent_identifier: Option<String>,
}

impl ApplyApplicationCommand {
    pub fn new(manifest_file: Option<String>, agent_identifier: Option<String>) -> Self {
        Self {
            manifest_file,
            agent_identifier,
        }
    }

    /// True when no usable manifest path was given.
    pub fn missing_file(&self) -> bool {
        self.manifest_file
            .as_deref()
            .map(str::trim)
            .map_or(true, str::is_empty)
    }

    pub fn report_missing_file(&self) {
        println!("{}", ApplyApplicationError::MissingManifestPath);
    }

    pub async fn execute(&self, context: &ClientContext) -> Result<()> {
        let api = HttpApiClient::new(context)?;
        let prompt = ConsolePrompt::new();
        self.execute_with(context, &api, &prompt).await
    }

    pub async fn execute_with(
        &self,
        context: &ClientContext,
        api: &dyn GitOpsApi,
        prompt: &dyn InputPrompt,
    ) -> Result<()> {
        if self.missing_file() {
            self.report_missing_file();
            return Ok(());
        }
        let manifest_file = self.manifest_file.as_deref().unwrap_or_default();

        println!(
            "Trying to create or update gitops-application using the yaml= {}",
            manifest_file.cyan()
        );

        let config = ApplyApplicationConfig {
            manifest_file: Some(PathBuf::from(manifest_file)),
            agent_identifier: self.agent_identifier.clone(),
        };
        let use_case = ApplyApplicationUseCase::new(config, context, api, prompt);

        match use_case.execute().await {
            Ok(report) => {
                print_report(&report);
                Ok(())
            }
            Err(ApplyApplicationError::MissingManifestPath) => {
                self.report_missing_file();
                Ok(())
            }
            Err(ApplyApplicationError::Internal(e)) => Err(e.into()),
            // Manifest problems are reported, not raised.
            Err(e) => {
                println!("{}", format!("{:#}", anyhow::Error::new(e)).red());
                Ok(())
            }
        }
    }
}

fn print_report(report: &ReconcileReport) {
    let name = &report.application_name;

    match &report.outcome {
        ReconcileOutcome::ProbeFailed { reason } => {
            println!(
                "{} {}: {}",
                "Could not determine whether GitOps Application exists:".red(),
                name.blue(),
                reason
            );
            return;
        }
        ReconcileOutcome::Created | ReconcileOutcome::CreateFailed { .. } => {
            println!("Creating GitOps-Application with id: {}", name.green());
        }
        _ => {
            println!("Found GitOps Application with id= {}", name.cyan());
            println!("Updating details of GitOps Application with id= {}", name.blue());
            println!(
                "Syncing the GitOps Application before updating the spec: {}",
                name.green()
            );
        }
    }

    match &report.outcome {
        ReconcileOutcome::Created => {
            println!(
                "{}{}",
                "Successfully created GitOps-Application with id= ".green(),
                name.blue()
            );
        }
        ReconcileOutcome::CreateFailed { reason } => {
            println!("{} {}: {}", "Failed to create GitOps-Application".red(), name.blue(), reason);
        }
        ReconcileOutcome::SyncFailed { reason } => {
            println!("{} {}: {}", "Failed to sync GitOps app".red(), name.blue(), reason);
        }
        ReconcileOutcome::Updated => {
            print_synced(name);
            println!(
                "{}{}",
                "Successfully updated GitOps app with id= ".green(),
                name.blue()
            );
        }
        ReconcileOutcome::UpdateFailed { reason } => {
            print_synced(name);
            println!("{} {}: {}", "Failed to update GitOps app".red(), name.blue(), reason);
        }
        ReconcileOutcome::ProbeFailed { .. } => {}
    }
}

fn print_synced(name: &str) {
    println!(
        "{}{}",
        "Successfully synced GitOps app with id= ".green(),
        name.blue()
    );
}
