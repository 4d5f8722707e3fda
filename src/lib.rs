//! # gitops-apply - GitOps application manifests to the remote API
//!
//! `gitops-apply` reads a GitOps application manifest and brings the remote
//! control plane in line with it: a missing application is created, an
//! existing one is synced to its last known state and then updated.
//!
//! ## Quick Start
//!
//! 1. Write a manifest (`app.yaml`):
//!
//! ```yaml
//! gitops:
//!   name: guestbook
//!   orgIdentifier: default
//!   projectIdentifier: shop
//!   clusterIdentifier: incluster
//!   repoIdentifier: guestbook-repo
//!   application:
//!     metadata:
//!       clusterName: in-cluster
//!       labels:
//!         harness.io/envRef: dev
//!         harness.io/serviceRef: guestbook
//!     spec:
//!       source:
//!         repoURL: https://github.com/argoproj/argocd-example-apps.git
//!         path: helm-guestbook
//!         targetRevision: HEAD
//!       destination:
//!         server: https://kubernetes.default.svc
//!         namespace: guestbook
//! ```
//!
//! 2. Apply it:
//!
//! ```bash
//! gitops-apply --account-id <account> --api-key <token> \
//!     apply gitops-application --file app.yaml --agent-identifier <agent>
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: manifest document, application entity and its request projections, scope
//! - [`application`]: the apply (reconcile) and account lookup use cases
//! - [`infrastructure`]: HTTP client, manifest and settings files, terminal input
//! - [`presentation`]: CLI interface and user-facing output
//! - [`common`]: error type and result helpers
//!
//! ## Reconciliation
//!
//! [`application::use_cases::apply_application::ApplyApplicationUseCase`] probes for the
//! application by name. When it is absent the create payload is POSTed. When it
//! exists the sync call is made first and the update PUT only follows a
//! successful sync. Remote failures come back as a
//! [`application::use_cases::apply_application::ReconcileOutcome`] rather than an error.
//!
//! ## Using the Library
//!
//! ```rust,no_run
//! use gitops_apply::application::use_cases::apply_application::{
//!     ApplyApplicationConfig, ApplyApplicationUseCase,
//! };
//! use gitops_apply::domain::entities::client_context::ClientContext;
//! use gitops_apply::infrastructure::{ConsolePrompt, HttpApiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let context = ClientContext::new("account", "token", "https://app.harness.io/gateway")?;
//! let api = HttpApiClient::new(&context)?;
//! let prompt = ConsolePrompt::new();
//!
//! let config = ApplyApplicationConfig {
//!     manifest_file: Some("app.yaml".into()),
//!     agent_identifier: Some("agent".to_string()),
//! };
//! let report = ApplyApplicationUseCase::new(config, &context, &api, &prompt)
//!     .execute()
//!     .await?;
//!
//! println!("{}: {:?}", report.application_name, report.outcome);
//! # Ok(())
//! # }
//! ```

// Documentation attributes
#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::GitOpsError;
pub use crate::common::result::GitOpsResult as Result;
