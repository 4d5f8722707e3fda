//! Common test utilities and helpers
//!
//! Manifest fixtures and mock-server paths shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ACCOUNT: &str = "acct";
pub const API_KEY: &str = "test-token";
pub const AGENT: &str = "agent1";
pub const APP_NAME: &str = "app1";

/// Gateway prefix mounted on the mock server.
pub const GATEWAY_PREFIX: &str = "/gateway";

/// テスト用のアプリケーションマニフェスト
pub const APPLICATION_MANIFEST: &str = r#"gitops:
  name: app1
  orgIdentifier: org1
  projectIdentifier: proj1
  clusterIdentifier: c1
  repoIdentifier: r1
  agentIdentifier: GITOPS_AGENT_IDENTIFIER_PLACEHOLDER
  application:
    metadata:
      clusterName: in-cluster
      labels:
        harness.io/envRef: dev
        harness.io/serviceRef: checkout
    spec:
      source:
        repoURL: https://github.com/example/guestbook.git
        path: helm-guestbook
        targetRevision: main
      destination:
        server: https://kubernetes.default.svc
        namespace: guestbook
"#;

/// projectIdentifierが欠けたマニフェスト
pub const MANIFEST_WITHOUT_PROJECT: &str = r#"gitops:
  name: app1
  orgIdentifier: org1
  clusterIdentifier: c1
  repoIdentifier: r1
  application:
    metadata:
      clusterName: in-cluster
"#;

/// Writes `content` to `filename` inside `dir`.
pub fn write_manifest(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    std::fs::write(&path, content).expect("write manifest fixture");
    path
}

/// Temporary directory holding the standard application manifest.
pub fn manifest_fixture() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = write_manifest(temp_dir.path(), "application.yaml", APPLICATION_MANIFEST);
    (temp_dir, path)
}

pub fn application_path() -> String {
    format!("{}/gitops/api/v1/agents/{}/applications/{}", GATEWAY_PREFIX, AGENT, APP_NAME)
}

pub fn create_path() -> String {
    format!("{}/gitops/api/v1/agents/{}/applications", GATEWAY_PREFIX, AGENT)
}

pub fn sync_path() -> String {
    format!("{}/sync", application_path())
}

pub fn account_path() -> String {
    format!("{}/ng/api/accounts/{}", GATEWAY_PREFIX, ACCOUNT)
}
