use super::manifest::{paths, ManifestDocument};
use crate::common::result::GitOpsResult;
use serde::{Deserialize, Serialize};

/// リモートAPIに送信するGitOpsアプリケーション
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitOpsApplication {
    pub application: Application,
}

/// アプリケーション本体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub metadata: Metadata,
    pub spec: Spec,
}

/// アプリケーションのメタデータ
///
/// `namespace` は更新用の表現でのみ設定される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "clusterName", skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,

    pub labels: Labels,
}

/// 環境・サービス参照ラベル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    #[serde(rename = "harness.io/envRef")]
    pub env_ref: String,

    #[serde(rename = "harness.io/serviceRef")]
    pub service_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    pub source: Source,
    pub destination: Destination,
}

/// デプロイ元（リポジトリURL、パス、リビジョン）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "repoURL")]
    pub repo_url: String,

    pub path: String,

    #[serde(rename = "targetRevision")]
    pub target_revision: String,
}

/// デプロイ先（サーバー、名前空間）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub server: String,
    pub namespace: String,
}

impl GitOpsApplication {
    /// 作成・同期用のペイロードを構築
    ///
    /// 名前とクラスター名を含み、`metadata.namespace` は含まない。
    pub fn create_payload(manifest: &ManifestDocument) -> GitOpsResult<Self> {
        Ok(Self {
            application: Application {
                metadata: Metadata {
                    namespace: None,
                    name: Some(manifest.get_string(paths::NAME)?),
                    cluster_name: Some(manifest.get_string(paths::CLUSTER_NAME)?),
                    labels: Labels::from_manifest(manifest)?,
                },
                spec: Spec::from_manifest(manifest)?,
            },
        })
    }

    /// 更新（PUT）用のペイロードを構築
    ///
    /// `metadata.namespace` にデプロイ先の名前空間を設定する。
    pub fn update_payload(manifest: &ManifestDocument) -> GitOpsResult<Self> {
        let spec = Spec::from_manifest(manifest)?;
        Ok(Self {
            application: Application {
                metadata: Metadata {
                    namespace: Some(spec.destination.namespace.clone()),
                    name: None,
                    cluster_name: None,
                    labels: Labels::from_manifest(manifest)?,
                },
                spec,
            },
        })
    }
}

impl Labels {
    fn from_manifest(manifest: &ManifestDocument) -> GitOpsResult<Self> {
        Ok(Self {
            env_ref: manifest.get_string(paths::ENV_REF)?,
            service_ref: manifest.get_string(paths::SERVICE_REF)?,
        })
    }
}

impl Spec {
    fn from_manifest(manifest: &ManifestDocument) -> GitOpsResult<Self> {
        Ok(Self {
            source: Source {
                repo_url: manifest.get_string(paths::SOURCE_REPO_URL)?,
                path: manifest.get_string(paths::SOURCE_PATH)?,
                target_revision: manifest.get_string(paths::SOURCE_TARGET_REVISION)?,
            },
            destination: Destination {
                server: manifest.get_string(paths::DESTINATION_SERVER)?,
                namespace: manifest.get_string(paths::DESTINATION_NAMESPACE)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::GitOpsError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const MANIFEST: &str = r#"
gitops:
  name: app1
  orgIdentifier: org1
  projectIdentifier: proj1
  clusterIdentifier: c1
  repoIdentifier: r1
  application:
    metadata:
      namespace: argocd
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

    fn manifest() -> ManifestDocument {
        ManifestDocument::parse(MANIFEST).unwrap()
    }

    #[test]
    fn test_create_payload_fields() {
        let payload = GitOpsApplication::create_payload(&manifest()).unwrap();
        let metadata = &payload.application.metadata;

        assert_eq!(metadata.namespace, None);
        assert_eq!(metadata.name.as_deref(), Some("app1"));
        assert_eq!(metadata.cluster_name.as_deref(), Some("in-cluster"));
        assert_eq!(metadata.labels.env_ref, "dev");
        assert_eq!(metadata.labels.service_ref, "checkout");
        assert_eq!(
            payload.application.spec.source,
            Source {
                repo_url: "https://github.com/example/guestbook.git".to_string(),
                path: "helm-guestbook".to_string(),
                target_revision: "main".to_string(),
            }
        );
    }

    #[test]
    fn test_update_payload_uses_destination_namespace() {
        let payload = GitOpsApplication::update_payload(&manifest()).unwrap();
        let metadata = &payload.application.metadata;

        assert_eq!(metadata.namespace.as_deref(), Some("guestbook"));
        assert_eq!(metadata.name, None);
        assert_eq!(metadata.cluster_name, None);
    }

    #[test]
    fn test_projections_share_spec_and_labels() {
        let create = GitOpsApplication::create_payload(&manifest()).unwrap();
        let update = GitOpsApplication::update_payload(&manifest()).unwrap();

        assert_eq!(create.application.spec, update.application.spec);
        assert_eq!(create.application.metadata.labels, update.application.metadata.labels);
    }

    #[test]
    fn test_create_payload_json_shape() {
        let payload = GitOpsApplication::create_payload(&manifest()).unwrap();
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            json!({
                "application": {
                    "metadata": {
                        "name": "app1",
                        "clusterName": "in-cluster",
                        "labels": {
                            "harness.io/envRef": "dev",
                            "harness.io/serviceRef": "checkout"
                        }
                    },
                    "spec": {
                        "source": {
                            "repoURL": "https://github.com/example/guestbook.git",
                            "path": "helm-guestbook",
                            "targetRevision": "main"
                        },
                        "destination": {
                            "server": "https://kubernetes.default.svc",
                            "namespace": "guestbook"
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_update_payload_serializes_namespace_first() {
        let payload = GitOpsApplication::update_payload(&manifest()).unwrap();
        let text = serde_json::to_string(&payload).unwrap();

        assert!(text.starts_with(r#"{"application":{"metadata":{"namespace":"guestbook","labels""#));
        assert!(!text.contains("clusterName"));
    }

    #[test]
    fn test_missing_label_fails() {
        let doc = ManifestDocument::parse(&MANIFEST.replace("harness.io/envRef", "other")).unwrap();

        let err = GitOpsApplication::create_payload(&doc).unwrap_err();
        assert!(matches!(
            err,
            GitOpsError::MissingField { ref path } if path == "gitops.application.metadata.labels.harness.io/envRef"
        ));
        assert!(GitOpsApplication::update_payload(&doc).is_err());
    }

    #[test]
    fn test_projections_follow_each_manifest() {
        let other = ManifestDocument::parse(
            r#"
gitops:
  name: billing-api
  orgIdentifier: payments
  projectIdentifier: ledger
  clusterIdentifier: prod-eu
  repoIdentifier: billing-repo
  application:
    metadata:
      namespace: argocd-system
      clusterName: prod-eu-1
      labels:
        harness.io/envRef: production
        harness.io/serviceRef: billing
    spec:
      source:
        repoURL: https://gitlab.example.com/payments/billing.git
        path: deploy/overlays/prod
        targetRevision: v2.4.1
      destination:
        server: https://10.0.0.1:6443
        namespace: billing-prod
"#,
        )
        .unwrap();

        let create = serde_json::to_value(GitOpsApplication::create_payload(&other).unwrap()).unwrap();
        let update = serde_json::to_value(GitOpsApplication::update_payload(&other).unwrap()).unwrap();

        let spec = json!({
            "source": {
                "repoURL": "https://gitlab.example.com/payments/billing.git",
                "path": "deploy/overlays/prod",
                "targetRevision": "v2.4.1"
            },
            "destination": {
                "server": "https://10.0.0.1:6443",
                "namespace": "billing-prod"
            }
        });
        let labels = json!({
            "harness.io/envRef": "production",
            "harness.io/serviceRef": "billing"
        });

        assert_eq!(
            create,
            json!({
                "application": {
                    "metadata": {
                        "name": "billing-api",
                        "clusterName": "prod-eu-1",
                        "labels": labels
                    },
                    "spec": spec
                }
            })
        );
        // The manifest's own metadata.namespace is never copied; update takes the destination's.
        assert_eq!(
            update,
            json!({
                "application": {
                    "metadata": {
                        "namespace": "billing-prod",
                        "labels": labels
                    },
                    "spec": spec
                }
            })
        );
    }
}
