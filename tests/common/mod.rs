// Shared helpers for integration tests.
//
// Provides a temporary config directory and a fluent builder so each
// integration test can lay out manifests, templates, and settings without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// A plain RBAC manifest.
pub const ROLE: &str = "\
apiVersion: rbac.authorization.k8s.io/v1
kind: Role
metadata:
  name: reader
  namespace: ci
rules: []
";

/// An OpenShift template rendering a single role binding.
pub const TEMPLATE: &str = "\
apiVersion: template.openshift.io/v1
kind: Template
metadata:
  name: binding
parameters:
- name: NAMESPACE
  value: ci
objects:
- apiVersion: rbac.authorization.k8s.io/v1
  kind: RoleBinding
  metadata:
    name: reader
    namespace: ${NAMESPACE}
";

/// A temporary config directory, deleted on drop.
pub struct IntegrationTestContext {
    /// Temporary directory holding `conf/`.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new context with an empty `conf/` directory.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("conf")).expect("create conf dir");
        Self { root }
    }

    /// Path to the config directory.
    pub fn config_dir(&self) -> PathBuf {
        self.root.path().join("conf")
    }

    /// Replace the config directory prefix in `text` with `<conf>`.
    pub fn relative(&self, text: &str) -> String {
        let prefix = self.config_dir().to_string_lossy().into_owned();
        text.replace(&prefix, "<conf>")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context with an empty config directory.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write `content` to `conf/<relative>`, creating parent directories.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        write(&self.ctx.config_dir().join(relative), content);
        self
    }

    /// Write a plain manifest to `conf/<relative>`.
    pub fn with_manifest(self, relative: &str) -> Self {
        self.with_file(relative, ROLE)
    }

    /// Write a template to `conf/<relative>`.
    pub fn with_template(self, relative: &str) -> Self {
        self.with_file(relative, TEMPLATE)
    }

    /// Write `.applyconfig.toml` into the config directory.
    pub fn with_settings(self, content: &str) -> Self {
        self.with_file(".applyconfig.toml", content)
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}
