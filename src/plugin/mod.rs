//! Bundler plugin surface

use crate::executor::{execute_pairs, ExecutionEvent, ExecutionStats};
use crate::resolver::normalize_targets;
use crate::types::{BuildContext, CopyError};
use crate::ui::VerboseReporter;
use crate::Config;
use std::future::Future;
use std::io::Write;

/// A plugin the host calls into during a build
pub trait BuildPlugin {
    /// Plugin name, for host diagnostics
    fn name(&self) -> &'static str;

    /// Called once the host has written its own output
    ///
    /// The build step is complete when the returned future resolves. An
    /// error fails the build.
    fn on_outputs_written(
        &self,
        ctx: &BuildContext,
    ) -> impl Future<Output = Result<ExecutionStats, CopyError>> + Send;
}

/// Copies declared targets into the build output
pub struct CopyPlugin {
    config: Config,
    reporter: VerboseReporter,
}

impl CopyPlugin {
    /// Plugin printing its verbose listing to stdout
    pub fn new(config: Config) -> Self {
        Self {
            config,
            reporter: VerboseReporter::stdout(),
        }
    }

    /// Plugin printing its verbose listing to `writer`
    pub fn with_writer(config: Config, writer: impl Write + Send + 'static) -> Self {
        Self {
            config,
            reporter: VerboseReporter::new(writer),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Normalize targets and copy every pair, in order
    ///
    /// Pairs are derived afresh on every call, so repeated builds never see
    /// stale state.
    pub async fn copy_targets(&self, ctx: &BuildContext) -> Result<ExecutionStats, CopyError> {
        let pairs = normalize_targets(
            &self.config.targets,
            self.config.output_folder.as_deref(),
            ctx.output.output_dir(),
        )?;

        let stats = if self.config.verbose {
            let reporter = &self.reporter;
            let on_event = move |event: &ExecutionEvent| reporter.on_event(event);
            execute_pairs(&pairs, &ctx.working_dir, Some(&on_event)).await?
        } else {
            execute_pairs(&pairs, &ctx.working_dir, None).await?
        };

        tracing::info!(
            pairs = stats.completed_pairs,
            files = stats.files_copied,
            bytes = stats.bytes_copied,
            "copied targets"
        );

        Ok(stats)
    }
}

impl BuildPlugin for CopyPlugin {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn on_outputs_written(
        &self,
        ctx: &BuildContext,
    ) -> impl Future<Output = Result<ExecutionStats, CopyError>> + Send {
        self.copy_targets(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BundleOutput, TargetSpec};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn workspace() -> TempDir {
        let dir = TempDir::new().expect("create tempdir");
        fs::create_dir_all(dir.path().join("src/assets")).expect("create assets");
        fs::write(dir.path().join("src/assets/asset-1.js"), b"export default 1;")
            .expect("write asset");
        dir
    }

    fn context(dir: &TempDir) -> BuildContext {
        BuildContext::new(
            BundleOutput::File(PathBuf::from("dist/index.js")),
            dir.path(),
        )
    }

    #[test]
    fn test_plugin_name() {
        assert_eq!(CopyPlugin::new(Config::default()).name(), "copy");
    }

    #[tokio::test]
    async fn test_hook_can_run_repeatedly() {
        let dir = workspace();
        let plugin = CopyPlugin::new(Config {
            targets: TargetSpec::list(["src/assets/asset-1.js"]),
            ..Config::default()
        });
        let ctx = context(&dir);

        let first = plugin.on_outputs_written(&ctx).await.expect("first build");
        fs::remove_dir_all(dir.path().join("dist")).expect("clean dist");
        let second = plugin.on_outputs_written(&ctx).await.expect("second build");

        assert_eq!(first, second);
        assert!(dir.path().join("dist/asset-1.js").exists());
    }

    #[tokio::test]
    async fn test_invalid_target_fails_before_copying() {
        let dir = workspace();
        let plugin = CopyPlugin::new(Config {
            targets: TargetSpec::list(["src/assets/asset-1.js", ".."]),
            ..Config::default()
        });

        let err = plugin
            .on_outputs_written(&context(&dir))
            .await
            .expect_err("nameless target");

        assert!(err.is_config_error());
        assert!(!dir.path().join("dist").exists());
    }

    #[tokio::test]
    async fn test_hook_future_is_send() {
        fn assert_send<T: Send>(_: &T) {}

        let dir = workspace();
        let plugin = CopyPlugin::new(Config::default());
        let ctx = context(&dir);
        let future = plugin.on_outputs_written(&ctx);
        assert_send(&future);
        future.await.expect("empty build");
    }
}
