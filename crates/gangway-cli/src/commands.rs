//! Command execution.

use std::sync::Arc;

use gangway_bundler::{
    BuildMode, BuildOrchestrator, ImportMapExternals, NodeIntrospector, ProcessEngine, ScratchDir,
};

use crate::cli::BuildArgs;
use crate::config::CliConfig;
use crate::error::Result;

/// Execute the `build` command.
pub async fn build_execute(args: BuildArgs) -> Result<()> {
    let config = CliConfig::load(&args.project_dir, args.config.as_deref())?;

    let mut build = config.build;
    if args.report {
        build.report = true;
    }

    let mode = args
        .mode
        .map(BuildMode::from)
        .unwrap_or_else(BuildMode::from_env);

    let output_dir = if build.output.is_absolute() {
        build.output.clone()
    } else {
        args.project_dir.join(&build.output)
    };
    let scratch = ScratchDir::new(output_dir.join(".gangway"))?;

    let engine = ProcessEngine::new(args.engine.as_str()).config_dir(scratch.root().to_path_buf());
    let orchestrator = BuildOrchestrator::new(
        Arc::new(engine),
        Arc::new(NodeIntrospector::new(&args.project_dir)),
        Arc::new(ImportMapExternals),
        scratch,
    );

    tracing::info!(
        project = %args.project_dir.display(),
        mode = %mode,
        "starting ESM bundling"
    );

    let elapsed = orchestrator
        .run(&args.project_dir, &build, &config.transpile, mode)
        .await?;

    tracing::debug!(elapsed_secs = elapsed.as_secs(), "bundling finished");
    Ok(())
}
