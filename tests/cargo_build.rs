use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use highway::config::BuildSection;
use highway::context::Context;
use highway::errors::HighwayError;
use highway::exec::TaskOutcome;
use highway::fs::mock::MockFileSystem;
use highway::project::{BuildError, BuildSystem, Bundle, CargoBuildSystem, ProjectTool};
use highway_test_utils::builders::ConfigFileBuilder;
use highway_test_utils::fake_executor::{ExecutedTask, FakeExecutor};
use highway_test_utils::fake_resolver::FakeResolver;
use highway_test_utils::init_tracing;

fn context(executor: FakeExecutor, resolver: FakeResolver) -> Context {
    Context::new(
        Arc::new(executor),
        Arc::new(resolver),
        Arc::new(MockFileSystem::new()),
    )
}

fn recorder() -> Arc<Mutex<Vec<ExecutedTask>>> {
    Arc::new(Mutex::new(Vec::new()))
}

#[test]
fn debug_build_invokes_cargo_in_bundle() {
    init_tracing();
    let executed = recorder();
    let ctx = context(
        FakeExecutor::new(Arc::clone(&executed)),
        FakeResolver::new("/toolchain/bin"),
    );
    let bundle = Bundle::new("/repo/_highway", "_highway");

    let artifact = CargoBuildSystem::new(ctx).compile(&bundle).unwrap();

    assert_eq!(artifact.bin_dir(), Path::new("/repo/_highway/target/debug"));
    let executed = executed.lock().unwrap();
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].executable, PathBuf::from("/toolchain/bin/cargo"));
    assert_eq!(executed[0].current_dir, Path::new("/repo/_highway"));
    assert_eq!(
        executed[0].arguments,
        vec![
            "build",
            "--manifest-path",
            "/repo/_highway/Cargo.toml",
            "--target-dir",
            "/repo/_highway/target",
        ]
    );
}

#[test]
fn release_build_with_custom_target_dir() {
    init_tracing();
    let executed = recorder();
    let ctx = context(FakeExecutor::new(Arc::clone(&executed)), FakeResolver::default());
    let section = BuildSection {
        cargo: "cargo".to_string(),
        release: true,
        target_dir: Some(PathBuf::from("/cache/target")),
    };

    let artifact = CargoBuildSystem::from_config(ctx, &section)
        .compile(&Bundle::new("/repo/_highway", "_highway"))
        .unwrap();

    assert_eq!(artifact.bin_dir(), Path::new("/cache/target/release"));
    let args = &executed.lock().unwrap()[0].arguments;
    assert_eq!(args.last().map(String::as_str), Some("--release"));
    assert!(args.contains(&"/cache/target".to_string()));
}

#[test]
fn failing_cargo_is_compile_failed() {
    init_tracing();
    let executed = recorder();
    let ctx = context(
        FakeExecutor::new(Arc::clone(&executed)).respond(TaskOutcome::Failed(101), Vec::new()),
        FakeResolver::default(),
    );

    let err = CargoBuildSystem::new(ctx)
        .compile(&Bundle::new("/repo/_highway", "_highway"))
        .unwrap_err();

    match err {
        BuildError::CompileFailed { outcome, program, .. } => {
            assert_eq!(outcome, TaskOutcome::Failed(101));
            assert_eq!(program, "cargo");
        }
        other => panic!("expected CompileFailed, got {other:?}"),
    }
}

#[test]
fn missing_cargo_is_launch_error() {
    init_tracing();
    let executed = recorder();
    let ctx = context(
        FakeExecutor::new(Arc::clone(&executed)),
        FakeResolver::default().without("cargo"),
    );

    let err = CargoBuildSystem::new(ctx)
        .compile(&Bundle::new("/repo/_highway", "_highway"))
        .unwrap_err();

    assert!(matches!(
        err,
        BuildError::Launch {
            source: HighwayError::ExecutableNotFound { .. },
            ..
        }
    ));
    assert!(executed.lock().unwrap().is_empty());
}

#[test]
fn update_runs_cargo_update_in_bundle() {
    init_tracing();
    let executed = recorder();
    let ctx = context(FakeExecutor::new(Arc::clone(&executed)), FakeResolver::new("/bin"));
    let cfg = ConfigFileBuilder::new().cargo("cargo-nightly").build();

    let tool = ProjectTool::from_config(ctx, &cfg, Path::new("/repo"));
    tool.update().unwrap();

    let executed = executed.lock().unwrap();
    assert_eq!(executed[0].executable, PathBuf::from("/bin/cargo-nightly"));
    assert_eq!(executed[0].arguments, vec!["update".to_string()]);
    assert_eq!(executed[0].current_dir, Path::new("/repo/_highway"));
}

#[test]
fn failed_update_is_execution_failed() {
    init_tracing();
    let ctx = context(
        FakeExecutor::new(recorder()).respond(TaskOutcome::Failed(1), Vec::new()),
        FakeResolver::default(),
    );
    let tool = ProjectTool::from_config(ctx, &ConfigFileBuilder::new().build(), Path::new("/repo"));

    assert!(matches!(
        tool.update(),
        Err(HighwayError::ExecutionFailed { .. })
    ));
}

#[test]
fn capture_command_returns_stdout() {
    init_tracing();
    let ctx = context(
        FakeExecutor::new(recorder()).respond(TaskOutcome::Success, b"v1.4.2\n".to_vec()),
        FakeResolver::default(),
    );

    let out = ctx
        .capture_command("git-autotag", ["-n"], Path::new("/repo"))
        .unwrap();
    assert_eq!(out.as_bytes(), b"v1.4.2\n");
    assert!(ctx.contains_executable("git-autotag"));
}

#[test]
fn run_command_rejects_missing_program() {
    init_tracing();
    let executed = recorder();
    let ctx = context(
        FakeExecutor::new(Arc::clone(&executed)),
        FakeResolver::default().without("fastlane"),
    );

    let err = ctx
        .run_command("fastlane", ["gym"], Path::new("/repo"))
        .unwrap_err();
    assert!(matches!(err, HighwayError::ExecutableNotFound { .. }));
    assert!(!ctx.contains_executable("fastlane"));
    assert!(executed.lock().unwrap().is_empty());
}
