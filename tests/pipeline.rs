use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;

use highway::errors::HighwayError;
use highway::exec::TaskOutcome;
use highway::project::BuildError;
use highway_test_utils::builders::HarnessBuilder;
use highway_test_utils::fake_build::FakeBuildSystem;
use highway_test_utils::fake_executor::FakeExecutor;
use highway_test_utils::fake_resolver::FakeResolver;
use highway_test_utils::init_tracing;

const BUNDLE: &str = "/work/app/_highway";
const BIN_DIR: &str = "/work/app/_highway/target/debug";

fn plugin_path() -> PathBuf {
    PathBuf::from(format!(
        "{BIN_DIR}/_highway{}",
        std::env::consts::EXE_SUFFIX
    ))
}

#[test]
fn returns_captured_bytes_exactly() {
    init_tracing();
    let output = b"  line one\n\x00\xfe\nline two  \n".to_vec();
    let harness = HarnessBuilder::new(BUNDLE)
        .with_file(plugin_path())
        .executor({
            let output = output.clone();
            move |executed| FakeExecutor::new(executed).respond(TaskOutcome::Success, output)
        })
        .build(FakeBuildSystem::succeeding(BIN_DIR));

    let result = harness
        .tool
        .build_then_execute(["deploy", "--dry-run"])
        .unwrap();

    assert_eq!(result.output.as_bytes(), output.as_slice());
    assert_eq!(result.build.executable, plugin_path());
    assert_eq!(result.build.artifact.bin_dir(), Path::new(BIN_DIR));
}

#[test]
fn launches_from_bundle_parent_with_given_arguments() {
    init_tracing();
    let harness = HarnessBuilder::new(BUNDLE)
        .with_file(plugin_path())
        .build(FakeBuildSystem::succeeding(BIN_DIR));

    let result = harness.tool.build_then_execute(["a", "b c"]).unwrap();
    assert!(result.output.is_empty());

    let executed = harness.executed();
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].executable, plugin_path());
    assert_eq!(executed[0].arguments, vec!["a".to_string(), "b c".to_string()]);
    assert_eq!(executed[0].current_dir, Path::new("/work/app"));
}

#[test]
fn non_zero_exit_is_execution_failed_with_code() {
    init_tracing();
    let harness = HarnessBuilder::new(BUNDLE)
        .with_file(plugin_path())
        .executor(|executed| {
            FakeExecutor::new(executed).respond(TaskOutcome::Failed(7), b"partial output".to_vec())
        })
        .build(FakeBuildSystem::succeeding(BIN_DIR));

    match harness.tool.build_then_execute(["x"]) {
        Err(HighwayError::ExecutionFailed {
            executable,
            outcome,
        }) => {
            assert_eq!(executable, plugin_path());
            assert_eq!(outcome, TaskOutcome::Failed(7));
        }
        other => panic!("expected ExecutionFailed, got {other:?}"),
    }
}

#[test]
fn launch_failure_is_execution_failed() {
    init_tracing();
    let harness = HarnessBuilder::new(BUNDLE)
        .with_file(plugin_path())
        .executor(|executed| {
            FakeExecutor::new(executed)
                .respond(TaskOutcome::LaunchFailed("permission denied".into()), Vec::new())
        })
        .build(FakeBuildSystem::succeeding(BIN_DIR));

    let err = harness.tool.build_then_execute(["x"]).unwrap_err();
    assert!(matches!(
        err,
        HighwayError::ExecutionFailed {
            outcome: TaskOutcome::LaunchFailed(_),
            ..
        }
    ));
}

#[test]
fn build_failure_never_launches() {
    init_tracing();
    let compiler = FakeBuildSystem::failing(101);
    let calls = compiler.calls();
    let harness = HarnessBuilder::new(BUNDLE)
        .with_file(plugin_path())
        .build(compiler);

    let err = harness.tool.build_then_execute(["x"]).unwrap_err();

    match err {
        HighwayError::BuildFailed(erased) => match erased.downcast::<BuildError>() {
            Ok(BuildError::CompileFailed { outcome, manifest, .. }) => {
                assert_eq!(outcome, TaskOutcome::Failed(101));
                assert_eq!(manifest, Path::new(BUNDLE).join("Cargo.toml"));
            }
            other => panic!("expected the original CompileFailed, got {other:?}"),
        },
        other => panic!("expected BuildFailed, got {other:?}"),
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(harness.executed().is_empty());
}

#[test]
fn missing_executable_after_build() {
    init_tracing();
    let harness = HarnessBuilder::new(BUNDLE).build(FakeBuildSystem::succeeding(BIN_DIR));

    match harness.tool.build_then_execute(["x"]) {
        Err(HighwayError::ExecutableMissing(path)) => assert_eq!(path, plugin_path()),
        other => panic!("expected ExecutableMissing, got {other:?}"),
    }
    assert!(harness.executed().is_empty());
}

#[test]
fn unresolvable_executable_is_not_found() {
    init_tracing();
    let harness = HarnessBuilder::new(BUNDLE)
        .with_file(plugin_path())
        .resolver(FakeResolver::default().without(&plugin_path().display().to_string()))
        .build(FakeBuildSystem::succeeding(BIN_DIR));

    let err = harness.tool.build_then_execute(["x"]).unwrap_err();
    assert!(matches!(err, HighwayError::ExecutableNotFound { .. }));
    assert!(harness.executed().is_empty());
}

#[test]
fn build_only_derives_executable() {
    init_tracing();
    let harness = HarnessBuilder::new(BUNDLE).build(FakeBuildSystem::succeeding(BIN_DIR));

    let result = harness.tool.build().unwrap();
    assert_eq!(result.executable, plugin_path());
    assert!(harness.executed().is_empty());
}

#[test]
fn available_operations_decodes_plugin_output() {
    init_tracing();
    let harness = HarnessBuilder::new(BUNDLE)
        .with_file(plugin_path())
        .executor(|executed| {
            FakeExecutor::new(executed).respond(
                TaskOutcome::Success,
                br#"[{"name":"lint","description":"run lint"},{"name":"release","description":"ship it","usage":"release VERSION"}]"#.to_vec(),
            )
        })
        .build(FakeBuildSystem::succeeding(BIN_DIR));

    let ops = harness.tool.available_operations();

    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].name, "lint");
    assert_eq!(ops[1].usage.as_deref(), Some("release VERSION"));
    assert_eq!(
        harness.executed()[0].arguments,
        vec!["listPublicHighwaysAsJSON".to_string()]
    );
}

#[test]
fn available_operations_degrades_on_malformed_output() {
    init_tracing();
    let harness = HarnessBuilder::new(BUNDLE)
        .with_file(plugin_path())
        .executor(|executed| {
            FakeExecutor::new(executed).respond(TaskOutcome::Success, b"[{\"name\":".to_vec())
        })
        .build(FakeBuildSystem::succeeding(BIN_DIR));

    assert!(harness.tool.available_operations().is_empty());
}

#[test]
fn available_operations_degrades_on_build_failure() {
    init_tracing();
    let harness = HarnessBuilder::new(BUNDLE).build(FakeBuildSystem::failing(1));

    assert!(harness.tool.available_operations().is_empty());
    assert!(harness.executed().is_empty());
}

#[test]
fn available_operations_degrades_on_plugin_failure() {
    init_tracing();
    let harness = HarnessBuilder::new(BUNDLE)
        .with_file(plugin_path())
        .executor(|executed| {
            FakeExecutor::new(executed).respond(
                TaskOutcome::Failed(2),
                br#"[{"name":"lint","description":"run lint"}]"#.to_vec(),
            )
        })
        .build(FakeBuildSystem::succeeding(BIN_DIR));

    assert!(harness.tool.available_operations().is_empty());
}

#[test]
fn execute_operation_prepends_operation_name() {
    init_tracing();
    let harness = HarnessBuilder::new(BUNDLE)
        .with_file(plugin_path())
        .executor(|executed| {
            FakeExecutor::new(executed).respond(TaskOutcome::Success, b"ok".to_vec())
        })
        .build(FakeBuildSystem::succeeding(BIN_DIR));

    let out = harness
        .tool
        .execute_operation("release", &["1.2.0".to_string()])
        .unwrap();

    assert_eq!(out.as_bytes(), b"ok");
    assert_eq!(
        harness.executed()[0].arguments,
        vec!["release".to_string(), "1.2.0".to_string()]
    );
}

#[test]
fn each_invocation_builds_and_launches_afresh() {
    init_tracing();
    let compiler = FakeBuildSystem::succeeding(BIN_DIR);
    let calls = compiler.calls();
    let harness = HarnessBuilder::new(BUNDLE)
        .with_file(plugin_path())
        .executor(|executed| {
            FakeExecutor::new(executed)
                .respond(TaskOutcome::Success, b"first".to_vec())
                .respond(TaskOutcome::Success, b"second".to_vec())
        })
        .build(compiler);

    let first = harness.tool.build_then_execute(["a"]).unwrap();
    let second = harness.tool.build_then_execute(["b"]).unwrap();

    assert_eq!(first.output.as_bytes(), b"first");
    assert_eq!(second.output.as_bytes(), b"second");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(harness.executed().len(), 2);
}

#[test]
fn update_goes_through_the_build_system() {
    init_tracing();
    let compiler = FakeBuildSystem::succeeding(BIN_DIR);
    let updates = compiler.updates();
    let harness = HarnessBuilder::new(BUNDLE).build(compiler);

    harness.tool.update().unwrap();

    assert_eq!(updates.load(Ordering::SeqCst), 1);
    assert!(harness.executed().is_empty());
}
