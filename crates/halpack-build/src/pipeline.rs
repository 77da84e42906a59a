//! Build pipeline state machine.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use halpack_platform::{resolve, McuFamily, TargetOs};
use halpack_toolchain::ToolchainPolicy;

use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::report::BuildReport;
use crate::runner::BuildRunner;

/// Pipeline stages in execution order. A failure at any stage aborts the
/// remaining ones; there are no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildStage {
    Validate,
    Configure,
    Build,
    Test,
    Done,
}

impl std::fmt::Display for BuildStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BuildStage::Validate => "validate",
            BuildStage::Configure => "configure",
            BuildStage::Build => "build",
            BuildStage::Test => "test",
            BuildStage::Done => "done",
        };
        write!(f, "{name}")
    }
}

/// Configure variables for a target OS.
///
/// Windows configures with defaults only; bare-metal targets cannot run
/// tests so the test build is disabled; every other hosted OS builds the
/// tests with the address sanitizer enabled.
pub fn configure_variables(target_os: TargetOs) -> Vec<(String, String)> {
    match target_os {
        TargetOs::Windows => Vec::new(),
        TargetOs::BareMetal => vec![("BUILD_TESTING".to_string(), "OFF".to_string())],
        TargetOs::Linux | TargetOs::MacOs | TargetOs::Other => {
            vec![("ENABLE_ASAN".to_string(), "ON".to_string())]
        }
    }
}

/// Run the full build pipeline:
/// validate -> resolve variant -> configure -> build -> (test) -> report.
pub fn run_build(
    config: &BuildConfig,
    policy: &ToolchainPolicy,
    family: &McuFamily,
    runner: &mut dyn BuildRunner,
) -> Result<BuildReport, BuildError> {
    let start = Instant::now();
    let mut stages = vec![BuildStage::Validate];

    // Stage 1: Configuration validation, before any collaborator call.
    policy.validate(
        config.standard,
        &config.compiler_family,
        &config.compiler_version,
    )?;

    // Stage 2: Variant resolution. An unmatched platform identifier is
    // advisory and falls back to the unconstrained path.
    let (variant, selector) = resolve(
        config.platform.as_deref(),
        config.target_os,
        config.skip_tests,
        family,
    );

    // Stage 3: Configure.
    stages.push(BuildStage::Configure);
    let variables = configure_variables(variant.target_os);
    let code = runner.configure(&variables)?;
    if code != 0 {
        return Err(BuildError::BuildFailure {
            stage: "configure".to_string(),
            code,
        });
    }

    // Stage 4: Build.
    stages.push(BuildStage::Build);
    let code = runner.build()?;
    if code != 0 {
        return Err(BuildError::BuildFailure {
            stage: "build".to_string(),
            code,
        });
    }

    // Stage 5: Test, only on hosted targets that did not skip it.
    let tests_run = variant.test_enabled;
    if tests_run {
        stages.push(BuildStage::Test);
        let code = runner.run_test()?;
        if code != 0 {
            return Err(BuildError::TestFailure { code });
        }
    }

    stages.push(BuildStage::Done);
    Ok(BuildReport {
        variant,
        selector,
        configure_variables: variables,
        stages,
        tests_run,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records collaborator calls and plays back scripted exit codes.
    #[derive(Default)]
    struct RecordingRunner {
        calls: Vec<String>,
        configured_with: Vec<(String, String)>,
        configure_code: i32,
        build_code: i32,
        test_code: i32,
    }

    impl BuildRunner for RecordingRunner {
        fn configure(&mut self, variables: &[(String, String)]) -> Result<i32, BuildError> {
            self.calls.push("configure".to_string());
            self.configured_with = variables.to_vec();
            Ok(self.configure_code)
        }

        fn build(&mut self) -> Result<i32, BuildError> {
            self.calls.push("build".to_string());
            Ok(self.build_code)
        }

        fn run_test(&mut self) -> Result<i32, BuildError> {
            self.calls.push("test".to_string());
            Ok(self.test_code)
        }
    }

    fn family() -> McuFamily {
        McuFamily::stm32f1()
    }

    #[test]
    fn bare_metal_part_skips_tests_and_selects_script() {
        let config = BuildConfig {
            target_os: TargetOs::BareMetal,
            platform: Some("stm32f103c8".to_string()),
            ..BuildConfig::hosted_linux()
        };
        let mut runner = RecordingRunner::default();

        let report = run_build(
            &config,
            &ToolchainPolicy::libhal_cxx20(),
            &family(),
            &mut runner,
        )
        .unwrap();

        assert_eq!(runner.calls, vec!["configure", "build"]);
        assert_eq!(
            runner.configured_with,
            vec![("BUILD_TESTING".to_string(), "OFF".to_string())]
        );
        assert!(!report.tests_run);
        assert_eq!(report.selector.unwrap().as_str(), "stm32f10xx8");
        assert_eq!(*report.stages.last().unwrap(), BuildStage::Done);
    }

    #[test]
    fn hosted_linux_runs_tests_with_sanitizer() {
        let config = BuildConfig::hosted_linux();
        let mut runner = RecordingRunner::default();

        let report = run_build(
            &config,
            &ToolchainPolicy::libhal_cxx20(),
            &family(),
            &mut runner,
        )
        .unwrap();

        assert_eq!(runner.calls, vec!["configure", "build", "test"]);
        assert_eq!(
            runner.configured_with,
            vec![("ENABLE_ASAN".to_string(), "ON".to_string())]
        );
        assert!(report.tests_run);
        assert!(report.selector.is_none());
    }

    #[test]
    fn windows_configures_with_defaults_only() {
        let config = BuildConfig {
            target_os: TargetOs::Windows,
            ..BuildConfig::hosted_linux()
        };
        let mut runner = RecordingRunner::default();

        run_build(
            &config,
            &ToolchainPolicy::libhal_cxx20(),
            &family(),
            &mut runner,
        )
        .unwrap();

        assert!(runner.configured_with.is_empty());
    }

    #[test]
    fn old_compiler_fails_before_any_collaborator_call() {
        let config = BuildConfig {
            compiler_version: "9".to_string(),
            ..BuildConfig::hosted_linux()
        };
        let mut runner = RecordingRunner::default();

        let err = run_build(
            &config,
            &ToolchainPolicy::libhal_cxx20(),
            &family(),
            &mut runner,
        )
        .unwrap_err();

        assert!(matches!(err, BuildError::Toolchain(_)));
        assert!(runner.calls.is_empty());
    }

    #[test]
    fn nonzero_build_status_aborts_before_tests() {
        let config = BuildConfig::hosted_linux();
        let mut runner = RecordingRunner {
            build_code: 2,
            ..RecordingRunner::default()
        };

        let err = run_build(
            &config,
            &ToolchainPolicy::libhal_cxx20(),
            &family(),
            &mut runner,
        )
        .unwrap_err();

        assert!(matches!(err, BuildError::BuildFailure { code: 2, .. }));
        assert_eq!(runner.calls, vec!["configure", "build"]);
    }

    #[test]
    fn nonzero_test_status_is_a_test_failure() {
        let config = BuildConfig::hosted_linux();
        let mut runner = RecordingRunner {
            test_code: 1,
            ..RecordingRunner::default()
        };

        let err = run_build(
            &config,
            &ToolchainPolicy::libhal_cxx20(),
            &family(),
            &mut runner,
        )
        .unwrap_err();

        assert!(matches!(err, BuildError::TestFailure { code: 1 }));
    }

    #[test]
    fn skip_tests_flag_goes_straight_to_done() {
        let config = BuildConfig {
            skip_tests: true,
            ..BuildConfig::hosted_linux()
        };
        let mut runner = RecordingRunner {
            test_code: 1, // would fail if it ran
            ..RecordingRunner::default()
        };

        let report = run_build(
            &config,
            &ToolchainPolicy::libhal_cxx20(),
            &family(),
            &mut runner,
        )
        .unwrap();

        assert_eq!(runner.calls, vec!["configure", "build"]);
        assert!(!report.tests_run);
    }

    #[test]
    fn nonzero_configure_status_is_a_build_failure() {
        let config = BuildConfig::hosted_linux();
        let mut runner = RecordingRunner {
            configure_code: 1,
            ..RecordingRunner::default()
        };

        let err = run_build(
            &config,
            &ToolchainPolicy::libhal_cxx20(),
            &family(),
            &mut runner,
        )
        .unwrap_err();

        assert!(matches!(err, BuildError::BuildFailure { code: 1, .. }));
        assert_eq!(runner.calls, vec!["configure"]);
    }
}
