//! Integration tests for the native library bootstrap policy
//!
//! These tests verify that:
//! - A missing optional library produces exactly one diagnostic line
//! - A missing mandatory library aborts without any diagnostic
//! - The outcome does not depend on anything but library availability
//! - A clean load stays quiet at the default info level

use ncine_platform::{
    Bootstrap, BootstrapConfig, LibraryLoadOutcome, LibraryLoader, LibraryRole, LibrarySpec,
    OptionalLibrary, PlatformError,
};
use std::io::Write;
use std::sync::{Arc, Mutex};

struct FakeLoader {
    available: Vec<String>,
}

impl FakeLoader {
    fn with(roles: &[LibraryRole]) -> Self {
        let names = BootstrapConfig::default().libraries;
        let available = roles
            .iter()
            .map(|role| match role {
                LibraryRole::AudioBackend => {
                    LibrarySpec::new(*role, names.audio_backend.clone()).file_name()
                }
                LibraryRole::Engine => LibrarySpec::new(*role, names.engine.clone()).file_name(),
            })
            .collect();
        Self { available }
    }
}

impl LibraryLoader for FakeLoader {
    type Handle = ();

    fn load(&self, file_name: &str) -> Result<(), String> {
        if self.available.iter().any(|name| name == file_name) {
            Ok(())
        } else {
            Err(format!("dlopen failed: library \"{}\" not found", file_name))
        }
    }
}

#[derive(Clone, Default)]
struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedOutput {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

type Captured = (Result<Vec<LibraryLoadOutcome>, PlatformError>, Vec<String>);

/// Run the bootstrap while capturing warn-level diagnostics
fn run_captured(loader: &FakeLoader, optional: OptionalLibrary) -> Captured {
    run_captured_at(loader, optional, tracing::Level::WARN)
}

fn run_captured_at(
    loader: &FakeLoader,
    optional: OptionalLibrary,
    level: tracing::Level,
) -> Captured {
    let output = CapturedOutput::default();
    let writer = output.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_max_level(level)
        .finish();

    let mut config = BootstrapConfig::default();
    config.libraries.optional = optional;

    let result = tracing::subscriber::with_default(subscriber, || {
        Bootstrap::run(loader, &config.libraries).map(|bootstrap| {
            bootstrap
                .report()
                .entries()
                .iter()
                .map(|(_, outcome)| outcome.clone())
                .collect()
        })
    });

    (result, output.lines())
}

#[test]
fn test_missing_audio_logs_one_line_and_continues() {
    let loader = FakeLoader::with(&[LibraryRole::Engine]);
    let (result, lines) = run_captured(&loader, OptionalLibrary::AudioBackend);

    let outcomes = result.unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(matches!(
        outcomes[0],
        LibraryLoadOutcome::MissingOptional { .. }
    ));
    assert_eq!(outcomes[1], LibraryLoadOutcome::Loaded);

    assert_eq!(lines.len(), 1, "expected one diagnostic, got {:?}", lines);
    assert!(lines[0].contains("WARN"));
    assert!(lines[0].contains("openal"));
    assert!(lines[0].contains("not found"));
}

#[test]
fn test_missing_engine_under_engine_policy_logs_and_continues() {
    let loader = FakeLoader::with(&[LibraryRole::AudioBackend]);
    let (result, lines) = run_captured(&loader, OptionalLibrary::Engine);

    let outcomes = result.unwrap();
    assert_eq!(outcomes[0], LibraryLoadOutcome::Loaded);
    assert!(matches!(
        outcomes[1],
        LibraryLoadOutcome::MissingOptional { .. }
    ));
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("ncine"));
}

#[test]
fn test_missing_mandatory_engine_aborts_silently() {
    let loader = FakeLoader::with(&[LibraryRole::AudioBackend]);
    let (result, lines) = run_captured(&loader, OptionalLibrary::AudioBackend);

    let err = result.unwrap_err();
    assert!(matches!(err, PlatformError::LibraryLoad { ref library, .. } if library == "ncine"));
    assert!(err.to_string().contains("not found"));
    assert!(lines.is_empty(), "unexpected diagnostics: {:?}", lines);
}

#[test]
fn test_optional_failure_then_mandatory_failure_aborts() {
    let loader = FakeLoader::with(&[]);
    let (result, lines) = run_captured(&loader, OptionalLibrary::AudioBackend);

    assert!(result.is_err());
    // Only the tolerated audio failure is reported before the abort
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("openal"));
}

#[test]
fn test_outcome_is_identical_across_runs() {
    for roles in [
        vec![],
        vec![LibraryRole::AudioBackend],
        vec![LibraryRole::Engine],
        vec![LibraryRole::AudioBackend, LibraryRole::Engine],
    ] {
        for policy in [OptionalLibrary::AudioBackend, OptionalLibrary::Engine] {
            let first = run_captured(&FakeLoader::with(&roles), policy);
            let second = run_captured(&FakeLoader::with(&roles), policy);
            assert_eq!(first, second, "roles {:?}, policy {:?}", roles, policy);
        }
    }
}

#[test]
fn test_clean_load_is_quiet_at_info_level() {
    let loader = FakeLoader::with(&[LibraryRole::AudioBackend, LibraryRole::Engine]);
    let policy = OptionalLibrary::AudioBackend;
    let (result, lines) = run_captured_at(&loader, policy, tracing::Level::INFO);

    assert_eq!(result.unwrap(), vec![LibraryLoadOutcome::Loaded; 2]);
    assert!(lines.is_empty(), "unexpected diagnostics: {:?}", lines);

    let (_, lines) = run_captured_at(&loader, policy, tracing::Level::DEBUG);
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.contains("DEBUG")));
}
