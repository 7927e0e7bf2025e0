//! Runs generators over their variants and writes the results.
//!
//! Every variant is independent: a failure is logged and recorded, and the
//! [`FailurePolicy`] decides whether the remaining variants still run.
//! Configuration errors always stop the run.

use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::config::Configuration;
use crate::error::{DriverError, GeneratorError};
use crate::kicad::LibraryWriter;
use crate::series::{all_generators, FootprintGenerator, Variant};

/// What to do after a footprint fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and carry on with the next variant.
    #[default]
    Continue,
    /// Stop at the first failure.
    Abort,
}

/// A footprint that could not be produced.
#[derive(Debug)]
pub struct Failure {
    /// Generator name.
    pub generator: &'static str,
    /// The variant that failed.
    pub variant: Variant,
    /// Why it failed.
    pub error: GeneratorError,
}

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Files written, in generation order.
    pub written: Vec<PathBuf>,
    /// Variants that failed.
    pub failures: Vec<Failure>,
    /// Set when [`FailurePolicy::Abort`] or a configuration error cut the
    /// run short.
    pub aborted: bool,
}

impl RunReport {
    /// Returns `true` if every attempted footprint was written.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Picks generators by name, or all of them when `names` is empty.
///
/// # Errors
///
/// Returns [`DriverError::UnknownSeries`] for the first name that matches no
/// generator.
pub fn select_generators(names: &[String]) -> Result<Vec<Box<dyn FootprintGenerator>>, DriverError> {
    let generators = all_generators();
    if names.is_empty() {
        return Ok(generators);
    }

    if let Some(unknown) = names.iter().find(|n| !generators.iter().any(|g| g.name() == n.as_str())) {
        let known: Vec<_> = generators.iter().map(|g| g.name()).collect();
        return Err(DriverError::UnknownSeries {
            name: unknown.clone(),
            known: known.join(", "),
        });
    }

    Ok(generators
        .into_iter()
        .filter(|g| names.iter().any(|n| n == g.name()))
        .collect())
}

/// Generates and writes footprints.
pub struct Driver<'a> {
    config: &'a Configuration,
    writer: LibraryWriter,
    policy: FailurePolicy,
}

impl<'a> Driver<'a> {
    /// Creates a driver that continues past failures.
    #[must_use]
    pub fn new(config: &'a Configuration, writer: LibraryWriter) -> Self {
        Self {
            config,
            writer,
            policy: FailurePolicy::default(),
        }
    }

    /// Sets the failure policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Generates one footprint and writes it.
    ///
    /// # Errors
    ///
    /// Returns the generator or writer error.
    pub fn run_one(&self, generator: &dyn FootprintGenerator, variant: &Variant) -> Result<PathBuf, GeneratorError> {
        let fp = generator.generate(variant, self.config)?;
        Ok(self.writer.write(&fp)?)
    }

    /// Runs every variant of every generator.
    pub fn run(&self, generators: &[Box<dyn FootprintGenerator>]) -> RunReport {
        let mut report = RunReport::default();

        for generator in generators {
            let variants = generator.variants();
            info!(
                generator = generator.name(),
                variants = variants.len(),
                "Generating series"
            );

            for variant in variants {
                match self.run_one(generator.as_ref(), &variant) {
                    Ok(path) => {
                        debug!(path = %path.display(), "Footprint written");
                        report.written.push(path);
                    }
                    Err(e) => {
                        error!(generator = generator.name(), %variant, error = %e, "Footprint failed");
                        // A configuration error fails every variant the same way.
                        let fatal = matches!(e, GeneratorError::Config(_));
                        report.failures.push(Failure {
                            generator: generator.name(),
                            variant,
                            error: e,
                        });
                        if fatal || self.policy == FailurePolicy::Abort {
                            warn!(configuration = fatal, "Aborting after failure");
                            report.aborted = true;
                            return report;
                        }
                    }
                }
            }
        }

        info!(
            written = report.written.len(),
            failed = report.failures.len(),
            output = %self.writer.root().display(),
            "Generation finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_configuration;
    use crate::footprint::Footprint;
    use crate::series::MolexCGrid;

    /// Succeeds on even pin counts and fails on odd ones.
    struct EvenOnly;

    impl FootprintGenerator for EvenOnly {
        fn name(&self) -> &'static str {
            "even_only"
        }

        fn variants(&self) -> Vec<Variant> {
            (2..=6).map(Variant::pins).collect()
        }

        fn generate(&self, variant: &Variant, _config: &Configuration) -> Result<Footprint, GeneratorError> {
            if variant.pin_count % 2 == 1 {
                return Err(GeneratorError::UnsupportedPinCount {
                    generator: self.name().to_string(),
                    pin_count: variant.pin_count,
                });
            }
            Ok(Footprint::new(format!("Even_{}", variant.pin_count), "Test"))
        }
    }

    /// Fails every variant on a configuration lookup.
    struct NeedsMissingKey;

    impl FootprintGenerator for NeedsMissingKey {
        fn name(&self) -> &'static str {
            "needs_missing_key"
        }

        fn variants(&self) -> Vec<Variant> {
            (2..=6).map(Variant::pins).collect()
        }

        fn generate(&self, _variant: &Variant, config: &Configuration) -> Result<Footprint, GeneratorError> {
            config.courtyard_clearance("no_such_class")?;
            Ok(Footprint::new("Unreachable", "Test"))
        }
    }

    fn generators() -> Vec<Box<dyn FootprintGenerator>> {
        vec![Box::new(EvenOnly)]
    }

    #[test]
    fn continue_policy_runs_everything() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_configuration();
        let driver = Driver::new(&config, LibraryWriter::new(dir.path()).with_timestamp(0));

        let report = driver.run(&generators());
        assert_eq!(report.written.len(), 3);
        assert_eq!(report.failures.len(), 2);
        assert!(!report.aborted);
        assert!(!report.is_success());
        assert!(dir.path().join("Test.pretty/Even_6.kicad_mod").exists());
    }

    #[test]
    fn abort_policy_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_configuration();
        let driver = Driver::new(&config, LibraryWriter::new(dir.path()).with_timestamp(0))
            .with_policy(FailurePolicy::Abort);

        let report = driver.run(&generators());
        assert_eq!(report.written.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].variant.pin_count, 3);
        assert!(report.aborted);
        assert!(!dir.path().join("Test.pretty/Even_4.kicad_mod").exists());
    }

    #[test]
    fn configuration_error_stops_continue_policy() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_configuration();
        let driver = Driver::new(&config, LibraryWriter::new(dir.path()).with_timestamp(0));

        let generators: Vec<Box<dyn FootprintGenerator>> = vec![Box::new(NeedsMissingKey), Box::new(EvenOnly)];
        let report = driver.run(&generators);
        assert!(report.aborted);
        assert_eq!(report.failures.len(), 1);
        assert!(report.written.is_empty());
        assert!(matches!(report.failures[0].error, GeneratorError::Config(_)));
    }

    #[test]
    fn run_one_writes_into_library() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_configuration();
        let driver = Driver::new(&config, LibraryWriter::new(dir.path()).with_timestamp(0));

        let path = driver.run_one(&MolexCGrid::new(), &Variant::pins(8)).unwrap();
        assert!(path.ends_with("Connector_Molex.pretty/Molex_C-Grid_70246-0801_2x04_P2.54mm_Vertical.kicad_mod"));
        assert!(path.exists());
    }

    #[test]
    fn select_by_name() {
        let selected = select_generators(&["molex_cgrid".to_string(), "neutrik_ncj6fah".to_string()]).unwrap();
        let names: Vec<_> = selected.iter().map(|g| g.name()).collect();
        assert_eq!(names, ["molex_cgrid", "neutrik_ncj6fah"]);

        assert_eq!(select_generators(&[]).unwrap().len(), all_generators().len());
    }

    #[test]
    fn unknown_series_is_rejected() {
        let err = select_generators(&["jst_ph".to_string()]).err().unwrap();
        let DriverError::UnknownSeries { name, known } = err;
        assert_eq!(name, "jst_ph");
        assert!(known.contains("molex_sl_top"));
    }
}
