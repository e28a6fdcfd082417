//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use boardcheck_core::{Circle, Raster};
use boardcheck_io::ImageFormat;
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the running check index, the mode and every
/// failure seen so far.
pub struct RegParams {
    /// Name of the test (e.g., "conncomp")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "conncomp")
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two rasters for exact equality of shape and samples
    pub fn compare_rasters(&mut self, expected: &Raster, actual: &Raster) -> bool {
        self.index += 1;

        if expected.dimensions() != actual.dimensions() || expected.channels() != actual.channels() {
            self.fail(format!(
                "Failure in {}_reg: raster comparison for index {} - shape mismatch \
                 ({:?} {:?} vs {:?} {:?})",
                self.test_name,
                self.index,
                expected.dimensions(),
                expected.channels(),
                actual.dimensions(),
                actual.channels()
            ));
            return false;
        }

        let stride = expected.channels().count();
        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b);
        if let Some(i) = mismatch {
            let px = i / stride;
            let w = expected.width() as usize;
            self.fail(format!(
                "Failure in {}_reg: raster comparison for index {} - sample mismatch at ({}, {})",
                self.test_name,
                self.index,
                px % w,
                px / w
            ));
            return false;
        }

        true
    }

    /// Compare two circle lists
    ///
    /// The lists must have equal length and pair up in order, with each
    /// center coordinate and radius within `delta`.
    pub fn compare_circles(&mut self, expected: &[Circle], actual: &[Circle], delta: f64) -> bool {
        self.index += 1;

        if expected.len() != actual.len() {
            self.fail(format!(
                "Failure in {}_reg: circle comparison for index {} - expected {} circles, got {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len()
            ));
            return false;
        }

        for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
            let worst = (e.cx - a.cx)
                .abs()
                .max((e.cy - a.cy).abs())
                .max((e.radius - a.radius).abs());
            if worst > delta {
                self.fail(format!(
                    "Failure in {}_reg: circle comparison for index {} - circle {}: \
                     expected {:?}, got {:?}, allowed delta = {}",
                    self.test_name, self.index, i, e, a, delta
                ));
                return false;
            }
        }

        true
    }

    /// Write a raster to the regout directory and check it against the
    /// golden file of the same index
    pub fn write_raster_and_check(&mut self, raster: &Raster, format: ImageFormat) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            format.extension()
        );

        boardcheck_io::write_image(raster, &local_path, format).map_err(|e| {
            TestError::ImageWrite {
                path: local_path.clone(),
                message: e.to_string(),
            }
        })?;

        self.check_file(&local_path)
    }

    /// Check a file against its golden counterpart
    ///
    /// In generate mode, copies the file to golden. In compare mode,
    /// compares decoded samples with the golden file; a golden file that
    /// was never generated is reported and skipped. In display mode, does
    /// nothing.
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    eprintln!("Skipped: no golden file {}", golden_path);
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;

                if local_data != golden_data && !Self::same_image_files(local_path, &golden_path) {
                    let msg = format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    );
                    self.fail(msg);
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    fn same_image_files(path1: &str, path2: &str) -> bool {
        match (
            boardcheck_io::read_image(path1),
            boardcheck_io::read_image(path2),
        ) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardcheck_core::Channels;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_rasters() {
        let mut rp = RegParams::new("test");
        let a = Raster::new(4, 4, Channels::Gray).unwrap();
        let mut b = a.clone();
        assert!(rp.compare_rasters(&a, &b));
        b.set_pixel(2, 3, 9).unwrap();
        assert!(!rp.compare_rasters(&a, &b));
        assert!(rp.failures()[0].contains("(2, 3)"));
    }

    #[test]
    fn test_compare_circles() {
        let mut rp = RegParams::new("test");
        let e = [Circle::new(10.0, 10.0, 5.0)];
        assert!(rp.compare_circles(&e, &[Circle::new(10.4, 9.8, 5.3)], 0.5));
        assert!(!rp.compare_circles(&e, &[], 0.5));
        assert!(!rp.compare_circles(&e, &[Circle::new(12.0, 10.0, 5.0)], 0.5));
    }
}
