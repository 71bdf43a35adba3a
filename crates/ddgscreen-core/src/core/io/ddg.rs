use crate::core::models::run::{RunResult, RunResultBuilder};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::trace;

const BASELINE_MARKER: &str = "WT:";
const MUTANT_MARKER: &str = "MUT_";

static BASELINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bWT:\s*([+-]?\d+\.\d+)").expect("baseline pattern must compile")
});

static MUTANT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bMUT_(\w+):\s*([+-]?\d+\.\d+)").expect("mutant pattern must compile")
});

#[derive(Debug, Error)]
pub enum DdgFileError {
    #[error("Failed to read result file '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Classification of a single result-file line.
#[derive(Debug, Clone, PartialEq)]
pub enum DdgLine<'a> {
    Baseline(f64),
    Mutant { tag: &'a str, value: f64 },
    Unrecognized,
}

impl<'a> DdgLine<'a> {
    /// Classifies a line against the baseline grammar, then the mutant grammar.
    ///
    /// A line that carries a marker but no capturable energy is `Unrecognized`.
    ///
    /// `WT:` only counts at a word boundary, so `MUT_WT: -2.00` is a mutant sample for tag
    /// `WT`, never a baseline. A baseline marker without a number does not consume the line:
    /// `WT: none MUT_A1G: -2.00` still yields the `A1G` mutant sample.
    pub fn classify(line: &'a str) -> Self {
        if line.contains(BASELINE_MARKER) {
            if let Some(value) = BASELINE_PATTERN
                .captures(line)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
            {
                return DdgLine::Baseline(value);
            }
        }

        if line.contains(MUTANT_MARKER) {
            if let Some(caps) = MUTANT_PATTERN.captures(line) {
                if let (Some(tag), Some(Ok(value))) = (
                    caps.get(1),
                    caps.get(2).map(|m| m.as_str().parse::<f64>()),
                ) {
                    return DdgLine::Mutant {
                        tag: tag.as_str(),
                        value,
                    };
                }
            }
        }

        DdgLine::Unrecognized
    }
}

/// Reader for cartesian ddG result files (`manual_mutation.ddg`).
pub struct DdgFile;

impl DdgFile {
    pub fn read_from(reader: &mut impl BufRead, run_name: &str) -> io::Result<RunResult> {
        let mut builder = RunResultBuilder::new(run_name);

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            match DdgLine::classify(&line) {
                DdgLine::Baseline(value) => {
                    builder.add_baseline(value);
                }
                DdgLine::Mutant { tag, value } => {
                    builder.add_mutant(tag, value);
                }
                DdgLine::Unrecognized => {
                    if line.contains(BASELINE_MARKER) || line.contains(MUTANT_MARKER) {
                        trace!(
                            "Skipping malformed marker line {} in '{}'.",
                            line_num + 1,
                            run_name
                        );
                    }
                }
            }
        }

        Ok(builder.build())
    }

    pub fn read_from_path<P: AsRef<Path>>(
        path: P,
        run_name: &str,
    ) -> Result<RunResult, DdgFileError> {
        let path = path.as_ref();
        let to_error = |source| DdgFileError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(to_error)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, run_name).map_err(to_error)
    }
}
