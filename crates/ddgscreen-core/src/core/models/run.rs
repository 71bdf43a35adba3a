use std::collections::HashMap;

/// Energy samples collected from a single screening run.
///
/// A `RunResult` is immutable once built. Mutation tags keep the order in which they were first
/// seen in the result file, so records derived from the run are emitted deterministically.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunResult {
    run_name: String,
    baseline: Vec<f64>,
    mutants: Vec<(String, Vec<f64>)>,
}

impl RunResult {
    pub fn run_name(&self) -> &str {
        &self.run_name
    }

    pub fn baseline(&self) -> &[f64] {
        &self.baseline
    }

    pub fn has_baseline(&self) -> bool {
        !self.baseline.is_empty()
    }

    /// Iterates over `(tag, samples)` pairs in first-seen order.
    pub fn mutants(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.mutants
            .iter()
            .map(|(tag, samples)| (tag.as_str(), samples.as_slice()))
    }

    pub fn mutant(&self, tag: &str) -> Option<&[f64]> {
        self.mutants
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, samples)| samples.as_slice())
    }

    pub fn mutation_count(&self) -> usize {
        self.mutants.len()
    }
}

/// Accumulates samples while a result file is being read.
#[derive(Debug, Default)]
pub struct RunResultBuilder {
    run_name: String,
    baseline: Vec<f64>,
    mutants: Vec<(String, Vec<f64>)>,
    tag_index: HashMap<String, usize>,
}

impl RunResultBuilder {
    pub fn new(run_name: impl Into<String>) -> Self {
        Self {
            run_name: run_name.into(),
            ..Self::default()
        }
    }

    pub fn add_baseline(&mut self, value: f64) -> &mut Self {
        self.baseline.push(value);
        self
    }

    pub fn add_mutant(&mut self, tag: &str, value: f64) -> &mut Self {
        let idx = match self.tag_index.get(tag) {
            Some(&idx) => idx,
            None => {
                let idx = self.mutants.len();
                self.mutants.push((tag.to_string(), Vec::new()));
                self.tag_index.insert(tag.to_string(), idx);
                idx
            }
        };
        self.mutants[idx].1.push(value);
        self
    }

    pub fn build(self) -> RunResult {
        RunResult {
            run_name: self.run_name,
            baseline: self.baseline,
            mutants: self.mutants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_groups_mutant_samples_by_tag() {
        let mut builder = RunResultBuilder::new("run_A");
        builder
            .add_mutant("X10S", -6.5)
            .add_baseline(-5.0)
            .add_mutant("Y20T", -3.0)
            .add_mutant("X10S", -6.1);
        let run = builder.build();

        assert_eq!(run.run_name(), "run_A");
        assert_eq!(run.baseline(), &[-5.0]);
        assert_eq!(run.mutant("X10S"), Some(&[-6.5, -6.1][..]));
        assert_eq!(run.mutant("Y20T"), Some(&[-3.0][..]));
        assert_eq!(run.mutant("Z30A"), None);
        assert_eq!(run.mutation_count(), 2);
    }

    #[test]
    fn mutation_tags_keep_first_seen_order() {
        let mut builder = RunResultBuilder::new("run_B");
        builder
            .add_mutant("B2", 1.0)
            .add_mutant("A1", 1.0)
            .add_mutant("B2", 2.0)
            .add_mutant("C3", 1.0);
        let run = builder.build();

        let tags: Vec<&str> = run.mutants().map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec!["B2", "A1", "C3"]);
    }

    #[test]
    fn empty_builder_yields_run_without_baseline() {
        let run = RunResultBuilder::new("run_empty").build();
        assert!(!run.has_baseline());
        assert_eq!(run.mutation_count(), 0);
    }
}
