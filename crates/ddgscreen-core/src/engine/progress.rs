#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    RunsDiscovered { total: u64 },
    RunProcessed { run_name: String },
    Anomaly(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::PhaseStart { name: "Scanning" });
        reporter.report(Progress::PhaseFinish);
    }

    #[test]
    fn reporter_forwards_events_to_callback() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::RunProcessed { run_name } = event {
                seen.lock().unwrap().push(run_name);
            }
        }));

        reporter.report(Progress::RunsDiscovered { total: 2 });
        reporter.report(Progress::RunProcessed {
            run_name: "run_A".to_string(),
        });
        reporter.report(Progress::RunProcessed {
            run_name: "run_B".to_string(),
        });
        drop(reporter);

        assert_eq!(seen.into_inner().unwrap(), vec!["run_A", "run_B"]);
    }
}
