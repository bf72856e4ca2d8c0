use std::fmt;

/// Ordered stages of the emission pipeline, as announced to a [`ProgressReporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loading,
    HuangRhys,
    EnergyGrid,
    PhononSpectralFunction,
    TimeDomain,
    GeneratingFunction,
    OpticalSpectrum,
    Luminescence,
}

impl Stage {
    /// Stages that follow a precomputed Huang-Rhys spectrum.
    pub const SPECTRAL: [Stage; 6] = [
        Stage::EnergyGrid,
        Stage::PhononSpectralFunction,
        Stage::TimeDomain,
        Stage::GeneratingFunction,
        Stage::OpticalSpectrum,
        Stage::Luminescence,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Loading => "Loading inputs",
            Stage::HuangRhys => "Huang-Rhys factors",
            Stage::EnergyGrid => "Energy grid",
            Stage::PhononSpectralFunction => "Phonon spectral function",
            Stage::TimeDomain => "Time-domain spectral function",
            Stage::GeneratingFunction => "Generating function",
            Stage::OpticalSpectrum => "Optical spectral function",
            Stage::Luminescence => "Luminescence lineshape",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub enum Progress {
    /// A run is starting and will announce `stages` stages.
    RunStart { stages: u64 },
    StageStart(Stage),
    StageFinish(Stage),
    RunFinish,

    Message(String),
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

    /// Runs `f` between a start and a finish event for `stage`. The finish event is
    /// only sent when `f` succeeds.
    pub fn stage<T, E>(&self, stage: Stage, f: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        self.report(Progress::StageStart(stage));
        let value = f()?;
        self.report(Progress::StageFinish(stage));
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn stage_wraps_closure_with_start_and_finish_events() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(format!("{event:?}"));
        }));

        let value: Result<u32, ()> = reporter.stage(Stage::EnergyGrid, || Ok(7));
        assert_eq!(value, Ok(7));

        let failed: Result<u32, &str> = reporter.stage(Stage::TimeDomain, || Err("boom"));
        assert_eq!(failed, Err("boom"));

        drop(reporter);
        let events = events.into_inner().unwrap();
        assert_eq!(
            events,
            vec![
                "StageStart(EnergyGrid)",
                "StageFinish(EnergyGrid)",
                "StageStart(TimeDomain)",
            ]
        );
    }

    #[test]
    fn silent_reporter_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::Message("nothing listens".to_string()));
        let value: Result<(), ()> = reporter.stage(Stage::Loading, || Ok(()));
        assert!(value.is_ok());
    }
}
