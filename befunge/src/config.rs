//! Run configuration

/// Host-side knobs for a single interpretation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Seed for `?`. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Fail the run with `StepLimitExceeded` after this many steps.
    pub max_steps: Option<u64>,
}

impl RunConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}
