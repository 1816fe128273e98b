use serde::{Deserialize, Serialize};

/// One logged running session: distance in kilometers, elapsed time in
/// seconds, and a creation-time identifier unique within the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub distance: f64,
    pub time: f64,
}

impl Run {
    pub fn new(id: impl Into<String>, distance: f64, time: f64) -> Self {
        Self {
            id: id.into(),
            distance,
            time,
        }
    }

    /// Seconds per kilometer; lower is faster. Not guaranteed to be finite:
    /// old data files may hold zero-distance records, and those divide to
    /// infinity or NaN. The sorter and formatters handle that case.
    pub fn pace(&self) -> f64 {
        self.time / self.distance
    }
}
