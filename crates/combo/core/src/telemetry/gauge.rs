//! Job resource gauges.
//!
//! Each job exposes its own structured gauge. Rules ask for the concrete gauge
//! type they understand through [`Gauge`]; asking for another job's gauge is a
//! programming error.

use crate::{ActionId, Job};

/// Gauge snapshot for whatever job the player is currently on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum JobGauge {
    /// Job without a gauge the engine reads.
    #[default]
    None,
    Bard(BardGauge),
    Dancer(DancerGauge),
}

impl JobGauge {
    /// Job this gauge belongs to.
    pub const fn job(&self) -> Option<Job> {
        match self {
            Self::None => None,
            Self::Bard(_) => Some(Job::Bard),
            Self::Dancer(_) => Some(Job::Dancer),
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A concrete gauge type bound to one job.
pub trait Gauge: Copy {
    /// Job that owns this gauge.
    const JOB: Job;

    /// Extracts this gauge from a job-agnostic snapshot.
    fn from_job_gauge(gauge: &JobGauge) -> Option<Self>;
}

/// Song currently played by a bard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Song {
    #[default]
    None,
    MagesBallad,
    ArmysPaeon,
    WanderersMinuet,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BardGauge {
    pub song: Song,
    /// Remaining song time in milliseconds.
    pub song_timer: u16,
    /// Soul Voice, 0..=100.
    pub soul_voice: u8,
    pub repertoire: u8,
}

impl Gauge for BardGauge {
    const JOB: Job = Job::Bard;

    fn from_job_gauge(gauge: &JobGauge) -> Option<Self> {
        match gauge {
            JobGauge::Bard(inner) => Some(*inner),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DancerGauge {
    /// True while a Standard or Technical Step is in progress.
    pub dancing: bool,
    /// Steps already performed in the current dance.
    pub completed_steps: u8,
    /// Step the game expects next.
    pub next_step: ActionId,
    pub feathers: u8,
    pub esprit: u8,
}

impl Default for DancerGauge {
    fn default() -> Self {
        Self {
            dancing: false,
            completed_steps: 0,
            next_step: ActionId(0),
            feathers: 0,
            esprit: 0,
        }
    }
}

impl Gauge for DancerGauge {
    const JOB: Job = Job::Dancer;

    fn from_job_gauge(gauge: &JobGauge) -> Option<Self> {
        match gauge {
            JobGauge::Dancer(inner) => Some(*inner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_is_job_checked() {
        let gauge = JobGauge::Bard(BardGauge {
            song: Song::WanderersMinuet,
            ..BardGauge::default()
        });

        assert_eq!(gauge.job(), Some(Job::Bard));
        assert!(BardGauge::from_job_gauge(&gauge).is_some());
        assert!(DancerGauge::from_job_gauge(&gauge).is_none());
        assert!(DancerGauge::from_job_gauge(&JobGauge::None).is_none());
    }
}
