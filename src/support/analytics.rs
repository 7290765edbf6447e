//! Progress analytics: status tallies, aggregate progress, assessment
//! average, and trend classification for one student.

use serde::Serialize;

use super::domain::{Assessment, Intervention, Student};

/// Minimum half-to-half score movement counted as a real trend.
pub const TREND_DELTA_THRESHOLD: f64 = 0.5;

/// Error raised by [`analyze`].
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("student {0} has no intervention records to analyze")]
    NoInterventions(String),
}

/// Direction of a student's assessment history, comparing the mean score of
/// the earlier half against the later half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl Trend {
    pub const fn label(self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Declining => "declining",
        }
    }
}

/// Intervention tallies by lifecycle state. Anything neither actively
/// running nor completed counts as canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub active: usize,
    pub completed: usize,
    pub canceled: usize,
}

/// Aggregate view of a student's support trajectory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub status_counts: StatusCounts,
    pub overall_progress: f64,
    pub assessment_average: f64,
    pub trend: Trend,
}

/// Summarizes a student's interventions and assessments. Requires at least
/// one intervention record; an empty set is a precondition failure rather
/// than an all-zero summary.
pub fn analyze(
    student: &Student,
    interventions: &[Intervention],
) -> Result<ProgressSummary, AnalysisError> {
    if interventions.is_empty() {
        return Err(AnalysisError::NoInterventions(student.id().0.clone()));
    }

    let active = interventions
        .iter()
        .filter(|intervention| intervention.is_active())
        .count();
    let completed = interventions
        .iter()
        .filter(|intervention| intervention.is_completed())
        .count();
    let status_counts = StatusCounts {
        active,
        completed,
        canceled: interventions.len() - active - completed,
    };

    // Canceled interventions are excluded from the progress aggregate.
    let tracked: Vec<f64> = interventions
        .iter()
        .filter(|intervention| intervention.is_active() || intervention.is_completed())
        .map(|intervention| f64::from(intervention.progress()))
        .collect();
    let overall_progress = mean(&tracked).unwrap_or(0.0);

    let mut assessments: Vec<&Assessment> = student.assessments().iter().collect();
    assessments.sort_by_key(|assessment| assessment.date());
    let scores: Vec<f64> = assessments
        .iter()
        .map(|assessment| assessment.score())
        .collect();
    let assessment_average = mean(&scores).unwrap_or(0.0);

    Ok(ProgressSummary {
        status_counts,
        overall_progress,
        assessment_average,
        trend: classify_trend(&scores),
    })
}

/// Trend over chronologically ordered scores. Fewer than two assessments is
/// stable by definition; otherwise the list splits at the floor of half its
/// length (the earlier half takes the smaller share for odd counts).
fn classify_trend(scores: &[f64]) -> Trend {
    if scores.len() < 2 {
        return Trend::Stable;
    }

    let mid = scores.len() / 2;
    let first_half = mean(&scores[..mid]).unwrap_or(0.0);
    let second_half = mean(&scores[mid..]).unwrap_or(0.0);
    let delta = second_half - first_half;

    if delta > TREND_DELTA_THRESHOLD {
        Trend::Improving
    } else if delta < -TREND_DELTA_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
