use crate::support::domain::{DifficultyKind, InterventionKind};

/// Maps a spreadsheet kind cell to an intervention kind. Matching is
/// case-insensitive and tolerates hyphens and surrounding whitespace.
pub(crate) fn intervention_kind(raw: &str) -> Option<InterventionKind> {
    match normalize(raw).as_str() {
        "pedagogical" => Some(InterventionKind::Pedagogical),
        "behavioral" => Some(InterventionKind::Behavioral),
        "psychological" => Some(InterventionKind::Psychological),
        "social" => Some(InterventionKind::Social),
        "multidisciplinary" => Some(InterventionKind::Multidisciplinary),
        "other" => Some(InterventionKind::Other),
        _ => None,
    }
}

pub(crate) fn difficulty_kind(raw: &str) -> Option<DifficultyKind> {
    match normalize(raw).as_str() {
        "reading" => Some(DifficultyKind::Reading),
        "writing" => Some(DifficultyKind::Writing),
        "math" => Some(DifficultyKind::Math),
        "attention" => Some(DifficultyKind::Attention),
        "behavioral" => Some(DifficultyKind::Behavioral),
        "emotional" => Some(DifficultyKind::Emotional),
        "social" => Some(DifficultyKind::Social),
        "neuromotor" => Some(DifficultyKind::Neuromotor),
        "primary" => Some(DifficultyKind::Primary),
        "secondary" => Some(DifficultyKind::Secondary),
        "other" => Some(DifficultyKind::Other),
        _ => None,
    }
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('\u{feff}')
        .to_ascii_lowercase()
        .replace(['-', '_', ' '], "")
}
