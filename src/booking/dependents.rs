//! Which child a booking request is for

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::guardian::Dependent,
};

/// Pick the dependent a request refers to.
///
/// With a name, the earliest-created dependent whose name contains it
/// (case-insensitive) is chosen; no match is an error even when the guardian
/// has other dependents. Without a name, the earliest-created dependent is
/// used.
pub fn choose_dependent<'a>(
    guardian_id: Uuid,
    dependents: &'a [Dependent],
    name: Option<&str>,
) -> AppResult<&'a Dependent> {
    if dependents.is_empty() {
        return Err(AppError::NoDependentFound(guardian_id));
    }

    let earliest = |candidates: Vec<&'a Dependent>| {
        candidates
            .into_iter()
            .min_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
    };

    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(wanted) => {
            let needle = wanted.to_lowercase();
            let matches: Vec<&'a Dependent> = dependents
                .iter()
                .filter(|d| d.name.to_lowercase().contains(&needle))
                .collect();
            earliest(matches).ok_or_else(|| AppError::NoMatchingDependent(wanted.to_string()))
        }
        None => earliest(dependents.iter().collect())
            .ok_or(AppError::NoDependentFound(guardian_id)),
    }
}
