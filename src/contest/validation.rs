use std::collections::HashSet;

use super::store::ContestData;

/// Validate referential integrity of a contest dataset.
/// Returns all validation errors at once (not just the first).
pub fn validate_contest(data: &ContestData) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let step_ids = unique_ids("steps", data.steps.iter().map(|s| s.id), &mut errors);
    let category_ids = unique_ids("categories", data.categories.iter().map(|c| c.id), &mut errors);
    let group_ids = unique_ids("route_groups", data.route_groups.iter().map(|g| g.id), &mut errors);
    let route_ids = unique_ids("routes", data.routes.iter().map(|r| r.id), &mut errors);
    let participant_ids =
        unique_ids("participants", data.participants.iter().map(|p| p.id), &mut errors);
    unique_ids("ascents", data.ascents.iter().map(|a| a.id), &mut errors);

    for (i, group) in data.route_groups.iter().enumerate() {
        if !step_ids.contains(&group.step_id) {
            errors.push(format!(
                "route_groups[{}].step_id: unknown step {}",
                i, group.step_id
            ));
        }
    }

    for (i, route) in data.routes.iter().enumerate() {
        if !group_ids.contains(&route.route_group_id) {
            errors.push(format!(
                "routes[{}].route_group_id: unknown route group {}",
                i, route.route_group_id
            ));
        }
    }

    for (i, participant) in data.participants.iter().enumerate() {
        if !category_ids.contains(&participant.category_id) {
            errors.push(format!(
                "participants[{}].category_id: unknown category {}",
                i, participant.category_id
            ));
        }
    }

    for (i, ascent) in data.ascents.iter().enumerate() {
        if !participant_ids.contains(&ascent.participant_id) {
            errors.push(format!(
                "ascents[{}].participant_id: unknown participant {}",
                i, ascent.participant_id
            ));
        }
        if !route_ids.contains(&ascent.route_id) {
            errors.push(format!(
                "ascents[{}].route_id: unknown route {}",
                i, ascent.route_id
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn unique_ids(
    table: &str,
    ids: impl Iterator<Item = u64>,
    errors: &mut Vec<String>,
) -> HashSet<u64> {
    let mut seen = HashSet::new();
    for (i, id) in ids.enumerate() {
        if !seen.insert(id) {
            errors.push(format!("{}[{}].id: duplicate id {}", table, i, id));
        }
    }
    seen
}
