use crate::domain::{names_match, Game, HistoryEntry, PickResult, Record};

/// Grade unchecked history entries against completed games. An entry
/// resolves when its moneyline lock's game is found completed with a
/// decisive winner; everything else stays unchecked for a later pass.
/// Returns how many entries were resolved.
pub fn resolve_results(
    history: &mut [HistoryEntry],
    record: &mut Record,
    completed: &[Game],
) -> usize {
    let mut resolved = 0;

    for entry in history.iter_mut().filter(|e| !e.checked) {
        let Some(lock) = entry.featured.moneyline_lock.as_ref() else {
            continue;
        };

        let finished = completed.iter().find(|g| {
            g.completed
                && names_match(&g.home_team, &lock.home_team)
                && names_match(&g.away_team, &lock.away_team)
        });
        let Some(game) = finished else {
            continue;
        };
        let Some(winner) = game.winner() else {
            continue;
        };

        let result = if names_match(winner, &lock.pick) {
            PickResult::Win
        } else {
            PickResult::Loss
        };
        record.apply(result);
        entry.checked = true;
        entry.result = Some(result);
        resolved += 1;
    }

    resolved
}
