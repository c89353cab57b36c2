use crate::domain::{FeaturedSelection, MarketKind, Pick, PropPick};
use chrono::Utc;

/// First-seen element with the strictly highest confidence. `max_by_key`
/// keeps the last maximum, which would make ties order-dependent here.
fn stable_max<'a, T>(items: impl Iterator<Item = &'a T>, confidence: fn(&T) -> u8) -> Option<&'a T> {
    let mut best: Option<&T> = None;
    for item in items {
        match best {
            Some(current) if confidence(item) <= confidence(current) => {}
            _ => best = Some(item),
        }
    }
    best
}

/// Pull the featured locks out of a scored slate. Ties keep the earliest
/// pick, so the featured slate is stable for a fixed input order.
pub fn select_featured(picks: &[Pick], props: &[PropPick]) -> FeaturedSelection {
    let lock_for = |market: MarketKind| {
        stable_max(picks.iter().filter(|p| p.market == market), |p| p.confidence).cloned()
    };

    FeaturedSelection {
        moneyline_lock: lock_for(MarketKind::Moneyline),
        spread_lock: lock_for(MarketKind::Spread),
        prop_lock: stable_max(props.iter(), |p| p.confidence)
            .cloned()
            .unwrap_or_else(PropPick::sentinel),
        picks: picks.to_vec(),
        generated_at: Utc::now(),
    }
}
