use crate::domain::odds::{american_implied_probability, OutcomeQuote};
use serde::{Deserialize, Serialize};

/// Standings and injury context for one team. Missing feeds degrade to the
/// neutral default rather than blocking pick generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamContext {
    pub win_pct: f64,
    pub injuries: u32,
}

impl Default for TeamContext {
    fn default() -> Self {
        TeamContext {
            win_pct: 0.5,
            injuries: 0,
        }
    }
}

/// Confidence scoring variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringVariant {
    /// Odds-only formulas
    Simple,
    /// Odds blended with standings and injury context
    Enhanced,
}

impl Default for ScoringVariant {
    fn default() -> Self {
        ScoringVariant::Enhanced
    }
}

/// How the spread side is chosen relative to the moneyline pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadStrategy {
    /// Take the moneyline favorite's side when it is laying points,
    /// otherwise take the other side
    Aligned,
    /// Take the side with the smaller absolute price, favorite on ties
    Price,
}

impl Default for SpreadStrategy {
    fn default() -> Self {
        SpreadStrategy::Aligned
    }
}

fn clamp_round(value: f64, floor: f64, ceil: f64) -> u8 {
    value.clamp(floor, ceil).round() as u8
}

/// Moneyline confidence from the implied-probability edge alone
pub fn moneyline_confidence_simple(edge: f64) -> u8 {
    clamp_round(50.0 + edge * 100.0, 50.0, 95.0)
}

/// Moneyline confidence blending edge, win-percentage gap, and an injury
/// penalty capped at 8 points
pub fn moneyline_confidence_enhanced(edge: f64, pick: TeamContext, opponent: TeamContext) -> u8 {
    let injury_adjustment = (-0.02 * pick.injuries as f64).max(-0.08);
    let raw = 55.0 + edge * 80.0 + (pick.win_pct - opponent.win_pct) * 15.0
        + injury_adjustment * 100.0;
    clamp_round(raw, 55.0, 95.0)
}

pub fn spread_confidence_simple(edge: f64) -> u8 {
    clamp_round(45.0 + edge * 80.0, 45.0, 95.0)
}

/// Enhanced spread confidence, capped below the game's moneyline confidence
/// so a derivative market never outranks its source
pub fn spread_confidence_enhanced(
    edge: f64,
    price_edge: f64,
    point_edge: f64,
    ml_confidence: u8,
    cap_margin: u8,
) -> u8 {
    let raw = clamp_round(
        55.0 + edge * 60.0 + price_edge * 8.0 + point_edge * 3.0,
        55.0,
        95.0,
    );
    raw.min(ml_confidence.saturating_sub(cap_margin))
}

pub fn totals_confidence(p_over: f64, p_under: f64) -> u8 {
    clamp_round(40.0 + (p_over - p_under).abs() * 100.0, 40.0, 95.0)
}

pub fn prop_confidence(gap: f64) -> u8 {
    clamp_round(50.0 + gap.abs() * 100.0, 50.0, 95.0)
}

/// Pick a spread side given both quotes, returning (picked, opposite).
/// `favorite` is the moneyline favorite's spread quote.
pub fn choose_spread_side<'a>(
    favorite: &'a OutcomeQuote,
    underdog: &'a OutcomeQuote,
    strategy: SpreadStrategy,
) -> (&'a OutcomeQuote, &'a OutcomeQuote) {
    match strategy {
        SpreadStrategy::Aligned => {
            if favorite.point.unwrap_or(0.0) < 0.0 {
                (favorite, underdog)
            } else {
                (underdog, favorite)
            }
        }
        SpreadStrategy::Price => {
            if underdog.price.abs() < favorite.price.abs() {
                (underdog, favorite)
            } else {
                (favorite, underdog)
            }
        }
    }
}

/// Absolute implied-probability gap between two quoted prices
pub fn price_gap(a: f64, b: f64) -> f64 {
    (american_implied_probability(a) - american_implied_probability(b)).abs()
}
