use crate::domain::{
    choose_spread_side, moneyline_confidence_enhanced, moneyline_confidence_simple, price_gap,
    prop_confidence, spread_confidence_enhanced, spread_confidence_simple, totals_confidence,
    Game, MarketKind, OutcomeQuote, Pick, PropPick, ScoringVariant, Sport, SpreadStrategy,
    TeamContext,
};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Knobs the generator needs from configuration
#[derive(Debug, Clone, Copy)]
pub struct ScoringSettings {
    pub variant: ScoringVariant,
    pub spread_strategy: SpreadStrategy,
    pub spread_cap_margin: u8,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        ScoringSettings {
            variant: ScoringVariant::default(),
            spread_strategy: SpreadStrategy::default(),
            spread_cap_margin: 5,
        }
    }
}

/// Score every two-sided market in the given games. Games without a
/// two-sided moneyline are skipped entirely; spread and totals picks are
/// emitted only where those markets are quoted.
pub fn generate_picks(
    sport: Sport,
    games: &[Game],
    contexts: &HashMap<String, TeamContext>,
    settings: ScoringSettings,
) -> Vec<Pick> {
    let mut picks = Vec::new();

    for game in games {
        let Some((home, away)) = game.moneyline() else {
            continue;
        };

        let p_home = home.implied_probability();
        let p_away = away.implied_probability();
        let edge = (p_home - p_away).abs();

        // higher implied probability wins the moneyline pick, home on ties
        let ml_side = if p_home >= p_away { home } else { away };
        let opponent = if ml_side.name == game.home_team {
            &game.away_team
        } else {
            &game.home_team
        };

        let ml_confidence = match settings.variant {
            ScoringVariant::Simple => moneyline_confidence_simple(edge),
            ScoringVariant::Enhanced => {
                let pick_ctx = contexts.get(&ml_side.name).copied().unwrap_or_default();
                let opp_ctx = contexts.get(opponent).copied().unwrap_or_default();
                moneyline_confidence_enhanced(edge, pick_ctx, opp_ctx)
            }
        };

        picks.push(build_pick(
            sport,
            game,
            MarketKind::Moneyline,
            ml_side,
            ml_confidence,
        ));

        if let Some((home_spread, away_spread)) = game.spreads() {
            let (favorite, underdog) = if ml_side.name == game.home_team {
                (home_spread, away_spread)
            } else {
                (away_spread, home_spread)
            };
            let (side, opposite) =
                choose_spread_side(favorite, underdog, settings.spread_strategy);

            let confidence = match settings.variant {
                ScoringVariant::Simple => spread_confidence_simple(edge),
                ScoringVariant::Enhanced => spread_confidence_enhanced(
                    edge,
                    price_gap(side.price, opposite.price),
                    side.point.unwrap_or(0.0).abs(),
                    ml_confidence,
                    settings.spread_cap_margin,
                ),
            };

            picks.push(build_pick(sport, game, MarketKind::Spread, side, confidence));
        }

        if let Some((over, under)) = game.totals() {
            let p_over = over.implied_probability();
            let p_under = under.implied_probability();
            let side = if p_over >= p_under { over } else { under };

            picks.push(build_pick(
                sport,
                game,
                MarketKind::Total,
                side,
                totals_confidence(p_over, p_under),
            ));
        }
    }

    picks
}

fn build_pick(
    sport: Sport,
    game: &Game,
    market: MarketKind,
    side: &OutcomeQuote,
    confidence: u8,
) -> Pick {
    Pick {
        market,
        sport,
        game: game.matchup(),
        home_team: game.home_team.clone(),
        away_team: game.away_team.clone(),
        pick: side.name.clone(),
        confidence,
        price: side.price,
        point: side.point,
        implied_probability: side.implied_probability(),
        commence_time: game.commence_time,
    }
}

/// Score player prop markets across event-odds responses. Each player
/// needs a two-sided Over/Under quote; the first book quoting a player
/// in a market wins, later duplicates are dropped.
pub fn generate_prop_picks(events: &[Game]) -> Vec<PropPick> {
    let mut props = Vec::new();

    for event in events {
        let label = event.matchup();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for bookmaker in &event.bookmakers {
            for market in &bookmaker.markets {
                if !market.is_player_prop() {
                    continue;
                }

                let mut sides: BTreeMap<&str, (Option<&OutcomeQuote>, Option<&OutcomeQuote>)> =
                    BTreeMap::new();
                for outcome in &market.outcomes {
                    let Some(player) = outcome.description.as_deref() else {
                        continue;
                    };
                    let slot = sides.entry(player).or_default();
                    match outcome.name.as_str() {
                        "Over" => slot.0 = Some(outcome),
                        "Under" => slot.1 = Some(outcome),
                        _ => {}
                    }
                }

                for (player, (over, under)) in sides {
                    let (Some(over), Some(under)) = (over, under) else {
                        continue;
                    };
                    if !seen.insert((market.key.clone(), player.to_string())) {
                        continue;
                    }

                    let gap = over.implied_probability() - under.implied_probability();
                    let side = if gap >= 0.0 { over } else { under };
                    let pick = match side.point {
                        Some(point) => format!("{} {}", side.name, point),
                        None => side.name.clone(),
                    };

                    props.push(PropPick {
                        game: label.clone(),
                        player: player.to_string(),
                        market: market.key.clone(),
                        pick,
                        price: side.price,
                        point: side.point,
                        confidence: prop_confidence(gap),
                    });
                }
            }
        }
    }

    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookmakerQuote, MarketQuote};
    use chrono::Utc;

    fn outcome(name: &str, price: f64, point: Option<f64>) -> OutcomeQuote {
        OutcomeQuote {
            name: name.to_string(),
            price,
            point,
            description: None,
        }
    }

    fn prop_outcome(name: &str, player: &str, price: f64, point: f64) -> OutcomeQuote {
        OutcomeQuote {
            name: name.to_string(),
            price,
            point: Some(point),
            description: Some(player.to_string()),
        }
    }

    fn bears_packers() -> Game {
        Game {
            id: "g1".to_string(),
            sport_key: "americanfootball_nfl".to_string(),
            commence_time: Utc::now(),
            home_team: "Chicago Bears".to_string(),
            away_team: "Green Bay Packers".to_string(),
            completed: false,
            bookmakers: vec![BookmakerQuote {
                key: "draftkings".to_string(),
                title: "DraftKings".to_string(),
                markets: vec![
                    MarketQuote {
                        key: "h2h".to_string(),
                        outcomes: vec![
                            outcome("Chicago Bears", -150.0, None),
                            outcome("Green Bay Packers", 130.0, None),
                        ],
                    },
                    MarketQuote {
                        key: "spreads".to_string(),
                        outcomes: vec![
                            outcome("Chicago Bears", -110.0, Some(-3.5)),
                            outcome("Green Bay Packers", -110.0, Some(3.5)),
                        ],
                    },
                    MarketQuote {
                        key: "totals".to_string(),
                        outcomes: vec![
                            outcome("Over", -115.0, Some(44.5)),
                            outcome("Under", -105.0, Some(44.5)),
                        ],
                    },
                ],
            }],
            scores: None,
        }
    }

    fn simple_settings() -> ScoringSettings {
        ScoringSettings {
            variant: ScoringVariant::Simple,
            spread_strategy: SpreadStrategy::Aligned,
            spread_cap_margin: 5,
        }
    }

    #[test]
    fn full_slate_from_one_game() {
        let games = vec![bears_packers()];
        let picks = generate_picks(Sport::NFL, &games, &HashMap::new(), simple_settings());
        assert_eq!(picks.len(), 3);

        let ml = picks.iter().find(|p| p.market == MarketKind::Moneyline).unwrap();
        assert_eq!(ml.pick, "Chicago Bears");
        assert_eq!(ml.confidence, 67);
        assert!((ml.implied_probability - 0.6).abs() < 1e-9);

        let spread = picks.iter().find(|p| p.market == MarketKind::Spread).unwrap();
        assert_eq!(spread.pick, "Chicago Bears");
        assert_eq!(spread.point, Some(-3.5));

        let total = picks.iter().find(|p| p.market == MarketKind::Total).unwrap();
        assert_eq!(total.pick, "Over");
        assert_eq!(total.point, Some(44.5));
    }

    #[test]
    fn game_without_two_sided_moneyline_is_skipped() {
        let mut game = bears_packers();
        game.bookmakers[0].markets[0].outcomes.pop();
        let picks = generate_picks(Sport::NFL, &[game], &HashMap::new(), simple_settings());
        assert!(picks.is_empty());
    }

    #[test]
    fn no_games_means_no_picks() {
        let picks = generate_picks(Sport::NFL, &[], &HashMap::new(), simple_settings());
        assert!(picks.is_empty());
        assert!(generate_prop_picks(&[]).is_empty());
    }

    #[test]
    fn enhanced_variant_uses_team_context() {
        let games = vec![bears_packers()];
        let mut contexts = HashMap::new();
        contexts.insert(
            "Chicago Bears".to_string(),
            TeamContext {
                win_pct: 0.9,
                injuries: 0,
            },
        );
        contexts.insert(
            "Green Bay Packers".to_string(),
            TeamContext {
                win_pct: 0.2,
                injuries: 0,
            },
        );

        let mut settings = simple_settings();
        settings.variant = ScoringVariant::Enhanced;
        let boosted = generate_picks(Sport::NFL, &games, &contexts, settings);
        let neutral = generate_picks(Sport::NFL, &games, &HashMap::new(), settings);

        let conf = |picks: &[Pick]| {
            picks
                .iter()
                .find(|p| p.market == MarketKind::Moneyline)
                .unwrap()
                .confidence
        };
        assert!(conf(&boosted) > conf(&neutral));
    }

    #[test]
    fn enhanced_spread_sits_below_moneyline() {
        let games = vec![bears_packers()];
        let mut settings = simple_settings();
        settings.variant = ScoringVariant::Enhanced;
        let picks = generate_picks(Sport::NFL, &games, &HashMap::new(), settings);

        let ml = picks.iter().find(|p| p.market == MarketKind::Moneyline).unwrap();
        let spread = picks.iter().find(|p| p.market == MarketKind::Spread).unwrap();
        assert!(spread.confidence <= ml.confidence.saturating_sub(5));
    }

    #[test]
    fn props_pair_over_and_under_per_player() {
        let mut event = bears_packers();
        event.bookmakers[0].markets = vec![MarketQuote {
            key: "player_pass_tds".to_string(),
            outcomes: vec![
                prop_outcome("Over", "Caleb Williams", -140.0, 1.5),
                prop_outcome("Under", "Caleb Williams", 110.0, 1.5),
                // one-sided quote is dropped
                prop_outcome("Over", "Jordan Love", -120.0, 1.5),
            ],
        }];

        let props = generate_prop_picks(&[event]);
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].player, "Caleb Williams");
        assert_eq!(props[0].pick, "Over 1.5");
        assert_eq!(props[0].market, "player_pass_tds");
        assert!(props[0].confidence >= 50);
    }

    #[test]
    fn duplicate_player_quotes_keep_first_book() {
        let mut event = bears_packers();
        let market = MarketQuote {
            key: "player_pass_tds".to_string(),
            outcomes: vec![
                prop_outcome("Over", "Caleb Williams", -140.0, 1.5),
                prop_outcome("Under", "Caleb Williams", 110.0, 1.5),
            ],
        };
        event.bookmakers[0].markets = vec![market.clone()];
        event.bookmakers.push(BookmakerQuote {
            key: "fanduel".to_string(),
            title: "FanDuel".to_string(),
            markets: vec![market],
        });

        let props = generate_prop_picks(&[event]);
        assert_eq!(props.len(), 1);
    }
}
