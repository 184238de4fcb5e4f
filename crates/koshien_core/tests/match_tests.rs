//! End-to-end match tests driven through the public API.

use koshien_core::prelude::*;
use koshien_test_utils::dice::{ConstantDice, ScriptedDice, HOME_RUN, SINGLE, STRIKEOUT, WALK};
use koshien_test_utils::fixtures::{standard_matchup, standard_team};

const OUT_EVENTS: [&str; 3] = ["strikes out", "grounds out", "flies out"];

fn out_count(events: &[String]) -> usize {
    events
        .iter()
        .filter(|e| OUT_EVENTS.iter().any(|o| e.contains(o)))
        .count()
}

fn scoreless_half() -> Vec<f64> {
    ScriptedDice::plays(&[&STRIKEOUT, &STRIKEOUT, &STRIKEOUT])
}

#[test]
fn test_forced_home_runs_every_inning() {
    // Top: single, two-run homer, three outs. Bottom: three outs.
    let mut script = ScriptedDice::plays(&[&SINGLE, &HOME_RUN, &STRIKEOUT, &STRIKEOUT, &STRIKEOUT]);
    script.extend(scoreless_half());
    let mut dice = ScriptedDice::cycle(script);

    let (home, away) = standard_matchup();
    let result = simulate_match(home, away, MatchConfig::default(), &mut dice).unwrap();

    assert_eq!(result.away_score, 18);
    assert_eq!(result.home_score, 0);
    assert_eq!(result.innings.len(), 9);
    assert_eq!(dice.draws(), 9 * 15);
    for inning in &result.innings {
        assert_eq!(inning.top_runs, 2);
        assert_eq!(inning.bottom_runs, 0);
        assert_eq!(out_count(&inning.events), 6);
    }
    assert_eq!(result.winner(), Some(TeamSide::Away));
    assert_eq!(result.winner_name(), Some("Meikun"));

    // Nine two-run homers, then the final line.
    assert_eq!(result.highlights.len(), 10);
    assert_eq!(
        result.highlights[0],
        "Top of the 1st: Player a2 hits a home run! 2 runs score!"
    );
    assert_eq!(result.highlights[9], "Final: Meikun 18 - 0 Seiryo");

    // Every away batter ends with one single and one homer; ties go to the leadoff man.
    assert_eq!(result.mvp.as_deref(), Some("Player a1"));
    let a1 = result
        .batting_lines
        .iter()
        .find(|l| l.player_id.as_str() == "a1")
        .unwrap();
    assert_eq!(
        a1.performance,
        PlayerPerformance {
            at_bats: 5,
            hits: 2,
            home_runs: 1,
            walks: 0,
        }
    );
}

#[test]
fn test_extra_innings_decided_by_solo_shot() {
    let mut script = Vec::new();
    for _ in 0..18 {
        script.extend(scoreless_half());
    }
    script.extend(ScriptedDice::plays(&[&HOME_RUN, &STRIKEOUT, &STRIKEOUT, &STRIKEOUT]));
    script.extend(scoreless_half());
    let mut dice = ScriptedDice::once(script);

    let (home, away) = standard_matchup();
    let result = simulate_match(home, away, MatchConfig::default(), &mut dice).unwrap();

    assert_eq!((result.away_score, result.home_score), (1, 0));
    assert_eq!(result.total_innings(), 10);
    assert!(result.went_to_extra_innings());
    assert_eq!(
        result.highlights,
        [
            "Top of the 10th: Player a1 hits a solo home run!",
            "Extra innings! Decided in the 10th.",
            "Final: Meikun 1 - 0 Seiryo",
        ]
    );
    assert_eq!(result.mvp.as_deref(), Some("Player a1"));
}

#[test]
fn test_bases_loaded_walk_forces_run() {
    let mut script = ScriptedDice::plays(&[&WALK, &WALK, &WALK, &WALK]);
    script.extend(scoreless_half());
    script.extend(scoreless_half());
    let mut dice = ScriptedDice::cycle(script);

    let (home, away) = standard_matchup();
    let result = simulate_match(home, away, MatchConfig::default(), &mut dice).unwrap();

    assert_eq!(result.away_score, 9);
    assert!(result.innings.iter().all(|i| i.top_runs == 1));
    assert!(result.highlights[0].ends_with("draws a bases-loaded walk, forcing in a run."));
}

#[test]
fn test_home_team_still_bats_when_leading() {
    // Home homers in the bottom of every inning; the ninth is still played.
    let mut script = scoreless_half();
    script.extend(ScriptedDice::plays(&[&HOME_RUN, &STRIKEOUT, &STRIKEOUT, &STRIKEOUT]));
    let mut dice = ScriptedDice::cycle(script);

    let (home, away) = standard_matchup();
    let result = simulate_match(home, away, MatchConfig::default(), &mut dice).unwrap();

    assert_eq!((result.home_score, result.away_score), (9, 0));
    assert_eq!(result.innings.len(), 9);
    assert_eq!(result.innings[8].bottom_runs, 1);
}

#[test]
fn test_seeded_matches_hold_invariants() {
    let (home, away) = standard_matchup();
    for seed in 0..40 {
        let result = simulate_seeded(home.clone(), away.clone(), MatchConfig::default(), seed)
            .unwrap();

        assert_ne!(result.home_score, result.away_score, "seed {seed}");
        assert!(result.innings.len() >= 9, "seed {seed}");
        assert_eq!(result.home_score, result.line_score_total(TeamSide::Home));
        assert_eq!(result.away_score, result.line_score_total(TeamSide::Away));
        for (i, inning) in result.innings.iter().enumerate() {
            assert_eq!(inning.inning as usize, i + 1);
            assert_eq!(out_count(&inning.events), 6, "seed {seed} inning {}", i + 1);
        }

        let plate_appearances: u32 = result
            .batting_lines
            .iter()
            .map(|l| l.performance.at_bats + l.performance.walks)
            .sum();
        let events: usize = result.innings.iter().map(|i| i.events.len()).sum();
        assert_eq!(plate_appearances as usize, events);

        let final_line = result.highlights.last().unwrap();
        assert!(final_line.starts_with("Final: "));
    }
}

#[test]
fn test_same_seed_same_bytes() {
    let (home, away) = standard_matchup();
    let first = simulate_seeded(home.clone(), away.clone(), MatchConfig::default(), 99).unwrap();
    let second = simulate_seeded(home, away, MatchConfig::default(), 99).unwrap();
    assert_eq!(first.to_bytes().unwrap(), second.to_bytes().unwrap());
    assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
}

#[test]
fn test_constant_homers_hit_safety_limit() {
    let (home, away) = standard_matchup();
    let result = simulate_match(home, away, MatchConfig::default(), &mut ConstantDice(0.01));
    match result {
        Err(MatchError::SafetyLimitExceeded { inning, .. }) => assert_eq!(inning, 1),
        other => panic!("expected safety limit, got {other:?}"),
    }
}

#[test]
fn test_endless_tie_hits_inning_limit() {
    let (home, away) = standard_matchup();
    let config = MatchConfig::default().with_inning_limit(12);
    let mut dice = ScriptedDice::cycle(scoreless_half());
    let result = simulate_match(home, away, config, &mut dice);
    assert!(matches!(
        result,
        Err(MatchError::SafetyLimitExceeded { inning: 13, .. })
    ));
}

#[test]
fn test_dice_failure_aborts_match() {
    let (home, away) = standard_matchup();
    let mut dice = ScriptedDice::once(scoreless_half());
    let result = simulate_match(home, away, MatchConfig::default(), &mut dice);
    assert!(matches!(result, Err(MatchError::RandomSource(_))));
}

#[test]
fn test_invalid_roster_rejected_before_play() {
    let home = standard_team("Seiryo", "h");
    let mut away = standard_team("Meikun", "a");
    away.batting_order.pop();

    let mut dice = ScriptedDice::once(Vec::new());
    let result = simulate_match(home, away, MatchConfig::default(), &mut dice);
    assert!(matches!(
        result,
        Err(MatchError::RosterInvalid { ref team, .. }) if team == "Meikun"
    ));
    assert_eq!(dice.draws(), 0);
}

#[test]
fn test_out_of_range_ability_rejected() {
    let mut home = standard_team("Seiryo", "h");
    let away = standard_team("Meikun", "a");
    home.players[3].abilities.power = 101;

    let result = MatchSimulator::new(home, away, MatchConfig::default());
    assert!(matches!(
        result,
        Err(MatchError::InvariantViolation { field: "power", value: 101, .. })
    ));
}

#[test]
fn test_simulator_reusable() {
    let (home, away) = standard_matchup();
    let sim = MatchSimulator::new(home, away, MatchConfig::default()).unwrap();
    let a = sim.simulate(&mut RngDice::seeded(5)).unwrap();
    let b = sim.simulate(&mut RngDice::seeded(5)).unwrap();
    assert_eq!(a, b);
    assert_eq!(sim.home().name, "Seiryo");
}
