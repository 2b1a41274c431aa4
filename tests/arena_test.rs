//! Integration test: Arena matchmaking and rating
//!
//! Tests opponent discovery (banded listing, refreshes, ranked widening),
//! match resolution with flat MMR swings, daily counters with lazy UTC
//! resets, and mirrored history entries.

use chrono::{DateTime, TimeZone, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use questforge::arena::{find_ranked_opponent, list_opponents, refresh_opponents, resolve_match};
use questforge::{Character, EngineError, GameRules, Outcome};

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}

fn gladiator(rules: &GameRules, name: &str, mmr: i32, entered: bool) -> Character {
    let mut character = Character::new(name, "Warrior", rules, test_now(), &mut create_test_rng());
    character.mmr = mmr;
    character.arena_entered = entered;
    character
}

/// An initiator whose stats overwhelm a fresh level-1 opponent for any RNG
/// sequence: one landed hit ends the fight and dodges only delay it.
fn champion(rules: &GameRules) -> Character {
    let mut character = gladiator(rules, "Kargath", 1000, true);
    character.level = 20;
    character
}

// =============================================================================
// Opponent listing
// =============================================================================

#[test]
fn test_listing_filters_band_entry_and_self() {
    let rules = GameRules::default();
    let caller = gladiator(&rules, "Caller", 1000, true);
    let roster = vec![
        gladiator(&rules, "InBandLow", 800, true),
        gladiator(&rules, "InBandHigh", 1200, true),
        gladiator(&rules, "TooHigh", 1201, true),
        gladiator(&rules, "TooLow", 799, true),
        gladiator(&rules, "NeverEntered", 1000, false),
    ];

    // Run a few times: out-of-band and non-entered names must never appear.
    let mut rng = create_test_rng();
    for _ in 0..20 {
        let listed = list_opponents(&rules, &caller, &roster, &mut rng);
        assert!(!listed.is_empty());
        for opponent in &listed {
            assert!(opponent.name.starts_with("InBand"), "{}", opponent.name);
        }
    }
}

#[test]
fn test_listing_size_between_three_and_five() {
    let rules = GameRules::default();
    let caller = gladiator(&rules, "Caller", 1000, true);
    let roster: Vec<Character> = (0..8)
        .map(|i| gladiator(&rules, &format!("G{}", i), 950 + i * 10, true))
        .collect();

    let mut rng = create_test_rng();
    for _ in 0..20 {
        let listed = list_opponents(&rules, &caller, &roster, &mut rng);
        assert!((3..=5).contains(&listed.len()), "got {}", listed.len());
    }
}

#[test]
fn test_listing_smaller_pool_returns_whole_pool() {
    let rules = GameRules::default();
    let caller = gladiator(&rules, "Caller", 1000, true);
    let roster = vec![
        gladiator(&rules, "OnlyOne", 990, true),
        gladiator(&rules, "OnlyTwo", 1010, true),
    ];

    let mut rng = create_test_rng();
    let listed = list_opponents(&rules, &caller, &roster, &mut rng);
    assert_eq!(listed.len(), 2);
}

#[test]
fn test_listing_carries_display_combat_score() {
    let rules = GameRules::default();
    let caller = gladiator(&rules, "Caller", 1000, true);
    let roster = vec![gladiator(&rules, "Opponent", 1000, true)];

    let mut rng = create_test_rng();
    let listed = list_opponents(&rules, &caller, &roster, &mut rng);
    // Level-1 Warrior, no equipment: 2*1 + (7+4+2+7) = 22.
    assert_eq!(listed[0].combat_score, 22);
}

#[test]
fn test_refresh_cap_is_three_per_day() {
    let rules = GameRules::default();
    let mut caller = gladiator(&rules, "Caller", 1000, true);
    let roster = vec![gladiator(&rules, "Opponent", 1000, true)];
    let mut rng = create_test_rng();

    for _ in 0..3 {
        refresh_opponents(&rules, &mut caller, &roster, test_now(), &mut rng).unwrap();
    }
    assert_eq!(
        refresh_opponents(&rules, &mut caller, &roster, test_now(), &mut rng),
        Err(EngineError::NoRefreshesRemaining)
    );
}

#[test]
fn test_refreshes_reset_lazily_next_day() {
    let rules = GameRules::default();
    let mut caller = gladiator(&rules, "Caller", 1000, true);
    caller.daily_refreshes.count = 3;
    let roster = vec![gladiator(&rules, "Opponent", 1000, true)];
    let mut rng = create_test_rng();

    let tomorrow = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 1).unwrap();
    refresh_opponents(&rules, &mut caller, &roster, tomorrow, &mut rng).unwrap();
    assert_eq!(caller.daily_refreshes.count, 1);
}

// =============================================================================
// Ranked search
// =============================================================================

#[test]
fn test_ranked_search_prefers_narrowest_band() {
    let rules = GameRules::default();
    let caller = gladiator(&rules, "Caller", 1000, true);
    let roster = vec![
        gladiator(&rules, "Near", 1090, true),
        gladiator(&rules, "Far", 1350, true),
    ];

    let mut rng = create_test_rng();
    for _ in 0..20 {
        let found = find_ranked_opponent(&rules, &caller, &roster, &mut rng).unwrap();
        assert_eq!(found.name, "Near");
    }
}

#[test]
fn test_ranked_search_widens_through_bands() {
    let rules = GameRules::default();
    let caller = gladiator(&rules, "Caller", 1000, true);
    let roster = vec![gladiator(&rules, "Distant", 1700, true)];

    let mut rng = create_test_rng();
    let found = find_ranked_opponent(&rules, &caller, &roster, &mut rng).unwrap();
    assert_eq!(found.name, "Distant");
}

#[test]
fn test_ranked_search_falls_back_to_anyone_entered() {
    let rules = GameRules::default();
    let caller = gladiator(&rules, "Caller", 1000, true);
    let roster = vec![gladiator(&rules, "Outlier", 5000, true)];

    let mut rng = create_test_rng();
    let found = find_ranked_opponent(&rules, &caller, &roster, &mut rng).unwrap();
    assert_eq!(found.name, "Outlier");
}

#[test]
fn test_ranked_search_with_empty_arena_fails() {
    let rules = GameRules::default();
    let caller = gladiator(&rules, "Caller", 1000, true);
    let roster = vec![gladiator(&rules, "NeverFought", 1000, false)];

    let mut rng = create_test_rng();
    assert!(matches!(
        find_ranked_opponent(&rules, &caller, &roster, &mut rng),
        Err(EngineError::NoOpponents)
    ));
}

// =============================================================================
// Match resolution
// =============================================================================

#[test]
fn test_resolve_match_swings_exactly_thirty() {
    let rules = GameRules::default();
    let mut initiator = champion(&rules);
    let mut opponent = gladiator(&rules, "Fresh", 1000, false);

    let mut rng = create_test_rng();
    let report = resolve_match(&rules, &mut initiator, &mut opponent, test_now(), &mut rng)
        .unwrap();

    assert!(report.initiator_won);
    assert_eq!(report.winner_id, initiator.id);
    assert_eq!(report.initiator_mmr_delta, 30);
    assert_eq!(report.opponent_mmr_delta, -30);
    assert_eq!(initiator.mmr, 1030);
    assert_eq!(opponent.mmr, 970);
    assert_eq!(initiator.wins, 1);
    assert_eq!(opponent.losses, 1);
}

#[test]
fn test_resolve_match_handles_negative_ratings() {
    let rules = GameRules::default();
    let mut initiator = champion(&rules);
    initiator.mmr = 12;
    let mut opponent = gladiator(&rules, "Fresh", -500, false);

    let mut rng = create_test_rng();
    resolve_match(&rules, &mut initiator, &mut opponent, test_now(), &mut rng).unwrap();
    assert_eq!(initiator.mmr, 42);
    assert_eq!(opponent.mmr, -530);
}

#[test]
fn test_resolve_match_appends_mirrored_history() {
    let rules = GameRules::default();
    let mut initiator = champion(&rules);
    let mut opponent = gladiator(&rules, "Fresh", 1000, false);

    let mut rng = create_test_rng();
    let report = resolve_match(&rules, &mut initiator, &mut opponent, test_now(), &mut rng)
        .unwrap();

    let mine = initiator.history.latest().unwrap();
    let theirs = opponent.history.latest().unwrap();
    assert_eq!(mine.outcome, Outcome::Victory);
    assert_eq!(theirs.outcome, Outcome::Defeat);
    assert_eq!(mine.mmr_delta, Some(30));
    assert_eq!(theirs.mmr_delta, Some(-30));
    // Each side records its own HP on the player side.
    assert_eq!(mine.player_hp, report.combat.attacker_hp);
    assert_eq!(theirs.player_hp, report.combat.defender_hp);
    assert_eq!(mine.opponent.as_deref(), Some("Fresh"));
    assert_eq!(theirs.opponent.as_deref(), Some("Kargath"));
}

#[test]
fn test_resolve_match_marks_entry_and_burns_both_daily_fights() {
    let rules = GameRules::default();
    let mut initiator = champion(&rules);
    initiator.arena_entered = false;
    let mut opponent = gladiator(&rules, "Fresh", 1000, false);

    let mut rng = create_test_rng();
    resolve_match(&rules, &mut initiator, &mut opponent, test_now(), &mut rng).unwrap();

    assert!(initiator.arena_entered);
    assert!(opponent.arena_entered);
    assert_eq!(initiator.daily_fights.count, 1);
    assert_eq!(opponent.daily_fights.count, 1);
}

#[test]
fn test_cannot_fight_self() {
    let rules = GameRules::default();
    let mut initiator = champion(&rules);
    let mut doppelganger = initiator.clone();

    let mut rng = create_test_rng();
    assert_eq!(
        resolve_match(&rules, &mut initiator, &mut doppelganger, test_now(), &mut rng),
        Err(EngineError::CannotFightSelf)
    );
}

#[test]
fn test_daily_fight_limit() {
    let rules = GameRules::default();
    let mut initiator = champion(&rules);
    initiator.daily_fights.count = 5;
    let mut opponent = gladiator(&rules, "Fresh", 1000, false);

    let mut rng = create_test_rng();
    assert_eq!(
        resolve_match(&rules, &mut initiator, &mut opponent, test_now(), &mut rng),
        Err(EngineError::DailyFightLimitReached)
    );
    // No side effects on a rejected match.
    assert_eq!(initiator.mmr, 1000);
    assert_eq!(opponent.mmr, 1000);
    assert!(opponent.history.is_empty());
}

#[test]
fn test_daily_fight_limit_resets_across_midnight() {
    let rules = GameRules::default();
    let mut initiator = champion(&rules);
    initiator.daily_fights.count = 5;
    let mut opponent = gladiator(&rules, "Fresh", 1000, false);

    let tomorrow = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 1).unwrap();
    let mut rng = create_test_rng();
    resolve_match(&rules, &mut initiator, &mut opponent, tomorrow, &mut rng).unwrap();
    assert_eq!(initiator.daily_fights.count, 1);
}
