use super::*;

use std::collections::BTreeSet;
use std::path::PathBuf;

use savehound_core::SaveLocation;

const DAY: u64 = 86_400;

fn now() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

fn days_ago(days: u64) -> SystemTime {
    now() - Duration::from_secs(days * DAY)
}

fn candidate(rel: &str, markers: &[&str], modified: SystemTime) -> CandidateDirectory {
    let relative_path = PathBuf::from(rel);
    CandidateDirectory {
        path: PathBuf::from("/lib/1091500/pfx/drive_c/users/steamuser").join(&relative_path),
        library_root: PathBuf::from("/lib"),
        location: SaveLocation::Local,
        relative_path,
        last_modified: modified,
        contains_markers: markers.iter().map(|m| m.to_string()).collect::<BTreeSet<_>>(),
    }
}

fn scorer() -> HeuristicScorer {
    HeuristicScorer::default().with_now(now())
}

fn kw(name: &str) -> Vec<String> {
    keywords(name)
}

#[test]
fn test_keyword_full_match_in_path() {
    let c = candidate("AppData/Local/CD Projekt Red/Cyberpunk 2077", &[], days_ago(90));
    let hit = scorer()
        .evaluate(ScoringRule::KeywordMatch, &c, &kw("Cyberpunk 2077"))
        .unwrap();
    assert_eq!(hit.points, 4.0);
    assert_eq!(
        hit.reason,
        Reason::KeywordMatch {
            matched: vec!["cyberpunk".into(), "2077".into()],
            total: 2
        }
    );
}

#[test]
fn test_keyword_matches_concatenated_name() {
    let c = candidate("AppData/Local/Cyberpunk2077", &[], days_ago(90));
    let hit = scorer()
        .evaluate(ScoringRule::KeywordMatch, &c, &kw("Cyberpunk 2077"))
        .unwrap();
    assert_eq!(hit.points, 4.0);
}

#[test]
fn test_keyword_partial_and_child_credit() {
    // Only "witcher" of ["witcher", "wild", "hunt"] in the path
    let c = candidate("AppData/Local/The Witcher", &[], days_ago(90));
    let hit = scorer()
        .evaluate(ScoringRule::KeywordMatch, &c, &kw("The Witcher 3: Wild Hunt"))
        .unwrap();
    assert!((hit.points - 4.0 / 3.0).abs() < 1e-9);

    // Found only among child names: half credit
    let parent = candidate("AppData/Local/CD Projekt Red", &["Cyberpunk 2077"], days_ago(90));
    let hit = scorer()
        .evaluate(ScoringRule::KeywordMatch, &parent, &kw("Cyberpunk 2077"))
        .unwrap();
    assert_eq!(hit.points, 2.0);
}

#[test]
fn test_keyword_ignores_location_components() {
    // "local" is part of the location root, not evidence
    let c = candidate("AppData/Local/Temp", &[], days_ago(90));
    assert!(
        scorer()
            .evaluate(ScoringRule::KeywordMatch, &c, &kw("Local Hero"))
            .is_none()
    );
}

#[test]
fn test_format_bonus_counted_once() {
    let one = candidate("AppData/Local/Game", &["slot1.sav"], days_ago(90));
    let many = candidate(
        "AppData/Local/Game",
        &["SaveGames", "slot1.sav", "slot2.sav", "profile.dat"],
        days_ago(90),
    );
    let s = scorer();
    let a = s.evaluate(ScoringRule::FormatMatch, &one, &[]).unwrap();
    let b = s.evaluate(ScoringRule::FormatMatch, &many, &[]).unwrap();
    assert_eq!(a.points, 2.0);
    assert_eq!(a.points, b.points);
}

#[test]
fn test_is_save_like() {
    assert!(is_save_like("ManualSave-1"));
    assert!(is_save_like("quick.SL2"));
    assert!(is_save_like("player.ess"));
    assert!(is_save_like("Slot_03"));
    assert!(is_save_like("Progress"));
    assert!(!is_save_like("shadercache"));
    assert!(!is_save_like("readme.txt"));
    // A bare extension is not a file with that extension
    assert!(!is_save_like(".dat"));
}

#[test]
fn test_recency_decay() {
    assert_eq!(recency_factor(Duration::ZERO), 1.0);
    assert_eq!(recency_factor(RECENT_WINDOW), 1.0);
    assert_eq!(recency_factor(RECENCY_HORIZON), 0.0);
    assert_eq!(recency_factor(Duration::from_secs(400 * DAY)), 0.0);

    let mut prev = 1.0;
    for d in 0..=31 {
        let f = recency_factor(Duration::from_secs(d * DAY));
        assert!(f <= prev && f >= 0.0, "day {d}: {f}");
        prev = f;
    }
}

#[test]
fn test_recency_future_timestamp_is_fresh() {
    let c = candidate("AppData/Local/Game", &[], now() + Duration::from_secs(3600));
    let hit = scorer().evaluate(ScoringRule::Recency, &c, &[]).unwrap();
    assert_eq!(hit.points, 3.0);
    assert_eq!(hit.reason, Reason::Recency { age_days: 0 });
}

#[test]
fn test_recency_beyond_horizon_contributes_nothing() {
    let c = candidate("AppData/Local/Game", &[], days_ago(45));
    assert!(scorer().evaluate(ScoringRule::Recency, &c, &[]).is_none());

    let scored = scorer().score(&c, "Game");
    assert!(!scored.has_rule(ScoringRule::Recency));
    assert!(scored.score >= 0.0);
}

#[test]
fn test_no_evidence_scores_zero() {
    let c = candidate("AppData/Local/Microsoft", &["CLR_v4.0"], days_ago(365));
    let scored = scorer().score(&c, "Hollow Knight");
    assert_eq!(scored.score, 0.0);
    assert!(scored.reasons.is_empty());
    assert_eq!(scored.source, SourceLabel::Heuristic);
}

#[test]
fn test_combined_score_bounded() {
    let weights = ScoreWeights::default();
    let c = candidate(
        "AppData/Local/CD Projekt Red/Cyberpunk 2077",
        &["saves"],
        days_ago(0),
    );
    let scored = scorer().score(&c, "Cyberpunk 2077");
    assert_eq!(scored.score, weights.max_score());
    let rules: Vec<ScoringRule> = scored.reasons.iter().map(Reason::rule).collect();
    assert_eq!(rules, HEURISTIC_RULES.to_vec());
}

#[test]
fn test_known_hint_gets_max_score() {
    let hints = vec![KnownPathHint::new(
        1091500,
        r"%LOCALAPPDATA%\CD Projekt Red\Cyberpunk 2077",
    )];
    let s = scorer().with_hints(&hints);
    let c = candidate("AppData/Local/CD Projekt Red/Cyberpunk 2077", &[], days_ago(200));
    let scored = s.score(&c, "Cyberpunk 2077");

    assert_eq!(scored.source, SourceLabel::KnownPathHint);
    assert_eq!(scored.score, s.weights().max_score());
    assert_eq!(scored.reasons[0].rule(), ScoringRule::KnownHint);
    assert!(scored.has_rule(ScoringRule::KeywordMatch));

    let other = candidate("AppData/Local/CD Projekt Red", &[], days_ago(0));
    assert_eq!(s.score(&other, "Cyberpunk 2077").source, SourceLabel::Heuristic);
}

#[test]
fn test_custom_weights_sanitized() {
    let weights = ScoreWeights {
        keyword: -1.0,
        format: f64::NAN,
        recency: 2.0,
    };
    let s = HeuristicScorer::new(weights).with_now(now());
    assert_eq!(s.weights().max_score(), 2.0);

    let c = candidate("AppData/Local/Game", &["game.sav"], days_ago(0));
    let scored = s.score(&c, "Game");
    assert_eq!(scored.score, 2.0);
    assert_eq!(scored.reasons, vec![Reason::Recency { age_days: 0 }]);
}
