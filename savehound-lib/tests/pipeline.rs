//! End-to-end runs of the find pipeline against on-disk prefixes.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use filetime::FileTime;

use savehound_catalog::CatalogIndex;
use savehound_core::{ScoringRule, SourceLabel};
use savehound_hints::{HintSet, KnownPathHint};
use savehound_lib::{FirstMatch, SaveFinder, ScanOptions};

fn profile(root: &Path, app_id: u32) -> PathBuf {
    root.join(app_id.to_string())
        .join("pfx")
        .join("drive_c")
        .join("users")
        .join("steamuser")
}

fn set_age(path: &Path, now: SystemTime, days: u64) {
    let when = now - Duration::from_secs(days * 86_400);
    filetime::set_file_mtime(path, FileTime::from_system_time(when)).unwrap();
}

fn cyberpunk_catalog() -> CatalogIndex {
    CatalogIndex::from_json_str(r#"[{"appid": 1091500, "name": "Cyberpunk 2077"}]"#).unwrap()
}

#[test]
fn cyberpunk_save_dir_ranked_first() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("compatdata");
    let local = profile(&root, 1091500).join("AppData").join("Local");
    let game = local.join("CD Projekt Red").join("Cyberpunk 2077");
    fs::create_dir_all(game.join("saves")).unwrap();
    fs::write(game.join("user.settings"), b"{}").unwrap();
    fs::create_dir_all(local.join("Microsoft").join("Windows")).unwrap();

    let now = SystemTime::now();
    set_age(&local.join("Microsoft").join("Windows"), now, 300);
    set_age(&local.join("Microsoft"), now, 300);

    let catalog = cyberpunk_catalog();
    let finder = SaveFinder::new(vec![root.clone()], ScanOptions::default()).with_now(now);

    let matches = finder.search("cyberpunk", &catalog, false).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].app_id, 1091500);
    assert_eq!(matches[0].similarity, 1.0);

    let located = finder
        .locate("cyberpunk", &catalog, &HintSet::default(), &mut FirstMatch, true)
        .unwrap()
        .expect("installed game is located");
    assert_eq!(located.entry.app_id, 1091500);

    let top = located.results.first().unwrap();
    assert_eq!(top.path, game);
    assert!(top.score > 0.0);
    assert!(top.has_rule(ScoringRule::KeywordMatch));
    assert!(top.has_rule(ScoringRule::Recency));
    assert_eq!(top.source, SourceLabel::Heuristic);

    // Everything else scores strictly lower and nothing is dropped
    assert_eq!(located.results.len(), 4);
    assert!(located.results.iter().skip(1).all(|c| c.score < top.score));
}

#[test]
fn empty_root_yields_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let finder = SaveFinder::new(vec![tmp.path().to_path_buf()], ScanOptions::default());

    let catalog = cyberpunk_catalog();
    let entry = catalog.lookup_by_id(1091500).unwrap();
    let results = finder.find(entry, &HintSet::default());
    assert!(results.is_empty());

    // Not installed anywhere, so an installed-only lookup finds no game
    let located = finder
        .locate("cyberpunk", &catalog, &HintSet::default(), &mut FirstMatch, true)
        .unwrap();
    assert!(located.is_none());
}

#[test]
fn hinted_path_outranks_stronger_heuristics() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    let roaming = profile(&root, 1091500).join("AppData").join("Roaming");
    let odd = roaming.join("Odd Place");
    fs::create_dir_all(&odd).unwrap();
    let decoy = roaming.join("Cyberpunk 2077 Saves");
    fs::create_dir_all(&decoy).unwrap();
    fs::write(decoy.join("slot1.sav"), b"").unwrap();

    let now = SystemTime::now();
    set_age(&odd, now, 120);

    let hints = HintSet::new(vec![KnownPathHint::new(1091500, "%APPDATA%/Odd Place")]);
    let finder = SaveFinder::new(vec![root], ScanOptions::default()).with_now(now);
    let catalog = cyberpunk_catalog();
    let results = finder.find(catalog.lookup_by_id(1091500).unwrap(), &hints);

    let top = results.first().unwrap();
    assert_eq!(top.path, odd);
    assert!(top.is_hinted());
    let scores: Vec<f64> = results.iter().map(|c| c.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn recent_candidate_scores_at_least_older_twin() {
    let tmp = tempfile::tempdir().unwrap();
    let local = profile(tmp.path(), 367520).join("AppData").join("Local");
    let fresh = local.join("Twin A");
    let stale = local.join("Twin B");
    fs::create_dir_all(&fresh).unwrap();
    fs::create_dir_all(&stale).unwrap();

    let now = SystemTime::now();
    set_age(&fresh, now, 2);
    set_age(&stale, now, 20);

    let finder =
        SaveFinder::new(vec![tmp.path().to_path_buf()], ScanOptions::default()).with_now(now);
    let catalog = CatalogIndex::from_json_str(r#"[{"appid": 367520, "name": "Hollow Knight"}]"#)
        .unwrap();
    let results = finder.find(catalog.lookup_by_id(367520).unwrap(), &HintSet::default());

    let score_of = |p: &Path| results.iter().find(|c| c.path == p).unwrap().score;
    assert!(score_of(&fresh) > score_of(&stale));
    assert_eq!(results.first().unwrap().path, fresh);
}

#[test]
fn deep_hinted_path_is_found_and_first() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    let local = profile(&root, 1623730).join("AppData").join("Local");
    let saves = local.join("Pal").join("Saved").join("SaveGames");
    fs::create_dir_all(saves.join("0123456789ABCDEF")).unwrap();
    let decoy = local.join("Cyberpunk Palworld Decoy");
    fs::create_dir_all(&decoy).unwrap();
    fs::write(decoy.join("palworld.sav"), b"").unwrap();

    let now = SystemTime::now();
    set_age(&saves, now, 90);

    let hints = HintSet::new(vec![KnownPathHint::new(
        1623730,
        r"%LOCALAPPDATA%\Pal\Saved\SaveGames",
    )]);
    let catalog = CatalogIndex::from_json_str(r#"[{"appid": 1623730, "name": "Palworld"}]"#)
        .unwrap();
    let finder = SaveFinder::new(vec![root], ScanOptions::default()).with_now(now);
    let results = finder.find(catalog.lookup_by_id(1623730).unwrap(), &hints);

    let top = results.first().unwrap();
    assert_eq!(top.path, saves);
    assert!(top.is_hinted());
    assert_eq!(results.hinted_count(), 1);
    let scores: Vec<f64> = results.iter().map(|c| c.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}
