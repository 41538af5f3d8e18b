use super::*;

fn make_catalog() -> CatalogIndex {
    CatalogIndex::from_entries(vec![
        CatalogEntry::new(1091500, "Cyberpunk 2077"),
        CatalogEntry::new(2138330, "Cyberpunk 2077: Phantom Liberty"),
        CatalogEntry::new(292030, "The Witcher 3: Wild Hunt"),
        CatalogEntry::new(20900, "The Witcher: Enhanced Edition"),
        CatalogEntry::new(1086940, "Baldur's Gate 3"),
        CatalogEntry::new(228280, "Baldur's Gate: Enhanced Edition"),
        CatalogEntry::new(570, "Dota 2"),
    ])
}

#[test]
fn test_substring_match_is_full_similarity() {
    let catalog = make_catalog();
    let matches = match_name("cyberpunk", &catalog).unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].app_id, 1091500);
    assert_eq!(matches[0].similarity, 1.0);
    // Same similarity, longer name sorts second
    assert_eq!(matches[1].app_id, 2138330);
    assert_eq!(matches[1].similarity, 1.0);
}

#[test]
fn test_case_and_punctuation_insensitive() {
    let catalog = make_catalog();
    let matches = match_name("BALDUR'S  gate", &catalog).unwrap();
    assert_eq!(matches[0].app_id, 1086940);
    assert!(matches.iter().all(|m| m.similarity == 1.0));
}

#[test]
fn test_token_overlap_fallback() {
    let catalog = make_catalog();
    // "hunt witcher" is not a substring of anything, but both tokens appear
    let matches = match_name("hunt witcher", &catalog).unwrap();
    assert_eq!(matches[0].app_id, 292030);
    assert_eq!(matches[0].similarity, 1.0);
    // "The Witcher: Enhanced Edition" only has "witcher"
    let enhanced = matches.iter().find(|m| m.app_id == 20900).unwrap();
    assert_eq!(enhanced.similarity, 0.5);
}

#[test]
fn test_partial_overlap_ranks_below_substring() {
    let catalog = make_catalog();
    let matches = match_name("gate 3 deluxe", &catalog).unwrap();
    // No name contains the whole query, so this is token overlap only
    assert_eq!(matches[0].app_id, 1086940);
    assert!((matches[0].similarity - 2.0 / 3.0).abs() < 1e-9);
    let bg1 = matches.iter().find(|m| m.app_id == 228280).unwrap();
    assert!((bg1.similarity - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_all_similarities_positive() {
    let catalog = make_catalog();
    for q in ["witcher", "edition", "2", "phantom gate", "zzz"] {
        for m in match_name(q, &catalog).unwrap() {
            assert!(m.similarity > 0.0 && m.similarity <= 1.0, "{q}: {m:?}");
        }
    }
}

#[test]
fn test_no_match_is_empty_not_error() {
    let catalog = make_catalog();
    let matches = match_name("half life", &catalog).unwrap();
    assert!(matches.is_empty());
}

#[test]
fn test_empty_query_is_error() {
    let catalog = make_catalog();
    assert_eq!(
        match_name("  ?!  ", &catalog).unwrap_err(),
        NoMatchError::new("  ?!  ")
    );
    assert!(match_name("", &catalog).is_err());
}

#[test]
fn test_idempotent() {
    let catalog = make_catalog();
    let a = match_name("edition", &catalog).unwrap();
    let b = match_name("edition", &catalog).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_ties_by_length_then_lexical() {
    let catalog = CatalogIndex::from_entries(vec![
        CatalogEntry::new(1, "Portal Stories: Mel"),
        CatalogEntry::new(2, "Portal 2"),
        CatalogEntry::new(3, "Portal"),
        CatalogEntry::new(4, "Portal 1"),
    ]);
    let ids: Vec<u32> = match_name("portal", &catalog)
        .unwrap()
        .iter()
        .map(|m| m.app_id)
        .collect();
    assert_eq!(ids, vec![3, 4, 2, 1]);
}

#[test]
fn test_identical_names_keep_catalog_order() {
    let catalog = CatalogIndex::from_entries(vec![
        CatalogEntry::new(30, "Doom"),
        CatalogEntry::new(10, "Doom"),
        CatalogEntry::new(20, "Doom"),
    ]);
    let ids: Vec<u32> = match_name("doom", &catalog)
        .unwrap()
        .iter()
        .map(|m| m.app_id)
        .collect();
    assert_eq!(ids, vec![30, 10, 20]);
}

#[test]
fn test_limit() {
    let catalog = make_catalog();
    let matches = NameMatcher::new()
        .with_limit(1)
        .match_name("witcher", &catalog)
        .unwrap();
    assert_eq!(matches.len(), 1);
}
