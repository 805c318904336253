use kreator::core::keys::{CredentialStore, InMemoryCredentialStore, parse_api_keys};

#[test]
fn test_parse_api_keys_splits_on_common_separators() {
    let keys = parse_api_keys("sk-1, sk-2;sk-3\nsk-4\tsk-5 sk-6");
    assert_eq!(keys, vec!["sk-1", "sk-2", "sk-3", "sk-4", "sk-5", "sk-6"]);
}

#[test]
fn test_parse_api_keys_drops_empty_fragments() {
    assert!(parse_api_keys("").is_empty());
    assert!(parse_api_keys("  ,, ;\n").is_empty());
    assert_eq!(parse_api_keys(" ,sk-1, "), vec!["sk-1"]);
}

#[test]
fn test_from_keys_names_entries_and_activates_the_first() {
    let store = InMemoryCredentialStore::from_keys(
        &["sk-a".to_string(), "sk-b".to_string()],
        "Server",
    );

    let entries = store.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "server-1");
    assert_eq!(entries[0].name, "Server 1");
    assert!(entries[0].is_active);
    assert_eq!(entries[1].id, "server-2");
    assert!(!entries[1].is_active);

    let active = store.active_entry().unwrap();
    assert_eq!(active.key, "sk-a");
}

#[test]
fn test_empty_store_has_no_active_entry() {
    let store = InMemoryCredentialStore::default();
    assert!(store.active_entry().is_none());
}

#[test]
fn test_set_active_switches_exactly_one_entry() {
    let mut store = InMemoryCredentialStore::from_keys(
        &["sk-a".to_string(), "sk-b".to_string(), "sk-c".to_string()],
        "Server",
    );

    assert!(store.set_active("server-3"));
    let active: Vec<_> = store.entries().iter().filter(|e| e.is_active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].key, "sk-c");
}

#[test]
fn test_set_active_with_unknown_id_leaves_the_store_untouched() {
    let mut store =
        InMemoryCredentialStore::from_keys(&["sk-a".to_string()], "Server");

    assert!(!store.set_active("server-99"));
    assert_eq!(store.active_entry().unwrap().key, "sk-a");
}
