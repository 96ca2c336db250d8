use hazard_core::{Hazard, HazardPatch, HazardStore, RepoError};
use std::collections::HashSet;

fn store_with_user() -> (HazardStore, i64) {
    let store = HazardStore::open_in_memory().unwrap();
    let user_id = store.create_user("ranger", "ranger@trail.test").unwrap();
    (store, user_id)
}

#[test]
fn example_scenario_from_first_report_to_cleanup() {
    let (store, user_id) = store_with_user();
    assert_eq!(user_id, 1);

    let id = store
        .create_hazard("Spill", "Aisle 3", Some("Chemical spill"), user_id)
        .unwrap();
    assert_eq!(id, 1);

    assert_eq!(
        store.list_all_hazards().unwrap(),
        vec![Hazard {
            id: 1,
            name: "Spill".to_string(),
            location: "Aisle 3".to_string(),
            description: Some("Chemical spill".to_string()),
            user_id: 1,
        }]
    );

    assert!(store
        .update_hazard(1, Some("Spill"), Some(""), Some("Cleaned up"))
        .unwrap());

    let updated = store.get_hazard(1).unwrap().unwrap();
    assert_eq!(updated.name, "Spill");
    assert_eq!(updated.location, "Aisle 3");
    assert_eq!(updated.description.as_deref(), Some("Cleaned up"));
}

#[test]
fn create_returns_fresh_ids_listed_exactly_once() {
    let (store, user_id) = store_with_user();

    let mut seen = HashSet::new();
    for index in 0..5 {
        let name = format!("Fallen tree {index}");
        let id = store
            .create_hazard(&name, "North loop", None, user_id)
            .unwrap();
        assert!(seen.insert(id), "id {id} was returned twice");

        let all = store.list_all_hazards().unwrap();
        let matching: Vec<_> = all.iter().filter(|hazard| hazard.id == id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].name, name);
        assert_eq!(matching[0].location, "North loop");
        assert_eq!(matching[0].description, None);
        assert_eq!(matching[0].user_id, user_id);
    }
    assert_eq!(store.count_hazards().unwrap(), 5);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let (store, user_id) = store_with_user();

    let first = store.create_hazard("Ice", "Bridge", None, user_id).unwrap();
    assert!(store.delete_hazard(first).unwrap());
    let second = store.create_hazard("Ice", "Bridge", None, user_id).unwrap();
    assert!(second > first);
}

#[test]
fn create_with_unknown_user_is_constraint_violation() {
    let (store, _) = store_with_user();

    let err = store
        .create_hazard("Wasp nest", "Trailhead", None, 404)
        .unwrap_err();
    assert!(matches!(err, RepoError::ConstraintViolation(_)));
    assert_eq!(store.count_hazards().unwrap(), 0);
}

#[test]
fn delete_returns_true_exactly_once() {
    let (store, user_id) = store_with_user();
    let id = store
        .create_hazard("Washout", "Creek crossing", Some("Bridge gone"), user_id)
        .unwrap();

    assert!(store.delete_hazard(id).unwrap());
    assert!(!store.delete_hazard(id).unwrap());
    assert!(store.get_hazard(id).unwrap().is_none());
}

#[test]
fn update_with_all_empty_values_keeps_record_and_reports_found() {
    let (store, user_id) = store_with_user();
    let id = store
        .create_hazard("Mud", "Switchback 2", Some("Ankle deep"), user_id)
        .unwrap();
    let before = store.get_hazard(id).unwrap().unwrap();

    assert!(store
        .update_hazard(id, Some(""), Some(""), Some(""))
        .unwrap());
    assert!(store.update_hazard(id, None, None, None).unwrap());

    assert_eq!(store.get_hazard(id).unwrap().unwrap(), before);
}

#[test]
fn update_with_only_name_changes_only_name() {
    let (store, user_id) = store_with_user();
    let id = store
        .create_hazard("Mud", "Switchback 2", Some("Ankle deep"), user_id)
        .unwrap();

    assert!(store.update_hazard(id, Some("NewName"), None, None).unwrap());

    let hazard = store.get_hazard(id).unwrap().unwrap();
    assert_eq!(hazard.name, "NewName");
    assert_eq!(hazard.location, "Switchback 2");
    assert_eq!(hazard.description.as_deref(), Some("Ankle deep"));
    assert_eq!(hazard.user_id, user_id);
}

#[test]
fn update_cannot_clear_description() {
    let (store, user_id) = store_with_user();
    let id = store
        .create_hazard("Snake", "Overlook", Some("Rattlesnake"), user_id)
        .unwrap();

    let patch = HazardPatch::default().description("");
    assert!(store.apply_patch(id, &patch).unwrap());

    let hazard = store.get_hazard(id).unwrap().unwrap();
    assert_eq!(hazard.description.as_deref(), Some("Rattlesnake"));
}

#[test]
fn update_can_fill_missing_description() {
    let (store, user_id) = store_with_user();
    let id = store.create_hazard("Snake", "Overlook", None, user_id).unwrap();

    assert!(store
        .update_hazard(id, None, None, Some("Seen twice today"))
        .unwrap());
    let hazard = store.get_hazard(id).unwrap().unwrap();
    assert_eq!(hazard.description.as_deref(), Some("Seen twice today"));
}

#[test]
fn update_unknown_id_returns_false_without_mutation() {
    let (store, user_id) = store_with_user();
    store
        .create_hazard("Mud", "Switchback 2", None, user_id)
        .unwrap();
    let before = store.list_all_hazards().unwrap();

    assert!(!store
        .update_hazard(9_999, Some("Ghost"), Some("Nowhere"), Some("Nothing"))
        .unwrap());

    assert_eq!(store.list_all_hazards().unwrap(), before);
}

#[test]
fn list_by_user_partitions_all_hazards() {
    let store = HazardStore::open_in_memory().unwrap();
    let alice = store.create_user("alice", "alice@trail.test").unwrap();
    let bob = store.create_user("bob", "bob@trail.test").unwrap();

    store.create_hazard("Ice", "Bridge", None, alice).unwrap();
    store.create_hazard("Rockfall", "Mile 4", None, bob).unwrap();
    store
        .create_hazard("Bees", "Meadow", Some("Ground nest"), alice)
        .unwrap();

    let all = store.list_all_hazards().unwrap();
    let owners: HashSet<i64> = all.iter().map(|hazard| hazard.user_id).collect();

    let mut union = Vec::new();
    for owner in owners {
        let subset = store.list_hazards_by_user(owner).unwrap();
        let expected: Vec<_> = all
            .iter()
            .filter(|hazard| hazard.user_id == owner)
            .cloned()
            .collect();
        assert_eq!(subset, expected);
        union.extend(subset);
    }

    let mut union_ids: Vec<_> = union.iter().map(|hazard| hazard.id).collect();
    let mut all_ids: Vec<_> = all.iter().map(|hazard| hazard.id).collect();
    union_ids.sort_unstable();
    all_ids.sort_unstable();
    assert_eq!(union_ids, all_ids);
}

#[test]
fn list_by_unknown_user_is_empty() {
    let (store, user_id) = store_with_user();
    store.create_hazard("Ice", "Bridge", None, user_id).unwrap();

    assert!(store.list_hazards_by_user(12_345).unwrap().is_empty());
}

#[test]
fn list_all_on_empty_store_is_empty() {
    let store = HazardStore::open_in_memory().unwrap();
    assert!(store.list_all_hazards().unwrap().is_empty());
    assert_eq!(store.count_hazards().unwrap(), 0);
}
