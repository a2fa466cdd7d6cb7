//! Store Integration Tests
//!
//! Exercises the slot store and collections end to end, including the
//! on-disk round trip and change propagation between handles.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use tokio::time::timeout;

    use crate::domain::{Assignment, Entity, Expense};
    use crate::store::{Collection, SlotCollection, SlotStore};

    fn setup_store() -> SlotStore {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        SlotStore::open_in_memory().expect("Failed to open test store")
    }

    fn assignment(title: &str) -> Assignment {
        Assignment::new(title.to_string(), "Maths".to_string(), Utc::now())
    }

    #[tokio::test]
    async fn test_round_trip() {
        let store = setup_store();

        let written = vec![assignment("Problem set 1"), assignment("Essay draft")];
        store.set("assignments", &written).await;

        let read: Vec<Assignment> = store.get("assignments", Vec::new()).await;
        assert_eq!(read.len(), 2);
        assert_eq!(read[0].id, written[0].id);
        assert_eq!(read[1].title, "Essay draft");
    }

    #[tokio::test]
    async fn test_absent_slot_yields_initial() {
        let store = setup_store();

        let read: Vec<Expense> = store.get("expenses", Vec::new()).await;
        assert!(read.is_empty());

        let name: String = store.get("studentHubUserName", "fallback".to_string()).await;
        assert_eq!(name, "fallback");
    }

    #[tokio::test]
    async fn test_mismatched_contents_yield_initial() {
        let store = setup_store();

        store.set("assignments", &"not an array").await;

        let read: Vec<Assignment> = store.get("assignments", Vec::new()).await;
        assert!(read.is_empty());
    }

    #[tokio::test]
    async fn test_update_applies_transform() {
        let store = setup_store();

        store.set("counters", &vec![1u32, 2, 3]).await;
        store
            .update("counters", Vec::new(), |mut v: Vec<u32>| {
                v.push(4);
                v
            })
            .await;

        let read: Vec<u32> = store.get("counters", Vec::new()).await;
        assert_eq!(read, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_remove_clears_slot() {
        let store = setup_store();

        store.set("scratch", &42u32).await;
        store.remove("scratch").await;

        let read: u32 = store.get("scratch", 0).await;
        assert_eq!(read, 0);
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("student_hub.db");

        {
            let store = SlotStore::open(&path).expect("Failed to open store");
            store.set("assignments", &vec![assignment("Survives reopen")]).await;
        }

        let reopened = SlotStore::open(&path).expect("Failed to reopen store");
        let read: Vec<Assignment> = reopened.get("assignments", Vec::new()).await;
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].title, "Survives reopen");
    }

    #[tokio::test]
    async fn test_watcher_observes_write_from_other_handle() {
        let store = setup_store();
        let other = store.clone();

        let mut watcher = other.subscribe("assignments");
        store.set("assignments", &vec![assignment("New")]).await;

        let changed = timeout(Duration::from_secs(1), watcher.changed())
            .await
            .expect("watcher timed out");
        assert!(changed);

        let read: Vec<Assignment> = other.get("assignments", Vec::new()).await;
        assert_eq!(read.len(), 1);
    }

    #[tokio::test]
    async fn test_watcher_skips_other_keys() {
        let store = setup_store();

        let mut watcher = store.subscribe("expenses");
        store.set("assignments", &vec![assignment("Unrelated")]).await;
        store.set("expenses", &vec![1u32]).await;

        let changed = timeout(Duration::from_secs(1), watcher.changed())
            .await
            .expect("watcher timed out");
        assert!(changed);
        assert_eq!(watcher.key(), "expenses");
    }

    #[tokio::test]
    async fn test_collection_append_grows_by_one_with_unique_id() {
        let store = setup_store();
        let collection: SlotCollection<Assignment> = SlotCollection::new(store, "assignments");

        collection.append(assignment("First")).await;
        let before = collection.list().await;

        collection.append(assignment("Second")).await;
        let after = collection.list().await;

        assert_eq!(after.len(), before.len() + 1);
        let new_id = after.last().map(|a| a.id()).expect("appended record");
        assert!(before.iter().all(|a| a.id() != new_id));
    }

    #[tokio::test]
    async fn test_collection_replace_touches_only_target() {
        let store = setup_store();
        let collection: SlotCollection<Assignment> = SlotCollection::new(store, "assignments");

        collection.append(assignment("Keep me")).await;
        collection.append(assignment("Change me")).await;
        let records = collection.list().await;

        let mut target = records[1].clone();
        target.title = "Changed".to_string();
        collection.replace(target).await.expect("replace failed");

        let after = collection.list().await;
        assert_eq!(after[0].title, "Keep me");
        assert_eq!(after[0].id, records[0].id);
        assert_eq!(after[1].title, "Changed");
    }

    #[tokio::test]
    async fn test_collection_replace_missing_is_not_found() {
        let store = setup_store();
        let collection: SlotCollection<Assignment> = SlotCollection::new(store, "assignments");

        let result = collection.replace(assignment("Never stored")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_collection_remove_is_idempotent() {
        let store = setup_store();
        let collection: SlotCollection<Assignment> = SlotCollection::new(store, "assignments");

        collection.append(assignment("Doomed")).await;
        let id = collection.list().await[0].id();

        collection.remove(id).await;
        assert!(collection.list().await.is_empty());

        // Second removal of the same ID is a no-op
        collection.remove(id).await;
        assert!(collection.list().await.is_empty());
    }
}
