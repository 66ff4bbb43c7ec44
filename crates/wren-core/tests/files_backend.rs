use wren_core::{Backend, FileStore};

use tempfile::TempDir;

/// Helper function to create a filesystem store over temp directories
fn create_test_store() -> (TempDir, FileStore) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let store = FileStore::new(temp_dir.path().join("notes"), temp_dir.path().join("done"))
        .expect("Failed to create store");
    (temp_dir, store)
}

#[tokio::test]
async fn test_complete_task_workflow() {
    let (temp_dir, store) = create_test_store();

    let name = store
        .create_task("Buy milk\nfull fat\ntwo liters")
        .await
        .expect("Failed to create task");
    assert_eq!(name, "Buy milk");

    let tasks = store.list_tasks("").await.expect("Failed to list tasks");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0], "Buy milk");

    let content = store
        .task_content("milk")
        .await
        .expect("Failed to fetch content");
    assert_eq!(content, "Buy milk\n\nfull fat\ntwo liters");

    let status = store.mark_done("milk").await.expect("Failed to mark done");
    assert!(status.success);
    assert_eq!(status.message, "marked \"Buy milk\" as done");

    // The file moved to the done directory.
    assert!(!temp_dir.path().join("notes/Buy milk").exists());
    assert!(temp_dir.path().join("done/Buy milk").exists());
    assert!(store.list_tasks("").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_recurring_task_hidden_until_next_occurrence() {
    let (temp_dir, store) = create_test_store();

    store
        .create_task("0 9 * * * Water plants")
        .await
        .expect("Failed to create task");

    // First occurrence: no completion record, so the task is pending.
    let tasks = store.list_tasks("").await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0], "Water plants");

    let status = store.mark_done("Water").await.unwrap();
    assert!(status.success);

    // Completion copies rather than moves, and the fresh record hides
    // the task until the next 09:00 comes around.
    assert!(temp_dir.path().join("notes/0 9 ＊ ＊ ＊ Water plants").exists());
    assert!(temp_dir.path().join("done/0 9 ＊ ＊ ＊ Water plants").exists());
    assert!(store.list_tasks("").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_dated_tasks_filter_by_deadline() {
    let (_temp_dir, store) = create_test_store();

    store.create_task("1990-06-01 Long overdue").await.unwrap();
    store.create_task("2998-06-01 Distant deadline").await.unwrap();

    let tasks = store.list_tasks("").await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0], "Long overdue");
}

#[tokio::test]
async fn test_listing_query_filters_names() {
    let (_temp_dir, store) = create_test_store();

    store.create_task("Water plants").await.unwrap();
    store.create_task("Buy milk").await.unwrap();

    let tasks = store.list_tasks("plants").await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0], "Water plants");
}

#[tokio::test]
async fn test_ambiguous_lookup_is_a_message_not_a_crash() {
    let (_temp_dir, store) = create_test_store();

    store.create_task("Water plants").await.unwrap();
    store.create_task("Re-pot the plants").await.unwrap();

    let status = store.mark_done("plant").await.unwrap();
    assert!(!status.success);
    assert_eq!(status.message, "Error: Multiple matching files found.");

    let content = store.task_content("plant").await.unwrap();
    assert_eq!(content, "Error: Multiple matching files found.");
}

#[tokio::test]
async fn test_missing_lookup_names_the_query() {
    let (_temp_dir, store) = create_test_store();

    let status = store.mark_done("laundry").await.unwrap();
    assert!(!status.success);
    assert_eq!(status.message, "Error: No matching file for 'laundry' found.");
}
