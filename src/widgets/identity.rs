//! Remembered User Identity
//!
//! The display name used for laundry bookings, kept in its own slot. The
//! booking widget takes the name as an explicit constructor argument; these
//! helpers are how the shell resolves and persists it.

use crate::store::SlotStore;

/// Slot holding the remembered display name
pub const USER_NAME_SLOT: &str = "studentHubUserName";

/// The remembered display name, if one was ever saved
pub async fn remembered_user(store: &SlotStore) -> Option<String> {
    let name: String = store.get(USER_NAME_SLOT, String::new()).await;
    if name.trim().is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Persist the display name for future sessions
pub async fn remember_user(store: &SlotStore, name: &str) {
    store.set(USER_NAME_SLOT, &name).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_remember_and_recall() {
        let store = SlotStore::open_in_memory().unwrap();
        assert_eq!(remembered_user(&store).await, None);

        remember_user(&store, "Asha").await;
        assert_eq!(remembered_user(&store).await.as_deref(), Some("Asha"));
    }
}
