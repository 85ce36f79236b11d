use log::debug;

use crate::store::{NicknameStore, StoreError};

/// Greets by nickname when one is stored, otherwise by first name.
pub async fn get_greeting(
    store: &dyn NicknameStore,
    first_name: &str,
) -> Result<String, StoreError> {
    let name = match store.fetch(first_name).await? {
        Some(record) => record.display_name().to_owned(),
        None => first_name.to_owned(),
    };
    debug!("greeting {} as {}", first_name, name);
    Ok(format!("Hello, {}.", name))
}

pub async fn change_nickname(
    store: &dyn NicknameStore,
    first_name: &str,
    nickname: &str,
) -> Result<String, StoreError> {
    store.upsert(first_name, nickname).await?;
    debug!("nickname of {} is now {}", first_name, nickname);
    Ok(nickname.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::UserRecord;

    #[tokio::test]
    async fn greets_unknown_user_by_first_name() {
        let store = MemoryStore::new();
        assert_eq!(get_greeting(&store, "Alice").await.unwrap(), "Hello, Alice.");
    }

    #[tokio::test]
    async fn greets_by_nickname_after_change() {
        let store = MemoryStore::new();
        assert_eq!(change_nickname(&store, "Alice", "Al").await.unwrap(), "Al");
        assert_eq!(get_greeting(&store, "Alice").await.unwrap(), "Hello, Al.");
    }

    #[tokio::test]
    async fn seeded_record_without_nickname() {
        let store = MemoryStore::new();
        store
            .seed(UserRecord {
                first_name: "Bob".to_string(),
                nickname: None,
            })
            .unwrap();
        assert_eq!(get_greeting(&store, "Bob").await.unwrap(), "Hello, Bob.");
    }
}
