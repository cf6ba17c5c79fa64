//! Favorites and comparison lists kept in the session.
//!
//! Both are plain product-id lists with toggle semantics; product data is
//! fetched fresh when the page renders.

use tower_sessions::Session;

use bazaar_core::ProductId;

use crate::models::session_keys;

async fn get_ids(session: &Session, key: &str) -> Vec<ProductId> {
    session.get(key).await.ok().flatten().unwrap_or_default()
}

async fn toggle_id(
    session: &Session,
    key: &'static str,
    product_id: ProductId,
) -> Result<bool, tower_sessions::session::Error> {
    let mut ids = get_ids(session, key).await;
    let added = if ids.contains(&product_id) {
        ids.retain(|id| *id != product_id);
        false
    } else {
        ids.push(product_id);
        true
    };
    session.insert(key, &ids).await?;
    Ok(added)
}

/// Product ids the visitor marked as favorites.
pub async fn favorites(session: &Session) -> Vec<ProductId> {
    get_ids(session, session_keys::FAVORITES).await
}

/// Toggle a favorite; returns whether the product is now in the list.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn toggle_favorite(
    session: &Session,
    product_id: ProductId,
) -> Result<bool, tower_sessions::session::Error> {
    toggle_id(session, session_keys::FAVORITES, product_id).await
}

/// Product ids queued for side-by-side comparison.
pub async fn comparison(session: &Session) -> Vec<ProductId> {
    get_ids(session, session_keys::COMPARISON).await
}

/// Toggle a comparison entry; returns whether the product is now in the list.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn toggle_comparison(
    session: &Session,
    product_id: ProductId,
) -> Result<bool, tower_sessions::session::Error> {
    toggle_id(session, session_keys::COMPARISON, product_id).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use super::*;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let session = test_session();
        let id = ProductId::from("p-1");

        assert!(toggle_favorite(&session, id.clone()).await.unwrap());
        assert_eq!(favorites(&session).await, vec![id.clone()]);

        assert!(!toggle_favorite(&session, id).await.unwrap());
        assert!(favorites(&session).await.is_empty());
    }

    #[tokio::test]
    async fn test_lists_are_independent() {
        let session = test_session();
        let id = ProductId::from("p-2");

        toggle_comparison(&session, id.clone()).await.unwrap();
        assert_eq!(comparison(&session).await, vec![id]);
        assert!(favorites(&session).await.is_empty());
    }
}
