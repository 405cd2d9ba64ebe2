//! Join rows linking Users to Cards.

use crate::domain::{CardId, TimeMs, UserCard, UserCardId, UserId};
use crate::error::StoreError;
use tracing::debug;

use super::{user_card_from_row, Repository};

const INSERT_USER_CARD: &str =
    "INSERT INTO user_cards (user_id, card_id, created_at, updated_at) VALUES (?, ?, ?, ?)";

impl Repository {
    /// Link an existing User to an existing Card.
    ///
    /// # Errors
    /// Returns `StoreError::ReferentialIntegrity` if either side does not exist.
    pub async fn link_user_card(
        &self,
        user_id: UserId,
        card_id: CardId,
    ) -> Result<UserCard, StoreError> {
        let now = TimeMs::now();
        self.record_round_trip();
        let result = sqlx::query(INSERT_USER_CARD)
            .bind(user_id.as_i64())
            .bind(card_id.as_i64())
            .bind(now.as_i64())
            .bind(now.as_i64())
            .execute(self.pool())
            .await?;

        Ok(UserCard {
            id: UserCardId::new(result.last_insert_rowid()),
            user_id,
            card_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Insert many links in a single transaction.
    ///
    /// Either every link is written or none is. Returns the number inserted.
    ///
    /// # Errors
    /// Returns `StoreError::ReferentialIntegrity` if any pair references a
    /// missing row; the transaction is rolled back.
    pub async fn link_user_cards_batch(
        &self,
        links: &[(UserId, CardId)],
    ) -> Result<usize, StoreError> {
        if links.is_empty() {
            return Ok(0);
        }

        let now = TimeMs::now();
        let mut tx = self.pool().begin().await?;

        for (user_id, card_id) in links {
            self.record_round_trip();
            sqlx::query(INSERT_USER_CARD)
                .bind(user_id.as_i64())
                .bind(card_id.as_i64())
                .bind(now.as_i64())
                .bind(now.as_i64())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        debug!(links = links.len(), "Inserted user_cards batch");
        Ok(links.len())
    }

    /// Remove a single join row. Returns false if it did not exist.
    pub async fn unlink_user_card(&self, id: UserCardId) -> Result<bool, StoreError> {
        self.record_round_trip();
        let result = sqlx::query("DELETE FROM user_cards WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Join rows owned by a User, ordered by id. Duplicated pairs are kept.
    pub async fn user_cards_for_user(&self, user_id: UserId) -> Result<Vec<UserCard>, StoreError> {
        self.record_round_trip();
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, card_id, created_at, updated_at
            FROM user_cards
            WHERE user_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(self.pool())
        .await?;

        Ok(rows.iter().map(user_card_from_row).collect())
    }

    /// Join rows pointing at a Card, ordered by id. Duplicated pairs are kept.
    pub async fn user_cards_for_card(&self, card_id: CardId) -> Result<Vec<UserCard>, StoreError> {
        self.record_round_trip();
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, card_id, created_at, updated_at
            FROM user_cards
            WHERE card_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(card_id.as_i64())
        .fetch_all(self.pool())
        .await?;

        Ok(rows.iter().map(user_card_from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::repo::test_support::setup_test_db;
    use crate::domain::{CardId, UserId};
    use crate::error::StoreError;

    #[tokio::test]
    async fn test_link_and_list_user_cards() {
        let (repo, _temp) = setup_test_db().await;

        let user = repo.insert_user().await.unwrap();
        let card = repo.insert_card("hello").await.unwrap();
        let link = repo.link_user_card(user.id, card.id).await.unwrap();

        let links = repo.user_cards_for_user(user.id).await.unwrap();
        assert_eq!(links, vec![link]);
    }

    #[tokio::test]
    async fn test_user_cards_for_card_lists_every_edge() {
        let (repo, _temp) = setup_test_db().await;

        let a = repo.insert_user().await.unwrap();
        let b = repo.insert_user().await.unwrap();
        let card = repo.insert_card("hello").await.unwrap();
        let other = repo.insert_card("bye").await.unwrap();
        let first = repo.link_user_card(a.id, card.id).await.unwrap();
        repo.link_user_card(a.id, other.id).await.unwrap();
        let second = repo.link_user_card(b.id, card.id).await.unwrap();
        let third = repo.link_user_card(b.id, card.id).await.unwrap();

        let links = repo.user_cards_for_card(card.id).await.unwrap();
        assert_eq!(links, vec![first, second, third]);
        assert!(repo
            .user_cards_for_card(CardId::new(404))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_pairs_are_allowed() {
        let (repo, _temp) = setup_test_db().await;

        let user = repo.insert_user().await.unwrap();
        let card = repo.insert_card("hello").await.unwrap();
        repo.link_user_card(user.id, card.id).await.unwrap();
        repo.link_user_card(user.id, card.id).await.unwrap();

        assert_eq!(repo.user_cards_for_user(user.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_link_missing_user_is_referential_integrity_error() {
        let (repo, _temp) = setup_test_db().await;

        let card = repo.insert_card("hello").await.unwrap();
        let err = repo
            .link_user_card(UserId::new(404), card.id)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ReferentialIntegrity(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_batch_rolls_back_on_missing_card() {
        let (repo, _temp) = setup_test_db().await;

        let user = repo.insert_user().await.unwrap();
        let card = repo.insert_card("hello").await.unwrap();
        let err = repo
            .link_user_cards_batch(&[(user.id, card.id), (user.id, CardId::new(404))])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::ReferentialIntegrity(_)), "{err:?}");
        assert!(repo.user_cards_for_user(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unlink_user_card() {
        let (repo, _temp) = setup_test_db().await;

        let user = repo.insert_user().await.unwrap();
        let card = repo.insert_card("hello").await.unwrap();
        let link = repo.link_user_card(user.id, card.id).await.unwrap();

        assert!(repo.unlink_user_card(link.id).await.unwrap());
        assert!(!repo.unlink_user_card(link.id).await.unwrap());
        assert!(repo.get_card(card.id).await.unwrap().is_some());
    }
}
