//! Credit limit listing
//!
//! Read-only view of a consumer's provisioned limits. The caller is
//! identified by phone number (the login handle); the requested NIK
//! must belong to that same consumer.

use kredit_core::{DomainError, DomainResult, LimitView, Store};

pub struct LimitUsecase<S> {
    store: S,
}

impl<S: Store> LimitUsecase<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All limits for `nik`, tenor ascending.
    ///
    /// Fails `Unauthorized` when the phone-resolved consumer is not the
    /// owner of `nik` - limits are never shown across consumers.
    pub async fn limits_for_consumer(
        &self,
        phone_number: &str,
        nik: &str,
    ) -> DomainResult<Vec<LimitView>> {
        let consumer = self
            .store
            .find_consumer_by_phone(phone_number)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("consumer with phone {phone_number}")))?;

        if consumer.nik != nik {
            return Err(DomainError::Unauthorized(
                "NIK does not belong to the authenticated consumer".to_string(),
            ));
        }

        let limits = self.store.list_limits(nik).await?;
        Ok(limits.iter().map(LimitView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use kredit_core::{Consumer, CreditLimit, ErrorKind};
    use kredit_persistence::MemoryStore;
    use rust_decimal_macros::dec;

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .seed_consumer(Consumer {
                nik: "C1".to_string(),
                phone_number: "0811".to_string(),
                password_hash: "hash".to_string(),
                full_name: "Siti Rahayu".to_string(),
                legal_name: "Siti Rahayu".to_string(),
                birth_place: "Surabaya".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1995, 3, 2).unwrap(),
                salary: dec!(9000000),
                ktp_photo_path: "/docs/ktp.jpg".to_string(),
                selfie_photo_path: "/docs/selfie.jpg".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .await;
        for (tenor, amount) in [(12, dec!(10000000)), (6, dec!(5000000))] {
            store
                .seed_limit(CreditLimit {
                    consumer_nik: "C1".to_string(),
                    tenor,
                    limit_amount: amount,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
                .await;
        }
        store
    }

    #[tokio::test]
    async fn test_lists_own_limits_sorted() {
        let usecase = LimitUsecase::new(seeded_store().await);
        let limits = usecase.limits_for_consumer("0811", "C1").await.unwrap();
        assert_eq!(limits.len(), 2);
        assert_eq!(limits[0].tenor, 6);
        assert_eq!(limits[1].limit_amount, dec!(10000000));
    }

    #[tokio::test]
    async fn test_foreign_nik_unauthorized() {
        let usecase = LimitUsecase::new(seeded_store().await);
        let err = usecase.limits_for_consumer("0811", "C2").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_unknown_phone_not_found() {
        let usecase = LimitUsecase::new(seeded_store().await);
        let err = usecase.limits_for_consumer("0999", "C1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
