//! Consumer profile reads

use kredit_core::{ConsumerProfile, DomainError, DomainResult, Store};

pub struct ConsumerUsecase<S> {
    store: S,
}

impl<S: Store> ConsumerUsecase<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Profile of the consumer logged in with `phone_number`.
    pub async fn profile_by_phone(&self, phone_number: &str) -> DomainResult<ConsumerProfile> {
        let consumer = self
            .store
            .find_consumer_by_phone(phone_number)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("consumer with phone {phone_number}")))?;
        Ok(ConsumerProfile::from(&consumer))
    }

    /// Profile by NIK (operational lookups).
    pub async fn profile_by_nik(&self, nik: &str) -> DomainResult<ConsumerProfile> {
        let consumer = self
            .store
            .find_consumer_by_nik(nik)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("consumer {nik}")))?;
        Ok(ConsumerProfile::from(&consumer))
    }
}
