//! Consumer identity and profile
//!
//! Consumers are keyed by NIK (the national identity number) and log in
//! with their phone number. Both are unique; the NIK is immutable once
//! the record exists. This crate only ever reads consumers - onboarding
//! and profile updates live outside the financing core.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A consumer record as stored in the directory.
///
/// `password_hash` is an opaque credential produced by an external
/// hashing collaborator. It is never serialized into responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consumer {
    pub nik: String,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub legal_name: String,
    pub birth_place: String,
    pub birth_date: NaiveDate,
    pub salary: Decimal,
    pub ktp_photo_path: String,
    pub selfie_photo_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public profile view - everything except the credential hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerProfile {
    pub nik: String,
    pub phone_number: String,
    pub full_name: String,
    pub legal_name: String,
    pub birth_place: String,
    pub birth_date: NaiveDate,
    pub salary: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<&Consumer> for ConsumerProfile {
    fn from(consumer: &Consumer) -> Self {
        Self {
            nik: consumer.nik.clone(),
            phone_number: consumer.phone_number.clone(),
            full_name: consumer.full_name.clone(),
            legal_name: consumer.legal_name.clone(),
            birth_place: consumer.birth_place.clone(),
            birth_date: consumer.birth_date,
            salary: consumer.salary,
            created_at: consumer.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_consumer() -> Consumer {
        Consumer {
            nik: "3175031234560001".to_string(),
            phone_number: "081234567890".to_string(),
            password_hash: "$argon2id$opaque".to_string(),
            full_name: "Budi Santoso".to_string(),
            legal_name: "Budi Santoso".to_string(),
            birth_place: "Jakarta".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            salary: dec!(12000000),
            ktp_photo_path: "/docs/ktp/budi.jpg".to_string(),
            selfie_photo_path: "/docs/selfie/budi.jpg".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_drops_credential_hash() {
        let consumer = sample_consumer();
        let profile = ConsumerProfile::from(&consumer);
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("3175031234560001"));
    }

    #[test]
    fn test_consumer_serialization_hides_hash() {
        let consumer = sample_consumer();
        let json = serde_json::to_string(&consumer).unwrap();
        assert!(!json.contains("password_hash"));
    }
}
