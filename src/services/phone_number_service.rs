use crate::domain::phone_number::{PhoneNormalizer, PhoneNumber};
use crate::error::{AppError, Result};
use crate::storage::{InMemoryStore, new_id};
use time::OffsetDateTime;

#[derive(Clone, Debug)]
pub struct PhoneNumberService {
    store: InMemoryStore,
    phones: PhoneNormalizer,
}

impl PhoneNumberService {
    #[must_use]
    pub const fn new(store: InMemoryStore, phones: PhoneNormalizer) -> Self {
        Self { store, phones }
    }

    /// Registers a phone number for `user_id`.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if the name is blank and
    /// `AppError::InvalidPhone` if the phone is not E.164.
    /// Returns `AppError::Conflict` if the user already registered the phone.
    #[tracing::instrument(err(level = "warn"), skip(self, name, phone))]
    pub async fn create(&self, user_id: &str, name: &str, phone: &str) -> Result<PhoneNumber> {
        let name = name.trim();
        if name.is_empty() || phone.trim().is_empty() {
            return Err(AppError::BadRequest("Phone name and number are required.".to_string()));
        }
        let phone = self.phones.normalize(phone)?;

        let phone_number = PhoneNumber {
            id: new_id("phone"),
            user_id: user_id.to_string(),
            name: name.to_string(),
            phone,
            created_at: OffsetDateTime::now_utc(),
        };
        self.store.insert_phone_number(phone_number.clone()).await?;

        tracing::info!(phone_number_id = %phone_number.id, "Phone number registered");
        Ok(phone_number)
    }

    pub async fn list(&self, user_id: &str) -> Vec<PhoneNumber> {
        self.store.list_phone_numbers(user_id).await
    }

    /// # Errors
    /// Returns `AppError::NotFound` if the phone number does not exist.
    pub async fn get(&self, user_id: &str, id: &str) -> Result<PhoneNumber> {
        self.store.find_phone_number(user_id, id).await
    }

    /// # Errors
    /// Returns `AppError::NotFound` if the phone number does not exist.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn delete(&self, user_id: &str, id: &str) -> Result<()> {
        self.store.delete_phone_number(user_id, id).await?;
        tracing::info!("Phone number deleted");
        Ok(())
    }
}
