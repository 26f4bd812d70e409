use crate::domain::phone_number::PhoneNumber;
use crate::error::{AppError, Result};
use crate::storage::InMemoryStore;

impl InMemoryStore {
    /// Stores a phone number.
    ///
    /// # Errors
    /// Returns `AppError::Conflict` if the owner already has this phone or
    /// the id is taken.
    #[tracing::instrument(level = "debug", skip(self, phone_number), fields(id = %phone_number.id))]
    pub async fn insert_phone_number(&self, phone_number: PhoneNumber) -> Result<()> {
        let mut tables = self.tables.write().await;

        if tables.phone_numbers.iter().any(|p| p.id == phone_number.id) {
            return Err(AppError::Conflict(format!("Phone number id {} already exists", phone_number.id)));
        }
        if tables.phone_numbers.iter().any(|p| p.user_id == phone_number.user_id && p.phone == phone_number.phone) {
            return Err(AppError::Conflict("That phone number already exists.".to_string()));
        }

        tables.phone_numbers.push(phone_number);
        Ok(())
    }

    /// Phone numbers owned by `user_id`, in creation order.
    pub async fn list_phone_numbers(&self, user_id: &str) -> Vec<PhoneNumber> {
        let tables = self.tables.read().await;
        tables.phone_numbers.iter().filter(|p| p.user_id == user_id).cloned().collect()
    }

    /// # Errors
    /// Returns `AppError::NotFound` if `user_id` owns no phone number `id`.
    pub async fn find_phone_number(&self, user_id: &str, id: &str) -> Result<PhoneNumber> {
        let tables = self.tables.read().await;
        tables.phone_numbers.iter().find(|p| p.user_id == user_id && p.id == id).cloned().ok_or(AppError::NotFound)
    }

    /// Deletes a phone number together with its conversations.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if `user_id` owns no phone number `id`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn delete_phone_number(&self, user_id: &str, id: &str) -> Result<()> {
        let mut tables = self.tables.write().await;

        let before = tables.phone_numbers.len();
        tables.phone_numbers.retain(|p| !(p.user_id == user_id && p.id == id));
        if tables.phone_numbers.len() == before {
            return Err(AppError::NotFound);
        }

        let conversations_before = tables.conversations.len();
        tables.conversations.retain(|c| !(c.user_id == user_id && c.phone_number_id == id));
        let removed = conversations_before - tables.conversations.len();
        if removed > 0 {
            tracing::debug!(removed, "Deleted conversations of removed phone number");
        }

        Ok(())
    }
}
