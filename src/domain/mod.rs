pub mod conversation;
pub mod message;
pub mod pagination;
pub mod phone_number;
