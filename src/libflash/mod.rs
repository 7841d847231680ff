pub mod card;
pub mod deck;
pub mod error;
pub mod question;
pub mod render;
pub mod session;
pub mod source;
