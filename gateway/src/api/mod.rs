pub mod contact;
pub mod contacts_proxy;
pub mod health;
pub mod utils;
