pub mod account;
pub mod login;
pub mod logout;
pub mod posts;
pub mod register;
pub mod reset;
