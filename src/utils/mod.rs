pub mod flash;
pub mod mail;
pub mod password;
pub mod session;
pub mod token;
pub mod upload;
pub mod webutils;
