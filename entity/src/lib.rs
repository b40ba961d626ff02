pub mod post;
pub mod user;

/*
 A user owns posts. Accounts are created through registration, mutated by the
 account page or a password reset, and never deleted. Posts hang off their
 author and are only ever listed newest-first, five to a page.
 */
