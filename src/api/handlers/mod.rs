pub mod access;
pub mod announcements;
pub mod favorites;
pub mod responses;
pub mod root;
pub mod users;
