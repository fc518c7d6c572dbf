pub mod announcement;
pub mod favorite;
pub mod notification;
pub mod profile;
pub mod response;
pub mod user;

pub use announcement::*;
pub use favorite::*;
pub use notification::*;
pub use profile::*;
pub use response::*;
pub use user::*;
