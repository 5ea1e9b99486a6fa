mod notification;
mod reminder;
mod shared;
mod status;

pub use crate::notification::api::*;
pub use crate::reminder::api::*;
pub use crate::shared::api::*;
pub use crate::status::api::*;
