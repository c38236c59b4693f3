//! Command handlers, one module per command group.

pub mod init;
pub mod insights;
pub mod items;
pub mod misc;
pub mod remind;
pub mod sync;
pub mod transfer;
pub mod wishlist;
