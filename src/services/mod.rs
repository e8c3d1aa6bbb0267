// Author: Dustin Pilgrim
// License: MIT

pub mod idle;
pub mod notify;
pub mod wayland;
pub mod x11;
