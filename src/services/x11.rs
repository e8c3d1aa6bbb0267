// Author: Dustin Pilgrim
// License: MIT

use x11rb::connection::{Connection, RequestConnection};
use x11rb::protocol::screensaver;
use x11rb::protocol::xproto::Window;
use x11rb::rust_connection::RustConnection;

use super::idle::{IdleError, IdleSampler};

/// Idle time from the MIT-SCREEN-SAVER extension on the default screen's root.
pub struct X11Sampler {
    conn: RustConnection,
    root: Window,
}

impl X11Sampler {
    pub fn connect() -> Result<Self, IdleError> {
        let (conn, screen_num) =
            x11rb::connect(None).map_err(|e| IdleError::Connect(e.to_string()))?;

        let present = conn
            .extension_information(screensaver::X11_EXTENSION_NAME)
            .map_err(|e| IdleError::Query(e.to_string()))?
            .is_some();
        if !present {
            return Err(IdleError::MissingExtension(screensaver::X11_EXTENSION_NAME));
        }

        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| IdleError::Connect(format!("screen {screen_num} does not exist")))?;

        eventline::debug!("x11: connected, screen={} root=0x{:x}", screen_num, root);
        Ok(Self { conn, root })
    }
}

impl IdleSampler for X11Sampler {
    fn sample(&mut self) -> Result<u64, IdleError> {
        let info = screensaver::query_info(&self.conn, self.root)
            .map_err(|e| IdleError::Query(e.to_string()))?
            .reply()
            .map_err(|e| IdleError::Query(e.to_string()))?;

        Ok(u64::from(info.ms_since_user_input))
    }

    fn name(&self) -> &'static str {
        "x11"
    }
}
