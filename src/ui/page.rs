//! Host page integration.
//!
//! On the web the page body must not scroll behind an open detail view. On
//! native there is no page; the lock only tracks state.

#[derive(Debug, Default)]
pub struct PageScrollLock {
    locked: bool,
}

impl PageScrollLock {
    /// Applies `locked` to the page if it changed since the last call.
    pub fn sync(&mut self, locked: bool) {
        if self.locked == locked {
            return;
        }
        self.locked = locked;
        log::debug!("Page scroll {}", if locked { "locked" } else { "restored" });
        set_body_overflow(if locked { "hidden" } else { "" });
    }
}

#[cfg(target_arch = "wasm32")]
fn set_body_overflow(value: &str) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        log::warn!("No document body to lock scrolling on");
        return;
    };

    if let Err(e) = body.style().set_property("overflow", value) {
        log::warn!("Failed to set body overflow: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn set_body_overflow(_value: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_tracks_changes() {
        let mut lock = PageScrollLock::default();
        assert!(!lock.locked);
        lock.sync(true);
        assert!(lock.locked);
        lock.sync(true);
        assert!(lock.locked);
        lock.sync(false);
        assert!(!lock.locked);
    }
}
