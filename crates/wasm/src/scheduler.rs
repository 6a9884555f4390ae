//! [`Scheduler`] backed by `requestAnimationFrame`.

use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use villani_core::{FrameCallback, FrameToken, Scheduler};

use crate::dom;

#[derive(Debug, Clone, Copy, Default)]
pub struct RafScheduler;

impl Scheduler for RafScheduler {
    fn schedule_next(&self, callback: FrameCallback) -> Option<FrameToken> {
        let window = dom::window()?;
        let closure = Closure::once_into_js(move || callback());
        match window.request_animation_frame(closure.unchecked_ref()) {
            Ok(id) => Some(FrameToken::new(u64::from(id.unsigned_abs()))),
            Err(e) => {
                warn!(error = ?e, "requestAnimationFrame failed");
                None
            }
        }
    }

    fn cancel(&self, token: FrameToken) {
        let (Some(window), Ok(id)) = (dom::window(), i32::try_from(token.raw())) else {
            return;
        };
        window.cancel_animation_frame(id).ok();
    }
}
