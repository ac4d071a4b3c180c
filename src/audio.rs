//! Background music
//!
//! A single looping `<audio>` track. Browsers usually block autoplay until the
//! page gets a user gesture, so playback is retried on every click until it
//! sticks. Failures are logged and otherwise ignored.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

/// Looping background track
pub struct BackgroundMusic {
    element: Option<HtmlAudioElement>,
    playing: Rc<Cell<bool>>,
}

impl BackgroundMusic {
    pub fn new(src: &str, volume: f64) -> Self {
        let element = HtmlAudioElement::new_with_src(src).ok();
        match &element {
            Some(audio) => {
                audio.set_loop(true);
                audio.set_volume(volume);
            }
            None => log::warn!("Failed to create audio element - music disabled"),
        }
        Self {
            element,
            playing: Rc::new(Cell::new(false)),
        }
    }

    /// Music-less placeholder
    pub fn disabled() -> Self {
        Self {
            element: None,
            playing: Rc::new(Cell::new(false)),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }

    /// Start playback if it is not already running (fire-and-forget)
    pub fn resume(&self) {
        if self.playing.get() {
            return;
        }
        let Some(audio) = &self.element else { return };

        let promise = match audio.play() {
            Ok(promise) => promise,
            Err(e) => {
                log::warn!("Music playback failed: {:?}", e);
                return;
            }
        };

        let playing = self.playing.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => {
                    playing.set(true);
                    log::info!("Background music playing");
                }
                // Autoplay policy; retried on the next click
                Err(e) => log::warn!("Music blocked: {:?}", e),
            }
        });
    }
}
