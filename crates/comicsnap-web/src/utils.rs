use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use futures::{
    future::{abortable, AbortHandle},
    Future,
};
use futures_signals::signal::Mutable;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Storage, Window};

thread_local! {
    static WINDOW: Window = web_sys::window().unwrap_throw();
    static LOCAL_STORAGE: Storage = WINDOW.with(|w| w.local_storage().unwrap_throw().unwrap_throw());
    static API_HOST: RefCell<String> = RefCell::new("".to_string());
}

pub struct AsyncState {
    id: usize,
    handle: AbortHandle,
}

impl AsyncState {
    fn new(handle: AbortHandle) -> Self {
        static ID: AtomicUsize = AtomicUsize::new(0);
        let id = ID.fetch_add(1, Ordering::SeqCst);

        Self { id, handle }
    }
}

/// Runs one page-level load at a time; starting a new load aborts the old one.
pub struct AsyncLoader {
    loading: Mutable<Option<AsyncState>>,
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncLoader {
    pub fn new() -> Self {
        Self {
            loading: Mutable::new(None),
        }
    }

    pub fn replace(&self, value: Option<AsyncState>) {
        let mut loading = self.loading.lock_mut();
        if let Some(state) = loading.as_mut() {
            state.handle.abort();
        }
        *loading = value;
    }

    pub fn load<F>(&self, fut: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let (fut, handle) = abortable(fut);

        let state = AsyncState::new(handle);
        let id = state.id;

        self.replace(Some(state));

        let loading = self.loading.clone();

        spawn_local(async move {
            match fut.await {
                Ok(()) => {
                    let mut loading = loading.lock_mut();

                    if let Some(current_id) = loading.as_ref().map(|x| x.id) {
                        if current_id == id {
                            *loading = None;
                        }
                    }
                }
                Err(e) => {
                    debug!("load aborted: {}", e);
                }
            }
        });
    }
}

/// Resolves the API base. Requests go to the page origin unless the page
/// sets `window.__COMICSNAP_API__`.
pub fn initialize_urls() {
    let api_host = match js_sys::eval("window.__COMICSNAP_API__") {
        Ok(val) if val.is_string() => val.as_string().unwrap_or_default(),
        _ => window()
            .location()
            .origin()
            .unwrap_throw(),
    };

    info!("api host: {}", api_host);
    API_HOST.with(|s| *s.borrow_mut() = api_host.trim_end_matches('/').to_string());
}

pub fn api_host() -> String {
    API_HOST.with(|v| v.borrow().clone())
}

pub fn api_url(path: &str) -> String {
    format!("{}{}", api_host(), path)
}

/// Leaves the app for a page it does not render.
pub fn hard_navigate(url: &str) -> Result<(), anyhow::Error> {
    window()
        .location()
        .set_href(url)
        .map_err(|e| anyhow!("error navigate to {}: {:?}", url, e))
}

pub fn window() -> Window {
    WINDOW.with(|s| s.clone())
}

pub fn local_storage() -> Storage {
    LOCAL_STORAGE.with(|s| s.clone())
}

