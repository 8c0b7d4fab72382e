use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod logger;

pub use logger::init_logging;

#[wasm_bindgen]
pub struct Editor { pub(crate) inner: wxpath::Editor }

impl Editor {
    pub fn rs_new() -> Editor { Editor { inner: wxpath::Editor::new() } }
    pub fn rs_version(&self) -> u64 { self.inner.version() }
}
