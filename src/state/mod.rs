mod draw_state;
mod persistence;

pub use draw_state::DrawState;
#[cfg(not(target_arch = "wasm32"))]
pub use persistence::FileStore;
#[cfg(target_arch = "wasm32")]
pub use persistence::LocalStorageStore;
pub use persistence::{
    CanvasStorage,
    KeyValueStore,
    MemoryStore,
    PersistenceError,
    PersistenceResult,
    DEFAULT_STORAGE_KEY,
};
