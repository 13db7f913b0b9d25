pub mod controller;
pub mod sampler;
pub mod state;
pub mod store;
pub mod synthetic;

pub use controller::SamplerController;
pub use state::{SamplerState, SamplerStatus};
pub use store::{ReadingStore, ReadingStoreHandle, DEFAULT_SPAN_HOURS};
