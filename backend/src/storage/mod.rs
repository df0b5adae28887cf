pub mod memory;
pub mod traits;

pub use memory::InMemoryChartStore;
pub use traits::{ChartLookup, ChartMutations};
