pub mod asset;
pub mod renderer;
pub mod scene;
pub mod settings;

pub use renderer::{RenderBatch, RenderQueue, SortStats, SortableBatch};
pub use scene::sorter::{
    BinaryPartitionSorter, BlendSorter, ComparisonSorter, GroupingSorter, Partition,
    ProgramGroupingSorter, SortError, SortStability, Sorter, Unsorted,
};
pub use settings::SorterSettings;

pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
