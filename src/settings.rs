use crate::renderer::RenderBatch;
use crate::scene::sorter::{
    BlendSorter, ComparisonSorter, GroupingSorter, ProgramGroupingSorter, SortStability, Sorter,
    Unsorted,
};
use glam::Vec3;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Comparison sort at the bottom of a branch, inside each program group
/// when grouping is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafOrder {
    /// No comparison sort; batches keep their extraction order.
    Unsorted,
    FrontToBack,
    BackToFront,
    ProgramId,
}

#[derive(Debug)]
enum ReadError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(err) => write!(f, "read error: {}", err),
            ReadError::Parse(err) => write!(f, "parse error: {}", err),
        }
    }
}

/// Declarative description of the sorter chain, read from `sorter.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SorterSettings {
    #[serde(default = "SorterSettings::default_true")]
    pub separate_blended: bool,
    #[serde(default = "SorterSettings::default_true")]
    pub group_by_program: bool,
    #[serde(default = "SorterSettings::default_opaque_order")]
    pub opaque_order: LeafOrder,
    #[serde(default = "SorterSettings::default_blended_order")]
    pub blended_order: LeafOrder,
    #[serde(default)]
    pub stability: SortStability,
    #[serde(default)]
    pub camera: [f32; 3],
}

impl Default for SorterSettings {
    fn default() -> Self {
        Self {
            separate_blended: true,
            group_by_program: true,
            opaque_order: Self::default_opaque_order(),
            blended_order: Self::default_blended_order(),
            stability: SortStability::default(),
            camera: [0.0; 3],
        }
    }
}

impl SorterSettings {
    pub fn load() -> Self {
        Self::load_from_path("sorter.json")
    }

    /// Never fails: a missing or broken file yields the defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(settings) => {
                info!("Loaded sorter settings from {:?}", path);
                settings.validate()
            }
            Err(ReadError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                info!("No sorter settings at {:?}; using defaults", path);
                SorterSettings::default()
            }
            Err(err) => {
                warn!("Ignoring {:?} ({}); using default sorter settings", path, err);
                SorterSettings::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self, ReadError> {
        let contents = std::fs::read_to_string(path).map_err(ReadError::Io)?;
        serde_json::from_str(&contents).map_err(ReadError::Parse)
    }

    fn validate(mut self) -> Self {
        if self.separate_blended && self.blended_order == LeafOrder::FrontToBack {
            warn!("Blended batches cannot be drawn front to back. Using back to front instead.");
            self.blended_order = Self::default_blended_order();
        }

        if !self.camera.iter().all(|c| c.is_finite()) {
            warn!("Camera position must be finite. Using the origin.");
            self.camera = [0.0; 3];
        }

        self
    }

    pub fn camera_position(&self) -> Vec3 {
        Vec3::from_array(self.camera)
    }

    /// Wires up the configured chain. Unused stages are left out, so the
    /// default settings give blend -> program -> depth.
    pub fn build(&self) -> Arc<dyn Sorter<RenderBatch>> {
        if self.separate_blended {
            let mut blend: BlendSorter<RenderBatch> = BlendSorter::opaque_first();
            blend.set_branch_a(self.branch(self.opaque_order));
            blend.set_branch_b(self.branch(self.blended_order));
            return Arc::new(blend);
        }

        match self.branch(self.opaque_order) {
            Some(sorter) => sorter,
            None => Arc::new(Unsorted),
        }
    }

    fn branch(&self, order: LeafOrder) -> Option<Arc<dyn Sorter<RenderBatch>>> {
        let leaf = self.leaf(order);
        if !self.group_by_program {
            return leaf;
        }

        let grouping: ProgramGroupingSorter<RenderBatch> = GroupingSorter::by_program(leaf);
        Some(Arc::new(grouping))
    }

    fn leaf(&self, order: LeafOrder) -> Option<Arc<dyn Sorter<RenderBatch>>> {
        let camera = self.camera_position();
        let sorter = match order {
            LeafOrder::Unsorted => return None,
            LeafOrder::FrontToBack => ComparisonSorter::front_to_back(camera),
            LeafOrder::BackToFront => ComparisonSorter::back_to_front(camera),
            LeafOrder::ProgramId => ComparisonSorter::by_program(),
        };

        Some(Arc::new(sorter.with_stability(self.stability)))
    }

    const fn default_true() -> bool {
        true
    }

    const fn default_opaque_order() -> LeafOrder {
        LeafOrder::FrontToBack
    }

    const fn default_blended_order() -> LeafOrder {
        LeafOrder::BackToFront
    }
}
