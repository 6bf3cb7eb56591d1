/// Config key selecting the algorithm a block implements.
pub const UNIT_TYPE_KEY: &str = "unit_type";
/// Config key the service stamps with its asset directory before binding a block.
pub const SDK_PATH_KEY: &str = "@sdk_path";
/// Config key holding the resolved model asset path (caller-supplied values win).
pub const MODEL_PATH_KEY: &str = "model_path";
/// Directory under the service root that must exist for the service to start.
pub const MODELS_DIR: &str = "data/models";

/// Detections below this confidence are dropped (face detector).
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;
/// Overlap above which the weaker of two detections is suppressed (face detector).
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;
/// Squared L2 distance below which two templates are the same person (matcher).
pub const DEFAULT_MATCHER_THRESHOLD: f64 = 1.175;
