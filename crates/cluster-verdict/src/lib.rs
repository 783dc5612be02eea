//! cluster-verdict — judge instrument-cluster screen captures against their
//! references, with a hosted vision model or a local pixel diff.

pub mod capture;
pub mod comparator;
pub mod diff;
pub mod prompt;
pub mod remote;
pub mod types;

pub use capture::{decode_png_base64, encode_png_base64, load_from_file, png_data_url, Raster};
pub use comparator::Comparator;
pub use diff::{difference_bbox, difference_image, LocalComparator};
pub use prompt::{find_label, SizeClass, FULL_FRAME_MIN_PX};
pub use remote::{RemoteComparator, RemoteConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use types::*;
