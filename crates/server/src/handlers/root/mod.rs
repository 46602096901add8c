mod get_root;

pub use get_root::{RootResponse, get_root};
