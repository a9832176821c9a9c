pub mod storage;

pub use storage::{get_weights_path, load_weights, reset_weights, save_weights, weights_path_for, WEIGHTS_FILE_NAME};
