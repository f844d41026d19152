pub mod escape;
pub mod path_utils;
