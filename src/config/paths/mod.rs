//! Config path resolution.

pub mod xdg_root;
