pub mod cache;
pub mod element;
pub mod fingerprint;
pub mod source;
pub mod tree;
