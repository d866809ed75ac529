/// Job directory discovery and output naming.
pub mod layout;
