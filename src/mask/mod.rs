/// File-backed mask loading.
pub mod load;
/// Mask volume and plane views.
pub mod volume;
