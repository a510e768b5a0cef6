pub(crate) mod buffer;
pub(crate) mod composite;
pub(crate) mod compositor;
pub(crate) mod stamp;
pub(crate) mod surface;
