pub(crate) mod sink;
pub(crate) mod timer;
pub(crate) mod trail_session;
