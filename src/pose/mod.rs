pub(crate) mod craft;
pub(crate) mod entity;
