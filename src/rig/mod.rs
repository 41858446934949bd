pub(crate) mod camera;
