pub(crate) mod paths;
pub(crate) mod spline;
