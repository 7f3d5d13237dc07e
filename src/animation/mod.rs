pub(crate) mod ease;
pub(crate) mod interpolate;
pub(crate) mod motion;
pub(crate) mod ops;
pub(crate) mod spring;
