pub(crate) mod refs;
