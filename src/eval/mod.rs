pub(crate) mod blocks;
pub(crate) mod evaluator;
pub(crate) mod node;
