pub(crate) mod activation;
pub(crate) mod engine;
pub(crate) mod particle;
pub(crate) mod pool;
pub(crate) mod script;
pub(crate) mod spawn;
