pub(crate) mod observer;
pub(crate) mod renderer;
pub(crate) mod scene;
pub(crate) mod shape;
pub(crate) mod stroke;
