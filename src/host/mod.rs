pub(crate) mod headless;
pub(crate) mod ports;
