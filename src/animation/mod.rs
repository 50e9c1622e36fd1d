pub(crate) mod ease;
pub(crate) mod marquee;
pub(crate) mod runner;
pub(crate) mod scramble;
pub(crate) mod style;
pub(crate) mod timeline;
pub(crate) mod tween;
