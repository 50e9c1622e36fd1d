pub(crate) mod controller;
pub(crate) mod follower;
pub(crate) mod hover;
