pub(crate) mod frame_clock;
