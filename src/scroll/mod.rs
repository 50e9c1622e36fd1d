pub(crate) mod scrub;
pub(crate) mod smooth;
