//! Scroll-triggered entrance animations.
//!
//! Each registered element owns a trigger zone in virtual scroll space. Crossing into the zone
//! plays its effect; crossing out reverses it under [`element::ReplayPolicy::PlayReversePlay`],
//! or only when crossing back above the start under
//! [`element::ReplayPolicy::PlayReverseOnLeaveBack`].

pub(crate) mod controller;
pub(crate) mod element;
