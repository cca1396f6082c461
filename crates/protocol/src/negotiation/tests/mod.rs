pub(super) use super::{Negotiated, Negotiator, negotiate};

mod common;
