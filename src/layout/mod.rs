pub mod ad;
pub mod wrap;
