//! Project domain module

mod label;

pub use label::{ProjectLabel, MAX_LABEL_LEN};
