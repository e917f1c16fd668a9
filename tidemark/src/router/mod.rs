pub mod bulk;
pub mod ladder;
pub mod resolve;
pub mod status;
pub mod synthesize;

pub mod util;
