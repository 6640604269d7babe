pub mod check;
pub mod inflate;

pub use check::{check, CheckArgs};
pub use inflate::{inflate, InflateArgs};
