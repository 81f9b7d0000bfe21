pub mod prelude;

pub mod customer;
pub mod item;
pub mod review;

use std::fmt;

/// Renders a nullable column the way the model representations expect.
pub(crate) struct Nullable<'a, T>(pub &'a Option<T>);

impl<T: fmt::Display> fmt::Display for Nullable<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("None"),
        }
    }
}
