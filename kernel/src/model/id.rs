use std::fmt;

macro_rules! define_id {
    ($id_name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $id_name(i64);

        impl $id_name {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn raw(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $id_name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$id_name> for i64 {
            fn from(value: $id_name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $id_name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(BookId);
define_id!(ReaderId);
define_id!(LoanId);
