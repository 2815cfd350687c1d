#[macro_export]
macro_rules! space {
    ($reader:expr) => {{
        $reader.read_while($crate::util::is_space);
    }};
}
#[macro_export]
macro_rules! digits {
    ($reader:expr) => {{
        $reader.read_while($crate::util::is_digit)
    }};
}

#[macro_export]
macro_rules! until {
    ($reader:expr, $byte:expr) => {{
        $reader.read_while(|b| b != $byte)
    }};
}

#[macro_export]
macro_rules! until_newline {
    ($reader:expr) => {{
        $reader.read_while(|b| !$crate::util::is_newline(b))
    }};
}

pub use digits;
pub use space;
pub use until;
pub use until_newline;
