#![allow(unused_macros)]
#[macro_export]
macro_rules! verbose_println {
    ($($p:expr),+) => {
        if $crate::config::verbose() {
            println!($($p),+);
        }
    }
}
#[macro_export]
macro_rules! info {
    ($($p:expr),+) => {
        println!(concat!($crate::blue!("INFO"),": {}"),format_args!($($p),+))
    }
}
#[macro_export]
macro_rules! warn {
    ($($p:expr),+) => {
        println!(concat!($crate::red!("WARNING"),": {}"),format_args!($($p),+))
    }
}
#[macro_export]
macro_rules! general_err {
    ($msg:expr) => {
        $crate::Error::new($crate::ErrorKind::General, None, format!("{}", $msg).as_str())
    };
}
#[macro_export]
macro_rules! syntax_err_line {
    ($line:expr, $msg:expr) => {
        $crate::Error::new(
            $crate::ErrorKind::Syntax,
            None,
            format!("{}, line {}: {}", $crate::red!("Syntax Error"), $line, $msg).as_str(),
        )
    };
}
#[macro_export]
macro_rules! ambiguous_err {
    ($cycle:expr, $($msg:expr),*) => {
        $crate::Error::new(
            $crate::ErrorKind::AmbiguousBusCycle,
            Some($cycle),
            format!("{} {}", $crate::red!("Ambiguous Bus Cycle"), format!($($msg),*)).as_str(),
        )
    };
}
#[macro_export]
macro_rules! color {
    ($color: literal, $msg: expr) => {
        concat!("\x1b[", $color, "m", $msg, "\x1b[0m")
    };
}
#[macro_export]
macro_rules! red {
    ($msg:expr) => {
        $crate::color!(91, $msg)
    };
}
#[macro_export]
macro_rules! blue {
    ($msg:expr) => {
        $crate::color!(94, $msg)
    };
}
