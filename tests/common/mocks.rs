//! Mock output stream, used to make writes fail on demand.
use mockall::mock;

use std::io::{self, Write};

mock! {
    pub Output {}
    impl Write for Output {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
        fn flush(&mut self) -> io::Result<()>;
    }
}
