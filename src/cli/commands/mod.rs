mod init;
mod scan;

pub use init::init;
pub use scan::scan;
