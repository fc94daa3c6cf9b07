pub mod check;
pub mod init;
pub mod lookup;
pub mod product;
