pub mod init;
pub mod install;
pub mod ls;
pub mod uninstall;
pub mod use_version;
pub mod version;
pub mod which;
