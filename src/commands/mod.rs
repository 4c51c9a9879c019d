/// `driftcheck config`
pub mod config;
/// `driftcheck generate`
pub mod generate;
/// `driftcheck verify`
pub mod verify;
