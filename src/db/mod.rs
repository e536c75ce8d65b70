pub mod db;
pub mod statedb;
