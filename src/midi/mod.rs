pub mod netsync;
