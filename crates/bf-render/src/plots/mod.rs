pub mod bf;
